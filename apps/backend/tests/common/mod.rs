//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::time::SystemTime;

use jobboard_backend::auth::jwt::mint_access_token;
use jobboard_backend::domain::Role;
use jobboard_backend::state::security_config::SecurityConfig;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// `Authorization` header value for a token minted under the test secret.
pub fn bearer(user_id: i64, role: Role) -> String {
    let token = mint_access_token(
        user_id,
        "tester@example.com",
        role,
        SystemTime::now(),
        &security(),
    )
    .expect("mint test token");
    format!("Bearer {token}")
}
