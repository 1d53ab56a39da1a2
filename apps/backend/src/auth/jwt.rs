//! Token service: mint and verify HS256 tokens.
//!
//! Pure functions of the process-wide secret and their inputs; no
//! revocation store is consulted. The compact JWT serialization is
//! base64url, so issued tokens never contain `+` or `/`.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, TokenContext};
use crate::domain::Role;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Access tokens live for 24 hours.
const ACCESS_TTL_SECS: i64 = 24 * 60 * 60;
/// Password-reset tokens live for 30 minutes.
const RESET_TTL_SECS: i64 = 30 * 60;

/// Derive the signing key for a context. Reset tokens are signed with a
/// key derived from the process secret, so the two contexts can never
/// validate each other's tokens.
fn context_secret(security: &SecurityConfig, ctx: TokenContext) -> Vec<u8> {
    match ctx {
        TokenContext::Access => security.jwt_secret.clone(),
        TokenContext::PasswordReset => {
            let mut key = security.jwt_secret.clone();
            key.extend_from_slice(b".password_reset");
            key
        }
    }
}

fn mint(
    sub: i64,
    email: &str,
    role: Role,
    ctx: TokenContext,
    ttl_secs: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("failed to read current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub,
        email: email.to_string(),
        role,
        ctx,
        iat,
        exp: iat + ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&context_secret(security, ctx)),
    )
    .map_err(|e| AppError::internal(format!("failed to encode token: {e}")))
}

/// Mint an access token with a 24-hour TTL.
pub fn mint_access_token(
    sub: i64,
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint(
        sub,
        email,
        role,
        TokenContext::Access,
        ACCESS_TTL_SECS,
        now,
        security,
    )
}

/// Mint a password-reset token with a 30-minute TTL, signed under the
/// reset context.
pub fn mint_reset_token(
    sub: i64,
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    mint(
        sub,
        email,
        role,
        TokenContext::PasswordReset,
        RESET_TTL_SECS,
        now,
        security,
    )
}

/// Verify a token under the expected signing context and return its claims.
///
/// Errors:
/// - expired token → `AppError::TokenExpired`
/// - wrong key or wrong context → `AppError::TokenInvalidSignature`
/// - anything else (garbled input, wrong shape) → `AppError::TokenMalformed`
pub fn verify_token(
    token: &str,
    expected_ctx: TokenContext,
    security: &SecurityConfig,
) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin the algorithm to the
    // configured one.
    let validation = Validation::new(security.algorithm);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&context_secret(security, expected_ctx)),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::token_expired(),
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::token_invalid_signature(),
        _ => AppError::token_malformed(),
    })?;

    // The ctx claim is belt and braces on top of the derived key.
    if claims.ctx != expected_ctx {
        return Err(AppError::token_invalid_signature());
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::*;
    use crate::state::security_config::SecurityConfig;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify_round_trip() {
        let security = security();
        let now = SystemTime::now();

        let token = mint_access_token(42, "a@a.com", Role::Candidate, now, &security).unwrap();
        let claims = verify_token(&token, TokenContext::Access, &security).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@a.com");
        assert_eq!(claims.role, Role::Candidate);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + 24 * 60 * 60);
    }

    #[test]
    fn tokens_are_url_safe() {
        let security = security();
        for i in 0..32 {
            let token = mint_access_token(
                i,
                &format!("user{i}@example.com"),
                Role::Employee,
                SystemTime::now(),
                &security,
            )
            .unwrap();
            assert!(!token.contains('+'), "token contains '+': {token}");
            assert!(!token.contains('/'), "token contains '/': {token}");
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = security();
        // 25 hours ago, so a 24-hour token is past expiry
        let now = SystemTime::now() - Duration::from_secs(25 * 60 * 60);

        let token = mint_access_token(7, "x@x.com", Role::Employee, now, &security).unwrap();
        let result = verify_token(&token, TokenContext::Access, &security);

        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token =
            mint_access_token(7, "x@x.com", Role::Admin, SystemTime::now(), &security_a).unwrap();
        let result = verify_token(&token, TokenContext::Access, &security_b);

        assert!(matches!(result, Err(AppError::TokenInvalidSignature)));
    }

    #[test]
    fn reset_token_does_not_validate_as_access_token() {
        let security = security();
        let token =
            mint_reset_token(7, "x@x.com", Role::Candidate, SystemTime::now(), &security).unwrap();

        let result = verify_token(&token, TokenContext::Access, &security);
        assert!(matches!(result, Err(AppError::TokenInvalidSignature)));

        // It still verifies in its own context.
        let claims = verify_token(&token, TokenContext::PasswordReset, &security).unwrap();
        assert_eq!(claims.exp, claims.iat + 30 * 60);
    }

    #[test]
    fn garbage_input_is_malformed() {
        let result = verify_token("not-a-token", TokenContext::Access, &security());
        assert!(matches!(result, Err(AppError::TokenMalformed)));
    }
}
