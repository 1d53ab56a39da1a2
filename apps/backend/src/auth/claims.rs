//! Claims carried by backend-issued tokens.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Which signing context a token belongs to. Access tokens and
/// password-reset tokens are signed with distinct derived keys, so one
/// can never be presented where the other is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenContext {
    #[serde(rename = "access")]
    Access,
    #[serde(rename = "password_reset")]
    PasswordReset,
}

/// Claims included in backend-issued tokens.
///
/// Immutable once issued; invalidated only by expiry (no revocation list).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id (candidates.id or employers.id depending on role)
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Signing context this token was minted under
    pub ctx: TokenContext,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
