//! Typed request identity.
//!
//! The bearer-auth middleware validates the token and inserts an
//! `Identity` into request extensions. Handlers receive it as a typed
//! extractor parameter instead of poking at a stringly-keyed context bag,
//! and every role decision goes through [`Identity::require_role`].

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::error::AppError;

/// The (user id, role) pair derived from a validated token, owned by one
/// request and destroyed with it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Enforce the endpoint's role allow-list. A mismatch is the fixed
    /// 401 "insufficient permission" response.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::insufficient_role())
        }
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .copied()
                .ok_or_else(|| AppError::identity_missing("no identity in request context")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_in_allow_list_passes() {
        let identity = Identity::new(1, Role::Employee);
        assert!(identity
            .require_role(&[Role::Employee, Role::Admin])
            .is_ok());
    }

    #[test]
    fn role_outside_allow_list_is_insufficient() {
        let identity = Identity::new(1, Role::Candidate);
        let err = identity
            .require_role(&[Role::Employee, Role::Admin])
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientRole));
    }
}
