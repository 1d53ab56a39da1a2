pub mod txn;
pub mod txn_policy;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Canonical accessor for the database connection held in AppState.
///
/// Returns `DbUnavailable` when the state was built without a database,
/// which is how storage-isolation tests detect a handler that failed to
/// short-circuit.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn require_db_without_db_fails() {
        let state = AppState::without_db(SecurityConfig::default());
        assert!(matches!(require_db(&state), Err(AppError::DbUnavailable)));
    }

    #[test]
    fn db_unavailable_renders_as_500() {
        let state = AppState::without_db(SecurityConfig::default());
        let err = require_db(&state).unwrap_err();
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
