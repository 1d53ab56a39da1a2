use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::mail::{LogMailer, ResetMailer};

use super::security_config::SecurityConfig;

/// Application state containing shared resources.
///
/// The security config is read-only after startup; the connection pool is
/// the only other cross-request state in the process.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in storage-isolation test scenarios)
    db: Option<Arc<DatabaseConnection>>,
    /// JWT settings
    pub security: SecurityConfig,
    /// Outbound-mail collaborator for the password-reset flow
    pub mailer: Arc<dyn ResetMailer>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(Arc::new(db)),
            security,
            mailer: Arc::new(LogMailer),
        }
    }

    /// State without a database. Any storage attempt against it surfaces
    /// as `DbUnavailable`, which is what the handler-contract tests use to
    /// prove a request short-circuited before reaching storage.
    pub fn without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            mailer: Arc::new(LogMailer),
        }
    }

    /// Swap in a different mail collaborator (tests record what the reset
    /// flow hands over instead of logging it).
    pub fn with_mailer(mut self, mailer: Arc<dyn ResetMailer>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_deref()
    }
}
