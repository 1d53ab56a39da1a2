//! Outbound-mail collaborator boundary.
//!
//! The password-reset flow generates credentials but does not deliver them;
//! it hands a [`PasswordResetMail`] to whatever [`ResetMailer`] is installed
//! in the application state. The default implementation only records that a
//! message was dispatched. Delivery is reported, never retried.

use tracing::info;

use crate::error::AppError;

/// Everything the reset flow produces for the account holder: the freshly
/// generated password and a short-lived token proving the reset origin.
pub struct PasswordResetMail {
    pub email: String,
    pub new_password: String,
    pub reset_token: String,
}

pub trait ResetMailer: Send + Sync {
    fn send_password_reset(&self, mail: PasswordResetMail) -> Result<(), AppError>;
}

/// Stand-in mailer: logs the dispatch without the credential material.
pub struct LogMailer;

impl ResetMailer for LogMailer {
    fn send_password_reset(&self, mail: PasswordResetMail) -> Result<(), AppError> {
        // The generated password and token never reach the logs.
        info!(email = %mail.email, "password reset message dispatched");
        Ok(())
    }
}
