//! Storage-layer error type used across repos.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//! Repos never make authorization decisions; by the time a query runs,
//! the handler has already enforced the role policy.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use sea_orm::DbErr;

/// Central storage error taxonomy: an expected-one query returned zero rows,
/// a uniqueness constraint fired, or anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Expected exactly one row, found none.
    NotFound { info: String },
    /// A uniqueness constraint was violated.
    ConstraintViolation { info: String, source_text: String },
    /// Query build or execution failure with no more specific classification.
    Unknown { info: String, source_text: String },
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotFound { info } => write!(f, "not found: {info}"),
            DomainError::ConstraintViolation { info, source_text } => {
                write!(f, "constraint violation: {info}: {source_text}")
            }
            DomainError::Unknown { info, source_text } => {
                write!(f, "storage error: {info}: {source_text}")
            }
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn not_found(info: impl Into<String>) -> Self {
        Self::NotFound { info: info.into() }
    }

    pub fn constraint_violation(info: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            info: info.into(),
            source_text: source_text.into(),
        }
    }

    pub fn unknown(info: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self::Unknown {
            info: info.into(),
            source_text: source_text.into(),
        }
    }

    /// Classify a SeaORM error under a given context message.
    ///
    /// Postgres reports uniqueness failures as `duplicate key value violates
    /// unique constraint ...`; SQLite (used by some test profiles) says
    /// `UNIQUE constraint failed`. Everything else maps to `Unknown`.
    pub fn classify(info: impl Into<String>, err: DbErr) -> Self {
        let text = err.to_string();
        let lowered = text.to_lowercase();
        if lowered.contains("unique") || lowered.contains("duplicate") {
            Self::constraint_violation(info, text)
        } else {
            Self::unknown(info, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_classifies_as_constraint_violation() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_responses_candidate_vacancy\""
                .to_string(),
        );
        match DomainError::classify("create response", err) {
            DomainError::ConstraintViolation { info, .. } => assert_eq!(info, "create response"),
            other => panic!("expected ConstraintViolation, got {other:?}"),
        }
    }

    #[test]
    fn sqlite_unique_text_classifies_as_constraint_violation() {
        let err = DbErr::Custom("UNIQUE constraint failed: responses.candidate_id".to_string());
        assert!(matches!(
            DomainError::classify("create response", err),
            DomainError::ConstraintViolation { .. }
        ));
    }

    #[test]
    fn other_errors_classify_as_unknown() {
        let err = DbErr::Custom("connection reset by peer".to_string());
        assert!(matches!(
            DomainError::classify("list vacancies", err),
            DomainError::Unknown { .. }
        ));
    }
}
