//! Application error type and the JSON error envelope.
//!
//! Every failure a handler can produce is a variant here, and the
//! kind→status mapping lives in exactly one place (`AppError::status`).
//! The HTTP body is always `{"status":"Err","info":...,"error":...}`,
//! where `error` carries the raw underlying error text when one exists.
//! Exposing that raw text to clients mirrors the system's long-observed
//! behavior; see DESIGN.md before tightening it.

use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::DomainError;

pub const ERR_STATUS: &str = "Err";
pub const OK_STATUS: &str = "Ok!";

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrEnvelope {
    pub status: &'static str,
    pub info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("identity missing: {info}")]
    IdentityMissing { info: String },
    #[error("insufficient permission")]
    InsufficientRole,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("bad request: {info}")]
    BadRequest {
        info: String,
        error: Option<String>,
    },
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token signature")]
    TokenInvalidSignature,
    #[error("malformed token")]
    TokenMalformed,
    #[error("not found: {info}")]
    NotFound { info: String },
    #[error("conflict: {info}")]
    Conflict {
        info: String,
        error: Option<String>,
    },
    #[error("storage error: {info}")]
    Storage {
        info: String,
        error: Option<String>,
    },
    #[error("database unavailable")]
    DbUnavailable,
    #[error("internal error: {info}")]
    Internal { info: String },
    #[error("configuration error: {info}")]
    Config { info: String },
}

impl AppError {
    /// The single kind→status table every handler inherits.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::IdentityMissing { .. } => StatusCode::BAD_REQUEST,
            AppError::InsufficientRole => StatusCode::UNAUTHORIZED,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::TokenInvalidSignature => StatusCode::UNAUTHORIZED,
            AppError::TokenMalformed => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable context for the `info` field.
    fn info(&self) -> String {
        match self {
            AppError::IdentityMissing { info } => info.clone(),
            AppError::InsufficientRole => "insufficient permission".to_string(),
            AppError::InvalidCredentials => "invalid email or password".to_string(),
            AppError::BadRequest { info, .. } => info.clone(),
            AppError::TokenExpired => "token expired".to_string(),
            AppError::TokenInvalidSignature => "invalid token signature".to_string(),
            AppError::TokenMalformed => "malformed token".to_string(),
            AppError::NotFound { info } => info.clone(),
            AppError::Conflict { info, .. } => info.clone(),
            AppError::Storage { info, .. } => info.clone(),
            AppError::DbUnavailable => "database unavailable".to_string(),
            AppError::Internal { info } => info.clone(),
            AppError::Config { info } => info.clone(),
        }
    }

    /// Raw underlying error text for the `error` field, when one exists.
    fn raw_error(&self) -> Option<String> {
        match self {
            AppError::BadRequest { error, .. }
            | AppError::Conflict { error, .. }
            | AppError::Storage { error, .. } => error.clone(),
            _ => None,
        }
    }

    pub fn identity_missing(info: impl Into<String>) -> Self {
        Self::IdentityMissing { info: info.into() }
    }

    pub fn insufficient_role() -> Self {
        Self::InsufficientRole
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn bad_request(info: impl Into<String>, error: Option<String>) -> Self {
        Self::BadRequest {
            info: info.into(),
            error,
        }
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    pub fn token_invalid_signature() -> Self {
        Self::TokenInvalidSignature
    }

    pub fn token_malformed() -> Self {
        Self::TokenMalformed
    }

    pub fn not_found(info: impl Into<String>) -> Self {
        Self::NotFound { info: info.into() }
    }

    pub fn storage(info: impl Into<String>, error: Option<String>) -> Self {
        Self::Storage {
            info: info.into(),
            error,
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn internal(info: impl Into<String>) -> Self {
        Self::Internal { info: info.into() }
    }

    pub fn config(info: impl Into<String>) -> Self {
        Self::Config { info: info.into() }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { info } => AppError::NotFound { info },
            DomainError::ConstraintViolation { info, source_text } => AppError::Conflict {
                info,
                error: Some(source_text),
            },
            DomainError::Unknown { info, source_text } => AppError::Storage {
                info,
                error: Some(source_text),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::storage("database error", Some(e.to_string()))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let body = ErrEnvelope {
            status: ERR_STATUS,
            info: self.info(),
            error: self.raw_error(),
        };
        HttpResponse::build(self.status()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_maps_to_conflict_409() {
        let err: AppError =
            DomainError::constraint_violation("create response", "duplicate key").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        match err {
            AppError::Conflict { info, error } => {
                assert_eq!(info, "create response");
                assert_eq!(error.as_deref(), Some("duplicate key"));
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn not_found_maps_to_404_without_raw_error() {
        let err: AppError = DomainError::not_found("employer not found").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.raw_error().is_none());
    }

    #[test]
    fn unknown_storage_failure_maps_to_500() {
        let err: AppError = DomainError::unknown("list vacancies", "boom").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn envelope_omits_error_field_when_absent() {
        let body = serde_json::to_value(ErrEnvelope {
            status: ERR_STATUS,
            info: "insufficient permission".to_string(),
            error: None,
        })
        .unwrap();
        assert_eq!(body["status"], "Err");
        assert!(body.get("error").is_none());
    }
}
