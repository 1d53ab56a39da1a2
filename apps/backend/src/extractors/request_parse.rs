//! Body, path and query parsing with envelope-shaped failures.
//!
//! Handlers call these *after* the role check so that an unauthorized
//! caller with a garbled body still gets 401, not 400. Parse failures
//! carry the raw parser error in the envelope's `error` field.

use actix_web::{web, HttpRequest};
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::AppError;

/// Deserialize a collected JSON body into `T`.
pub fn parse_json<T: DeserializeOwned>(body: &web::Bytes) -> Result<T, AppError> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        debug!(body_size = body.len(), error = %e, "request body failed to parse");
        AppError::bad_request(classify_json_error(&e), Some(e.to_string()))
    })
}

/// Parse a numeric path segment registered under `name`.
pub fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, AppError> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| AppError::bad_request(format!("missing path parameter: {name}"), None))?;

    raw.parse::<i64>().map_err(|e| {
        AppError::bad_request(
            format!("invalid path parameter {name}: {raw}"),
            Some(e.to_string()),
        )
    })
}

/// Deserialize the query string into `T`.
pub fn parse_query<T: DeserializeOwned>(req: &HttpRequest) -> Result<T, AppError> {
    web::Query::<T>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| {
            AppError::bad_request("invalid query parameters".to_string(), Some(e.to_string()))
        })
}

/// Reduce serde_json's error to a stable, sanitized context message; the
/// full parser text travels separately in the envelope's `error` field.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "invalid JSON: wrong or missing fields".to_string()
        }
        serde_json::error::Category::Io => "invalid JSON: failed to read body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::web::Bytes;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[allow(dead_code)]
        name: String,
    }

    #[test]
    fn valid_json_parses() {
        let body = Bytes::from_static(b"{\"name\":\"A\"}");
        assert!(parse_json::<Probe>(&body).is_ok());
    }

    #[test]
    fn syntax_error_carries_raw_parser_text() {
        let body = Bytes::from_static(b"{\"name\":");
        match parse_json::<Probe>(&body) {
            Err(AppError::BadRequest { error, .. }) => {
                assert!(error.is_some());
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_is_a_data_error() {
        let body = Bytes::from_static(b"{}");
        match parse_json::<Probe>(&body) {
            Err(AppError::BadRequest { info, .. }) => {
                assert!(info.contains("wrong or missing fields"));
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
}
