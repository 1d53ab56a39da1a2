//! Success envelope.
//!
//! Every endpoint responds with a JSON object carrying a `status` field:
//! `"Ok!"` plus endpoint payload on success, `"Err"` plus `info`/`error`
//! on failure (the failure side lives in `crate::error`).

use actix_web::HttpResponse;
use serde_json::{Map, Value};

use crate::error::OK_STATUS;

/// 200 response with `status:"Ok!"` merged into the payload object.
pub fn ok(payload: Value) -> HttpResponse {
    let mut object = match payload {
        Value::Object(map) => map,
        // Non-object payloads are nested to keep the envelope an object.
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    object.insert("status".to_string(), Value::String(OK_STATUS.to_string()));
    HttpResponse::Ok().json(Value::Object(object))
}

/// 200 response carrying only the status field.
pub fn ok_empty() -> HttpResponse {
    ok(Value::Object(Map::new()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[actix_web::test]
    async fn ok_merges_status_into_payload() {
        let resp = ok(json!({"id": 5}));
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "Ok!");
        assert_eq!(value["id"], 5);
    }

    #[actix_web::test]
    async fn non_object_payload_is_nested() {
        let resp = ok(json!([1, 2, 3]));
        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "Ok!");
        assert_eq!(value["data"], json!([1, 2, 3]));
    }
}
