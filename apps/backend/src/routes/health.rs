use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;
use crate::web::envelope;

async fn health() -> Result<HttpResponse, AppError> {
    Ok(envelope::ok(json!({ "info": "alive" })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
