//! Application ("response") endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::txn::with_txn;
use crate::domain::Role;
use crate::error::AppError;
use crate::extractors::{parse_json, parse_path_id, parse_query, Identity};
use crate::repos::responses::{self, Response};
use crate::repos::{statuses, vacancies};
use crate::state::app_state::AppState;
use crate::web::envelope;

/// Seeded status every new application starts in.
const INITIAL_STATUS: &str = "pending";

#[derive(Debug, Deserialize)]
struct CreateResponseRequest {
    vacancy_id: i64,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatchStatusRequest {
    response_id: i64,
    status_id: i64,
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: i64,
}

#[derive(Debug, Serialize)]
struct ResponseInfo {
    id: i64,
    candidate_id: i64,
    vacancy_id: i64,
    status_id: i64,
    message: Option<String>,
}

impl From<Response> for ResponseInfo {
    fn from(r: Response) -> Self {
        Self {
            id: r.id,
            candidate_id: r.candidate_id,
            vacancy_id: r.vacancy_id,
            status_id: r.status_id,
            message: r.message,
        }
    }
}

/// `POST /user/otklik` — apply to a vacancy.
///
/// The vacancy must exist (404 otherwise) and the caller may apply to it
/// only once; the second attempt surfaces the storage uniqueness
/// constraint as a 409 conflict.
async fn create_response(
    req: HttpRequest,
    identity: Identity,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Admin])?;

    let create: CreateResponseRequest = parse_json(&body)?;
    let response = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        vacancies::get_vacancy(txn, create.vacancy_id).await?;
        let pending = statuses::get_status_by_name(txn, INITIAL_STATUS).await?;
        responses::create_response(
            txn,
            identity.user_id,
            create.vacancy_id,
            pending.id,
            create.message,
        )
        .await
        .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "response": ResponseInfo::from(response) })))
}

/// `GET /user/otklik` — list the caller's own applications.
async fn list_own_responses(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Admin])?;

    let list = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        responses::list_responses_by_candidate(txn, identity.user_id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    let list: Vec<ResponseInfo> = list.into_iter().map(ResponseInfo::from).collect();
    Ok(envelope::ok(json!({ "responses": list })))
}

/// `GET /vac/otkliks/{id}` — list applications for an owned vacancy.
async fn list_vacancy_responses(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Employee, Role::Admin])?;

    let vacancy_id = parse_path_id(&req, "id")?;
    let list = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        let vacancy = vacancies::get_vacancy(txn, vacancy_id).await?;
        if identity.role != Role::Admin && vacancy.employer_id != identity.user_id {
            return Err(AppError::insufficient_role());
        }
        responses::list_responses_by_vacancy(txn, vacancy_id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    let list: Vec<ResponseInfo> = list.into_iter().map(ResponseInfo::from).collect();
    Ok(envelope::ok(json!({ "responses": list })))
}

/// `PATCH /emp/otklik` — move an application to a new status.
async fn patch_response_status(
    req: HttpRequest,
    identity: Identity,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Employee, Role::Admin])?;

    let patch: PatchStatusRequest = parse_json(&body)?;
    let updated = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        let response = responses::get_response(txn, patch.response_id).await?;
        let vacancy = vacancies::get_vacancy(txn, response.vacancy_id).await?;
        if identity.role != Role::Admin && vacancy.employer_id != identity.user_id {
            return Err(AppError::insufficient_role());
        }
        // Reject unknown statuses with 404 instead of bouncing off the FK.
        statuses::get_status(txn, patch.status_id).await?;
        responses::set_response_status(txn, patch.response_id, patch.status_id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "response": ResponseInfo::from(updated) })))
}

/// `DELETE /user/otklik?id=` — withdraw an own application.
async fn delete_response(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Admin])?;

    let query: IdQuery = parse_query(&req)?;
    with_txn(Some(&req), &state, |txn| Box::pin(async move {
        let response = responses::get_response(txn, query.id).await?;
        if identity.role != Role::Admin && response.candidate_id != identity.user_id {
            return Err(AppError::insufficient_role());
        }
        responses::delete_response(txn, query.id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/otklik", web::post().to(create_response))
        .route("/user/otklik", web::get().to(list_own_responses))
        .route("/user/otklik", web::delete().to(delete_response))
        .route("/vac/otkliks/{id}", web::get().to(list_vacancy_responses))
        .route("/emp/otklik", web::patch().to(patch_response_status));
}
