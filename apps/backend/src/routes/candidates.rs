//! Candidate endpoints.
//!
//! Every authenticated handler follows the fixed sequence: identity,
//! role allow-list, parse, storage inside the request transaction,
//! `Ok!` envelope. Status codes come from the central table in
//! `crate::error`; nothing here picks one ad hoc.

use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::hash_password;
use crate::db::txn::with_txn;
use crate::domain::Role;
use crate::error::AppError;
use crate::extractors::{parse_json, parse_query, Identity};
use crate::repos::candidates::{self, Candidate, CandidateUpdate, NewCandidate};
use crate::state::app_state::AppState;
use crate::web::envelope;

#[derive(Debug, Deserialize)]
struct CreateCandidateRequest {
    name: String,
    phone_number: String,
    email: String,
    password: String,
    status_id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateCandidateRequest {
    name: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    status_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: i64,
}

/// Candidate as returned to clients; the password hash never leaves the
/// storage layer.
#[derive(Debug, Serialize)]
struct CandidateInfo {
    id: i64,
    name: String,
    phone_number: String,
    email: String,
    role: Role,
    status_id: i64,
}

impl From<Candidate> for CandidateInfo {
    fn from(c: Candidate) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone_number: c.phone_number,
            email: c.email,
            role: c.role,
            status_id: c.status_id,
        }
    }
}

/// `POST /user` — public; create a candidate and issue an access token.
async fn create_candidate(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let create: CreateCandidateRequest = parse_json(&body)?;
    if create.name.trim().is_empty()
        || create.email.trim().is_empty()
        || create.password.is_empty()
    {
        return Err(AppError::bad_request(
            "name, email and password are required",
            None,
        ));
    }

    let password_hash = hash_password(&create.password)?;
    let new = NewCandidate {
        name: create.name,
        phone_number: create.phone_number,
        email: create.email,
        password_hash,
        status_id: create.status_id,
    };

    let candidate = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        candidates::create_candidate(txn, new).await.map_err(AppError::from)
    }))
    .await?;

    let token = mint_access_token(
        candidate.id,
        &candidate.email,
        candidate.role,
        SystemTime::now(),
        &state.security,
    )?;

    Ok(envelope::ok(json!({
        "token": token,
        "candidate": CandidateInfo::from(candidate),
    })))
}

/// `GET /user` — fetch the caller's own candidate record.
async fn get_own_candidate(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Admin])?;

    let candidate = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        candidates::get_candidate(txn, identity.user_id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "candidate": CandidateInfo::from(candidate) })))
}

/// `PUT /user` — update the caller's own candidate record.
async fn update_own_candidate(
    req: HttpRequest,
    identity: Identity,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Admin])?;

    let update: UpdateCandidateRequest = parse_json(&body)?;
    let update = CandidateUpdate {
        name: update.name,
        phone_number: update.phone_number,
        email: update.email,
        status_id: update.status_id,
    };

    let candidate = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        candidates::update_candidate(txn, identity.user_id, update)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "candidate": CandidateInfo::from(candidate) })))
}

/// `DELETE /adm/user?id=` — admin-only candidate removal.
async fn delete_candidate(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Admin])?;

    let query: IdQuery = parse_query(&req)?;
    with_txn(Some(&req), &state, |txn| Box::pin(async move {
        candidates::delete_candidate(txn, query.id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user", web::post().to(create_candidate))
        .route("/user", web::get().to(get_own_candidate))
        .route("/user", web::put().to(update_own_candidate))
        .route("/adm/user", web::delete().to(delete_candidate));
}
