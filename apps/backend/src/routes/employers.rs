//! Employer endpoints.

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
use crate::repos::employers::{self, Employer, EmployerUpdate, NewEmployer};
use crate::state::app_state::AppState;
use crate::web::envelope;

#[derive(Debug, Deserialize)]
struct CreateEmployerRequest {
    name: String,
    company: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct UpdateEmployerRequest {
    name: Option<String>,
    company: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: i64,
}

#[derive(Debug, Serialize)]
struct EmployerInfo {
    id: i64,
    name: String,
    company: String,
    email: String,
    role: Role,
}

impl From<Employer> for EmployerInfo {
    fn from(e: Employer) -> Self {
        Self {
            id: e.id,
            name: e.name,
            company: e.company,
            email: e.email,
            role: e.role,
        }
    }
}

/// `POST /emp` — public; create an employer and issue an access token.
async fn create_employer(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let create: CreateEmployerRequest = parse_json(&body)?;
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
    let new = NewEmployer {
        name: create.name,
        company: create.company,
        email: create.email,
        password_hash,
    };

    let employer = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        employers::create_employer(txn, new).await.map_err(AppError::from)
    }))
    .await?;

    let token = mint_access_token(
        employer.id,
        &employer.email,
        employer.role,
        SystemTime::now(),
        &state.security,
    )?;

    Ok(envelope::ok(json!({
        "token": token,
        "employer": EmployerInfo::from(employer),
    })))
}

/// `GET /emp?id=` — any authenticated caller can look an employer up.
async fn get_employer(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Employee, Role::Admin])?;

    let query: IdQuery = parse_query(&req)?;
    let employer = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        employers::get_employer(txn, query.id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "employer": EmployerInfo::from(employer) })))
}

/// `PUT /emp` — update the caller's own employer record.
async fn update_own_employer(
    req: HttpRequest,
    identity: Identity,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Employee, Role::Admin])?;

    let update: UpdateEmployerRequest = parse_json(&body)?;
    let update = EmployerUpdate {
        name: update.name,
        company: update.company,
        email: update.email,
    };

    let employer = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        employers::update_employer(txn, identity.user_id, update)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "employer": EmployerInfo::from(employer) })))
}

/// `DELETE /adm/emp?id=` — admin-only employer removal.
async fn delete_employer(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Admin])?;

    let query: IdQuery = parse_query(&req)?;
    with_txn(Some(&req), &state, |txn| Box::pin(async move {
        employers::delete_employer(txn, query.id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/emp", web::post().to(create_employer))
        .route("/emp", web::get().to(get_employer))
        .route("/emp", web::put().to(update_own_employer))
        .route("/adm/emp", web::delete().to(delete_employer));
}
