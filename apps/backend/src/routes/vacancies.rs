//! Vacancy endpoints.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::txn::with_txn;
use crate::domain::Role;
use crate::error::AppError;
use crate::extractors::{parse_json, parse_path_id, parse_query, Identity};
use crate::repos::vacancies::{self, NewVacancy, Vacancy, VacancyUpdate};
use crate::state::app_state::AppState;
use crate::web::envelope;

#[derive(Debug, Deserialize)]
struct CreateVacancyRequest {
    title: String,
    description: String,
    salary: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UpdateVacancyRequest {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    salary: Option<i64>,
    is_open: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct IdQuery {
    id: i64,
}

#[derive(Debug, Serialize)]
struct VacancyInfo {
    id: i64,
    employer_id: i64,
    title: String,
    description: String,
    salary: Option<i64>,
    is_open: bool,
}

impl From<Vacancy> for VacancyInfo {
    fn from(v: Vacancy) -> Self {
        Self {
            id: v.id,
            employer_id: v.employer_id,
            title: v.title,
            description: v.description,
            salary: v.salary,
            is_open: v.is_open,
        }
    }
}

/// Owners may touch their own vacancies; admins may touch any.
fn require_owner(identity: &Identity, vacancy: &Vacancy) -> Result<(), AppError> {
    if identity.role == Role::Admin || vacancy.employer_id == identity.user_id {
        Ok(())
    } else {
        Err(AppError::insufficient_role())
    }
}

/// `POST /vac` — employees create vacancies they own.
async fn create_vacancy(
    req: HttpRequest,
    identity: Identity,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Employee])?;

    let create: CreateVacancyRequest = parse_json(&body)?;
    if create.title.trim().is_empty() {
        return Err(AppError::bad_request("title is required", None));
    }

    let new = NewVacancy {
        title: create.title,
        description: create.description,
        salary: create.salary,
    };

    let vacancy = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        vacancies::create_vacancy(txn, identity.user_id, new)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "vacancy": VacancyInfo::from(vacancy) })))
}

/// `GET /vac/{id}` — fetch one vacancy.
async fn get_vacancy(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Employee, Role::Admin])?;

    let id = parse_path_id(&req, "id")?;
    let vacancy = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        vacancies::get_vacancy(txn, id).await.map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "vacancy": VacancyInfo::from(vacancy) })))
}

/// `GET /emp/vacs/{id}` — list an employer's vacancies.
async fn list_employer_vacancies(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Candidate, Role::Employee, Role::Admin])?;

    let employer_id = parse_path_id(&req, "id")?;
    let list = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        vacancies::list_vacancies_by_employer(txn, employer_id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    let list: Vec<VacancyInfo> = list.into_iter().map(VacancyInfo::from).collect();
    Ok(envelope::ok(json!({ "vacancies": list })))
}

/// `PUT /vac` — update an owned vacancy.
async fn update_vacancy(
    req: HttpRequest,
    identity: Identity,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Employee, Role::Admin])?;

    let update: UpdateVacancyRequest = parse_json(&body)?;
    let vacancy = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        let existing = vacancies::get_vacancy(txn, update.id).await?;
        require_owner(&identity, &existing)?;

        let fields = VacancyUpdate {
            title: update.title,
            description: update.description,
            salary: update.salary.map(Some),
            is_open: update.is_open,
        };
        vacancies::update_vacancy(txn, update.id, fields)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok(json!({ "vacancy": VacancyInfo::from(vacancy) })))
}

/// `DELETE /vac?id=` — delete an owned vacancy.
async fn delete_vacancy(
    req: HttpRequest,
    identity: Identity,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    identity.require_role(&[Role::Employee, Role::Admin])?;

    let query: IdQuery = parse_query(&req)?;
    with_txn(Some(&req), &state, |txn| Box::pin(async move {
        let existing = vacancies::get_vacancy(txn, query.id).await?;
        require_owner(&identity, &existing)?;
        vacancies::delete_vacancy(txn, query.id)
            .await
            .map_err(AppError::from)
    }))
    .await?;

    Ok(envelope::ok_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/vac", web::post().to(create_vacancy))
        .route("/vac", web::put().to(update_vacancy))
        .route("/vac", web::delete().to(delete_vacancy))
        .route("/vac/{id}", web::get().to(get_vacancy))
        .route("/emp/vacs/{id}", web::get().to(list_employer_vacancies));
}
