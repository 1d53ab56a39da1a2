//! Application ("response") storage operations.
//!
//! The `(candidate_id, vacancy_id)` pair is unique in the schema; a
//! second application by the same candidate to the same vacancy comes
//! back as `ConstraintViolation`.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::responses;
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub id: i64,
    pub candidate_id: i64,
    pub vacancy_id: i64,
    pub status_id: i64,
    pub message: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<responses::Model> for Response {
    fn from(model: responses::Model) -> Self {
        Self {
            id: model.id,
            candidate_id: model.candidate_id,
            vacancy_id: model.vacancy_id,
            status_id: model.status_id,
            message: model.message,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn create_response<C: ConnectionTrait>(
    conn: &C,
    candidate_id: i64,
    vacancy_id: i64,
    status_id: i64,
    message: Option<String>,
) -> Result<Response, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = responses::ActiveModel {
        id: NotSet,
        candidate_id: Set(candidate_id),
        vacancy_id: Set(vacancy_id),
        status_id: Set(status_id),
        message: Set(message),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active
        .insert(conn)
        .await
        .map_err(|e| DomainError::classify("create response", e))?;
    Ok(Response::from(model))
}

pub async fn get_response<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Response, DomainError> {
    let model = responses::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch response", e))?
        .ok_or_else(|| DomainError::not_found(format!("response {id} not found")))?;
    Ok(Response::from(model))
}

pub async fn list_responses_by_candidate<C: ConnectionTrait>(
    conn: &C,
    candidate_id: i64,
) -> Result<Vec<Response>, DomainError> {
    let models = responses::Entity::find()
        .filter(responses::Column::CandidateId.eq(candidate_id))
        .order_by_asc(responses::Column::Id)
        .all(conn)
        .await
        .map_err(|e| DomainError::classify("list responses", e))?;
    Ok(models.into_iter().map(Response::from).collect())
}

pub async fn list_responses_by_vacancy<C: ConnectionTrait>(
    conn: &C,
    vacancy_id: i64,
) -> Result<Vec<Response>, DomainError> {
    let models = responses::Entity::find()
        .filter(responses::Column::VacancyId.eq(vacancy_id))
        .order_by_asc(responses::Column::Id)
        .all(conn)
        .await
        .map_err(|e| DomainError::classify("list responses", e))?;
    Ok(models.into_iter().map(Response::from).collect())
}

pub async fn set_response_status<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    status_id: i64,
) -> Result<Response, DomainError> {
    let existing = responses::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch response", e))?
        .ok_or_else(|| DomainError::not_found(format!("response {id} not found")))?;

    let mut active: responses::ActiveModel = existing.into();
    active.status_id = Set(status_id);
    active.updated_at = Set(OffsetDateTime::now_utc());

    let model = active
        .update(conn)
        .await
        .map_err(|e| DomainError::classify("update response status", e))?;
    Ok(Response::from(model))
}

pub async fn delete_response<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    let res = responses::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(|e| DomainError::classify("delete response", e))?;
    if res.rows_affected == 0 {
        return Err(DomainError::not_found(format!("response {id} not found")));
    }
    Ok(())
}
