//! Candidate storage operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use super::parse_role;
use crate::domain::Role;
use crate::entities::candidates;
use crate::errors::DomainError;

/// Candidate domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub status_id: i64,
}

/// Fields updatable through `PUT /user`; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub status_id: Option<i64>,
}

fn to_domain(model: candidates::Model) -> Result<Candidate, DomainError> {
    Ok(Candidate {
        id: model.id,
        name: model.name,
        phone_number: model.phone_number,
        email: model.email,
        password_hash: model.password_hash,
        role: parse_role(&model.role)?,
        status_id: model.status_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub async fn create_candidate<C: ConnectionTrait>(
    conn: &C,
    new: NewCandidate,
) -> Result<Candidate, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = candidates::ActiveModel {
        id: NotSet,
        name: Set(new.name),
        phone_number: Set(new.phone_number),
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        role: Set(Role::Candidate.as_str().to_string()),
        status_id: Set(new.status_id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active
        .insert(conn)
        .await
        .map_err(|e| DomainError::classify("create candidate", e))?;
    to_domain(model)
}

/// Expected-one lookup: absent id is a NotFound error.
pub async fn get_candidate<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Candidate, DomainError> {
    let model = candidates::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch candidate", e))?
        .ok_or_else(|| DomainError::not_found(format!("candidate {id} not found")))?;
    to_domain(model)
}

pub async fn find_candidate_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<Candidate>, DomainError> {
    let model = candidates::Entity::find()
        .filter(candidates::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch candidate by email", e))?;
    model.map(to_domain).transpose()
}

pub async fn update_candidate<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    update: CandidateUpdate,
) -> Result<Candidate, DomainError> {
    let existing = candidates::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch candidate", e))?
        .ok_or_else(|| DomainError::not_found(format!("candidate {id} not found")))?;

    let mut active: candidates::ActiveModel = existing.into();
    if let Some(name) = update.name {
        active.name = Set(name);
    }
    if let Some(phone_number) = update.phone_number {
        active.phone_number = Set(phone_number);
    }
    if let Some(email) = update.email {
        active.email = Set(email);
    }
    if let Some(status_id) = update.status_id {
        active.status_id = Set(status_id);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    let model = active
        .update(conn)
        .await
        .map_err(|e| DomainError::classify("update candidate", e))?;
    to_domain(model)
}

pub async fn update_candidate_password<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    password_hash: &str,
) -> Result<(), DomainError> {
    let existing = candidates::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch candidate", e))?
        .ok_or_else(|| DomainError::not_found(format!("candidate {id} not found")))?;

    let mut active: candidates::ActiveModel = existing.into();
    active.password_hash = Set(password_hash.to_string());
    active.updated_at = Set(OffsetDateTime::now_utc());
    active
        .update(conn)
        .await
        .map_err(|e| DomainError::classify("update candidate password", e))?;
    Ok(())
}

pub async fn delete_candidate<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    let res = candidates::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(|e| DomainError::classify("delete candidate", e))?;
    if res.rows_affected == 0 {
        return Err(DomainError::not_found(format!("candidate {id} not found")));
    }
    Ok(())
}
