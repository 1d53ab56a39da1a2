//! Employer storage operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use super::parse_role;
use crate::domain::Role;
use crate::entities::employers;
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Employer {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewEmployer {
    pub name: String,
    pub company: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct EmployerUpdate {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
}

fn to_domain(model: employers::Model) -> Result<Employer, DomainError> {
    Ok(Employer {
        id: model.id,
        name: model.name,
        company: model.company,
        email: model.email,
        password_hash: model.password_hash,
        role: parse_role(&model.role)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

pub async fn create_employer<C: ConnectionTrait>(
    conn: &C,
    new: NewEmployer,
) -> Result<Employer, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = employers::ActiveModel {
        id: NotSet,
        name: Set(new.name),
        company: Set(new.company),
        email: Set(new.email),
        password_hash: Set(new.password_hash),
        role: Set(Role::Employee.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active
        .insert(conn)
        .await
        .map_err(|e| DomainError::classify("create employer", e))?;
    to_domain(model)
}

pub async fn get_employer<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Employer, DomainError> {
    let model = employers::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch employer", e))?
        .ok_or_else(|| DomainError::not_found(format!("employer {id} not found")))?;
    to_domain(model)
}

pub async fn find_employer_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<Employer>, DomainError> {
    let model = employers::Entity::find()
        .filter(employers::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch employer by email", e))?;
    model.map(to_domain).transpose()
}

pub async fn update_employer<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    update: EmployerUpdate,
) -> Result<Employer, DomainError> {
    let existing = employers::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch employer", e))?
        .ok_or_else(|| DomainError::not_found(format!("employer {id} not found")))?;

    let mut active: employers::ActiveModel = existing.into();
    if let Some(name) = update.name {
        active.name = Set(name);
    }
    if let Some(company) = update.company {
        active.company = Set(company);
    }
    if let Some(email) = update.email {
        active.email = Set(email);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    let model = active
        .update(conn)
        .await
        .map_err(|e| DomainError::classify("update employer", e))?;
    to_domain(model)
}

pub async fn update_employer_password<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    password_hash: &str,
) -> Result<(), DomainError> {
    let existing = employers::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch employer", e))?
        .ok_or_else(|| DomainError::not_found(format!("employer {id} not found")))?;

    let mut active: employers::ActiveModel = existing.into();
    active.password_hash = Set(password_hash.to_string());
    active.updated_at = Set(OffsetDateTime::now_utc());
    active
        .update(conn)
        .await
        .map_err(|e| DomainError::classify("update employer password", e))?;
    Ok(())
}

pub async fn delete_employer<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    let res = employers::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(|e| DomainError::classify("delete employer", e))?;
    if res.rows_affected == 0 {
        return Err(DomainError::not_found(format!("employer {id} not found")));
    }
    Ok(())
}
