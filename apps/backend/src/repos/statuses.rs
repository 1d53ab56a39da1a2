//! Status lookup operations.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::entities::statuses;
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: i64,
    pub name: String,
}

impl From<statuses::Model> for Status {
    fn from(model: statuses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub async fn get_status<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Status, DomainError> {
    let model = statuses::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch status", e))?
        .ok_or_else(|| DomainError::not_found(format!("status {id} not found")))?;
    Ok(Status::from(model))
}

/// Lookup by seeded name (`pending`, `accepted`, `rejected`).
pub async fn get_status_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Status, DomainError> {
    let model = statuses::Entity::find()
        .filter(statuses::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch status by name", e))?
        .ok_or_else(|| DomainError::not_found(format!("status {name} not found")))?;
    Ok(Status::from(model))
}
