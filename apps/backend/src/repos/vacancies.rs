//! Vacancy storage operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};
use time::OffsetDateTime;

use crate::entities::vacancies;
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub description: String,
    pub salary: Option<i64>,
    pub is_open: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewVacancy {
    pub title: String,
    pub description: String,
    pub salary: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct VacancyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub salary: Option<Option<i64>>,
    pub is_open: Option<bool>,
}

impl From<vacancies::Model> for Vacancy {
    fn from(model: vacancies::Model) -> Self {
        Self {
            id: model.id,
            employer_id: model.employer_id,
            title: model.title,
            description: model.description,
            salary: model.salary,
            is_open: model.is_open,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn create_vacancy<C: ConnectionTrait>(
    conn: &C,
    employer_id: i64,
    new: NewVacancy,
) -> Result<Vacancy, DomainError> {
    let now = OffsetDateTime::now_utc();
    let active = vacancies::ActiveModel {
        id: NotSet,
        employer_id: Set(employer_id),
        title: Set(new.title),
        description: Set(new.description),
        salary: Set(new.salary),
        is_open: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active
        .insert(conn)
        .await
        .map_err(|e| DomainError::classify("create vacancy", e))?;
    Ok(Vacancy::from(model))
}

pub async fn get_vacancy<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Vacancy, DomainError> {
    let model = vacancies::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch vacancy", e))?
        .ok_or_else(|| DomainError::not_found(format!("vacancy {id} not found")))?;
    Ok(Vacancy::from(model))
}

pub async fn list_vacancies_by_employer<C: ConnectionTrait>(
    conn: &C,
    employer_id: i64,
) -> Result<Vec<Vacancy>, DomainError> {
    let models = vacancies::Entity::find()
        .filter(vacancies::Column::EmployerId.eq(employer_id))
        .order_by_asc(vacancies::Column::Id)
        .all(conn)
        .await
        .map_err(|e| DomainError::classify("list vacancies", e))?;
    Ok(models.into_iter().map(Vacancy::from).collect())
}

pub async fn update_vacancy<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    update: VacancyUpdate,
) -> Result<Vacancy, DomainError> {
    let existing = vacancies::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| DomainError::classify("fetch vacancy", e))?
        .ok_or_else(|| DomainError::not_found(format!("vacancy {id} not found")))?;

    let mut active: vacancies::ActiveModel = existing.into();
    if let Some(title) = update.title {
        active.title = Set(title);
    }
    if let Some(description) = update.description {
        active.description = Set(description);
    }
    if let Some(salary) = update.salary {
        active.salary = Set(salary);
    }
    if let Some(is_open) = update.is_open {
        active.is_open = Set(is_open);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    let model = active
        .update(conn)
        .await
        .map_err(|e| DomainError::classify("update vacancy", e))?;
    Ok(Vacancy::from(model))
}

pub async fn delete_vacancy<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    let res = vacancies::Entity::delete_by_id(id)
        .exec(conn)
        .await
        .map_err(|e| DomainError::classify("delete vacancy", e))?;
    if res.rows_affected == 0 {
        return Err(DomainError::not_found(format!("vacancy {id} not found")));
    }
    Ok(())
}
