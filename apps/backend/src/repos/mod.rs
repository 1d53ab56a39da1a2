//! Storage operations, one module per entity.
//!
//! Free functions generic over `ConnectionTrait` so they run against the
//! request transaction or a pooled connection alike. Every statement is
//! built through the query builder (parameterized, never interpolated).
//! Authorization is not decided here; callers enforced it already.

pub mod candidates;
pub mod employers;
pub mod responses;
pub mod statuses;
pub mod vacancies;

use std::str::FromStr;

use crate::domain::Role;
use crate::errors::DomainError;

/// Parse a role column value. A row with an unknown role is data
/// corruption, surfaced as an Unknown storage error.
pub(crate) fn parse_role(raw: &str) -> Result<Role, DomainError> {
    Role::from_str(raw).map_err(|e| DomainError::unknown("decode role column", e))
}
