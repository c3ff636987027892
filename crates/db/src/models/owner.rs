//! Thin rows backing owner resolution.

use kanri_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `users`: an individual (`kind = 0`) or organization (`kind = 1`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub kind: i16,
    pub created_at: Timestamp,
}

/// User kind code for individuals.
pub const USER_KIND_INDIVIDUAL: i16 = 0;
/// User kind code for organizations.
pub const USER_KIND_ORGANIZATION: i16 = 1;

/// A row from `repositories`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Repository {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}
