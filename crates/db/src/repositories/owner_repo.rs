//! Owner resolution: scope names to concrete owning entities.
//!
//! Pure lookups, no mutation. Creating users and repositories is outside
//! this service; rows are provisioned by the surrounding platform.

use kanri_core::owner::{OwnerRef, Scope};
use kanri_core::types::DbId;
use sqlx::PgPool;

use crate::models::owner::{USER_KIND_INDIVIDUAL, USER_KIND_ORGANIZATION};

/// Resolves API-level scopes to [`OwnerRef`]s.
pub struct OwnerRepo;

impl OwnerRepo {
    /// Resolve a scope to its owning entity. `None` when the named entity
    /// does not exist (an individual name does not match an organization
    /// row and vice versa).
    pub async fn resolve(pool: &PgPool, scope: &Scope) -> Result<Option<OwnerRef>, sqlx::Error> {
        match scope {
            Scope::User(name) => {
                let id = Self::user_id_by_name(pool, name, USER_KIND_INDIVIDUAL).await?;
                Ok(id.map(OwnerRef::user))
            }
            Scope::Organization(name) => {
                let id = Self::user_id_by_name(pool, name, USER_KIND_ORGANIZATION).await?;
                Ok(id.map(OwnerRef::organization))
            }
            Scope::Repository { owner, name } => {
                let id = sqlx::query_scalar::<_, DbId>(
                    "SELECT r.id FROM repositories r
                     JOIN users u ON u.id = r.owner_id
                     WHERE u.name = $1 AND r.name = $2",
                )
                .bind(owner)
                .bind(name)
                .fetch_optional(pool)
                .await?;
                Ok(id.map(OwnerRef::repository))
            }
        }
    }

    async fn user_id_by_name(
        pool: &PgPool,
        name: &str,
        kind: i16,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE name = $1 AND kind = $2")
            .bind(name)
            .bind(kind)
            .fetch_optional(pool)
            .await
    }
}
