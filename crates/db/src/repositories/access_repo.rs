//! Effective access-level lookup for the permission check.
//!
//! Read-only; the decision itself lives in `kanri_core::access::require`.

use kanri_core::access::AccessLevel;
use kanri_core::owner::{OwnerKind, OwnerRef};
use kanri_core::types::DbId;
use sqlx::PgPool;

/// Looks up what level a caller holds over an owner context.
pub struct AccessRepo;

impl AccessRepo {
    /// The caller's effective level on `owner`, or `None` when they hold
    /// nothing there.
    ///
    /// An individual user is implicitly admin over their own scope; every
    /// other (caller, owner) pair goes through the `access_grants` table.
    pub async fn effective_level(
        pool: &PgPool,
        user_id: DbId,
        owner: OwnerRef,
    ) -> Result<Option<AccessLevel>, sqlx::Error> {
        if owner.kind == OwnerKind::User && owner.id == user_id {
            return Ok(Some(AccessLevel::Admin));
        }

        let code = sqlx::query_scalar::<_, i16>(
            "SELECT level FROM access_grants
             WHERE user_id = $1 AND owner_kind = $2 AND owner_id = $3",
        )
        .bind(user_id)
        .bind(owner.kind.code())
        .bind(owner.id)
        .fetch_optional(pool)
        .await?;

        Ok(code.and_then(AccessLevel::from_code))
    }
}
