//! Request handlers: the boundary between HTTP and the stores.
//!
//! Every handler follows the same shape: authenticate (extractor), validate
//! the payload, resolve the owner scope, check access, then call the store.
//! Authorization always runs before any mutation, so a rejected caller
//! never leaves partial state behind.

pub mod board;
pub mod project;

use kanri_core::access::{self, AccessLevel};
use kanri_core::error::CoreError;
use kanri_core::owner::{OwnerRef, Scope};
use kanri_core::types::DbId;
use kanri_db::models::project::Project;
use kanri_db::repositories::{AccessRepo, OwnerRepo, ProjectRepo};
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Run derive-based validation on a request DTO, mapping failures onto the
/// domain's validation error.
pub(crate) fn validate_dto(dto: &impl Validate) -> Result<(), AppError> {
    dto.validate()
        .map_err(|errors| AppError::Core(CoreError::Validation(errors.to_string())))
}

/// Resolve a scope to its owner, mapping an unknown name to 404.
pub(crate) async fn resolve_owner(state: &AppState, scope: &Scope) -> Result<OwnerRef, AppError> {
    let owner = OwnerRepo::resolve(&state.pool, scope).await?;
    owner.ok_or_else(|| {
        let (entity, key) = match scope {
            Scope::User(name) => ("user", name.clone()),
            Scope::Organization(name) => ("organization", name.clone()),
            Scope::Repository { owner, name } => ("repository", format!("{owner}/{name}")),
        };
        AppError::Core(CoreError::NotFound { entity, key })
    })
}

/// Check that the caller holds at least `required` on `owner`.
pub(crate) async fn authorize(
    state: &AppState,
    user: &AuthUser,
    owner: OwnerRef,
    required: AccessLevel,
) -> Result<(), AppError> {
    let effective = AccessRepo::effective_level(&state.pool, user.user_id, owner).await?;
    access::require(effective, required)?;
    Ok(())
}

/// Load a project by id, mapping absence to 404.
pub(crate) async fn load_project(state: &AppState, id: DbId) -> Result<Project, AppError> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "project",
                key: id.to_string(),
            })
        })
}
