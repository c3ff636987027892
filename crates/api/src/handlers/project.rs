//! Handlers for the projects resource, addressed either through an owner
//! scope (`/user/{username}`, `/orgs/{org}`, `/repos/{owner}/{repo}`) or
//! directly by id (`/projects/{id}`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kanri_core::access::AccessLevel;
use kanri_core::board_layout::BoardLayout;
use kanri_core::error::CoreError;
use kanri_core::owner::Scope;
use kanri_core::types::DbId;
use kanri_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use kanri_db::repositories::ProjectRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{authorize, load_project, resolve_owner, validate_dto};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body for creating a project under an owner scope.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(custom(function = crate::validation::non_blank))]
    pub title: String,
    pub description: Option<String>,
    pub layout: Option<BoardLayout>,
}

/// Body for a partial project update. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(custom(function = crate::validation::non_blank))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_closed: Option<bool>,
}

/// Query string for project listings: `?state=open|closed|all`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub state: ProjectFilter,
}

// --- Scoped list ---

/// GET /api/v1/user/{username}/projects
pub async fn list_for_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Project>>> {
    list_scoped(state, user, Scope::user(&username)?, query.state).await
}

/// GET /api/v1/orgs/{org}/projects
pub async fn list_for_org(
    State(state): State<AppState>,
    user: AuthUser,
    Path(org): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Project>>> {
    list_scoped(state, user, Scope::organization(&org)?, query.state).await
}

/// GET /api/v1/repos/{owner}/{repo}/projects
pub async fn list_for_repo(
    State(state): State<AppState>,
    user: AuthUser,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Project>>> {
    list_scoped(state, user, Scope::repository(&owner, &repo)?, query.state).await
}

async fn list_scoped(
    state: AppState,
    user: AuthUser,
    scope: Scope,
    filter: ProjectFilter,
) -> AppResult<Json<Vec<Project>>> {
    let owner = resolve_owner(&state, &scope).await?;
    authorize(&state, &user, owner, AccessLevel::Read).await?;
    let projects = ProjectRepo::list(&state.pool, owner, filter).await?;
    Ok(Json(projects))
}

// --- Scoped create ---

/// POST /api/v1/user/{username}/projects
pub async fn create_for_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(username): Path<String>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    create_scoped(state, user, Scope::user(&username)?, input).await
}

/// POST /api/v1/orgs/{org}/projects
pub async fn create_for_org(
    State(state): State<AppState>,
    user: AuthUser,
    Path(org): Path<String>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    create_scoped(state, user, Scope::organization(&org)?, input).await
}

/// POST /api/v1/repos/{owner}/{repo}/projects
pub async fn create_for_repo(
    State(state): State<AppState>,
    user: AuthUser,
    Path((owner, repo)): Path<(String, String)>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    create_scoped(state, user, Scope::repository(&owner, &repo)?, input).await
}

async fn create_scoped(
    state: AppState,
    user: AuthUser,
    scope: Scope,
    input: CreateProjectRequest,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_dto(&input)?;
    let owner = resolve_owner(&state, &scope).await?;
    authorize(&state, &user, owner, AccessLevel::Write).await?;

    let create = CreateProject {
        title: input.title.trim().to_string(),
        description: input.description.unwrap_or_default(),
        layout: input.layout.unwrap_or_default(),
    };
    let project = ProjectRepo::create(&state.pool, owner, &create).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

// --- By id ---

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = load_project(&state, id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Read).await?;
    Ok(Json(project))
}

/// PATCH /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    validate_dto(&input)?;
    let project = load_project(&state, id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Write).await?;

    let patch = UpdateProject {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        is_closed: input.is_closed,
    };
    let updated = ProjectRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            key: id.to_string(),
        }))?;
    Ok(Json(updated))
}

/// DELETE /api/v1/projects/{id}
///
/// Requires admin over the owner context; cascades to all boards.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Admin).await?;

    let deleted = ProjectRepo::delete(&state.pool, id, state.detach_hook.as_ref()).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "project",
            key: id.to_string(),
        }))
    }
}
