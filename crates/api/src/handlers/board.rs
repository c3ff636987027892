//! Handlers for the boards resource under `/projects/{id}/boards`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kanri_core::access::AccessLevel;
use kanri_core::error::CoreError;
use kanri_core::types::DbId;
use kanri_db::models::board::{Board, CreateBoard, ReorderOutcome, UpdateBoard};
use kanri_db::repositories::BoardRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::{authorize, load_project, validate_dto};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Body for creating a board.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    #[validate(custom(function = crate::validation::non_blank))]
    pub title: String,
    pub color: Option<String>,
    /// Ignored for the project's first board, which is always default.
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

/// Body for a partial board update. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    #[validate(custom(function = crate::validation::non_blank))]
    pub title: Option<String>,
    pub color: Option<String>,
    pub sorting: Option<i32>,
    #[serde(rename = "default")]
    pub is_default: Option<bool>,
}

/// Body for the bulk reorder endpoint: the complete board id set in the
/// desired display order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub board_ids: Vec<DbId>,
}

fn board_not_found(key: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "board",
        key: key.to_string(),
    })
}

/// GET /api/v1/projects/{id}/boards
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Board>>> {
    let project = load_project(&state, project_id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Read).await?;
    let boards = BoardRepo::list(&state.pool, project_id).await?;
    Ok(Json(boards))
}

/// POST /api/v1/projects/{id}/boards
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateBoardRequest>,
) -> AppResult<(StatusCode, Json<Board>)> {
    validate_dto(&input)?;
    let project = load_project(&state, project_id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Write).await?;

    let create = CreateBoard {
        title: input.title.trim().to_string(),
        color: input.color.unwrap_or_default(),
        is_default: input.is_default,
    };
    let board = BoardRepo::create(&state.pool, project_id, &create)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "project",
            key: project_id.to_string(),
        }))?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// GET /api/v1/projects/{id}/boards/{board_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, board_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Board>> {
    let project = load_project(&state, project_id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Read).await?;

    let board = BoardRepo::find_by_id(&state.pool, project_id, board_id)
        .await?
        .ok_or_else(|| board_not_found(board_id))?;
    Ok(Json(board))
}

/// PATCH /api/v1/projects/{id}/boards/{board_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, board_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateBoardRequest>,
) -> AppResult<Json<Board>> {
    validate_dto(&input)?;
    let project = load_project(&state, project_id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Write).await?;

    let patch = UpdateBoard {
        title: input.title.map(|t| t.trim().to_string()),
        color: input.color,
        sorting: input.sorting,
        is_default: input.is_default,
    };
    let board = BoardRepo::update(&state.pool, project_id, board_id, &patch)
        .await?
        .ok_or_else(|| board_not_found(board_id))?;
    Ok(Json(board))
}

/// DELETE /api/v1/projects/{id}/boards/{board_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, board_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, project_id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Write).await?;

    let deleted =
        BoardRepo::delete(&state.pool, project_id, board_id, state.detach_hook.as_ref()).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(board_not_found(board_id))
    }
}

/// PUT /api/v1/projects/{id}/boards/order
///
/// Atomically rewrites the project's board order. The id set must exactly
/// match the project's boards.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, project_id).await?;
    authorize(&state, &user, project.owner()?, AccessLevel::Write).await?;

    match BoardRepo::reorder(&state.pool, project_id, &input.board_ids).await? {
        ReorderOutcome::Applied => Ok(StatusCode::NO_CONTENT),
        ReorderOutcome::ProjectMissing => Err(AppError::Core(CoreError::NotFound {
            entity: "project",
            key: project_id.to_string(),
        })),
        ReorderOutcome::BoardSetMismatch => Err(AppError::Core(CoreError::Validation(
            "board_ids must exactly match the project's current boards".to_string(),
        ))),
    }
}
