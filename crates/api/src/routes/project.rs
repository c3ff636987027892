//! Route definitions for projects and their boards.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{board, project};
use crate::state::AppState;

/// Project and board routes.
///
/// ```text
/// GET    /user/{username}/projects          -> list_for_user
/// POST   /user/{username}/projects          -> create_for_user
/// GET    /orgs/{org}/projects               -> list_for_org
/// POST   /orgs/{org}/projects               -> create_for_org
/// GET    /repos/{owner}/{repo}/projects     -> list_for_repo
/// POST   /repos/{owner}/{repo}/projects     -> create_for_repo
///
/// GET    /projects/{id}                     -> get_by_id
/// PATCH  /projects/{id}                     -> update
/// DELETE /projects/{id}                     -> delete
///
/// GET    /projects/{id}/boards              -> board::list
/// POST   /projects/{id}/boards              -> board::create
/// PUT    /projects/{id}/boards/order        -> board::reorder
/// GET    /projects/{id}/boards/{board_id}   -> board::get_by_id
/// PATCH  /projects/{id}/boards/{board_id}   -> board::update
/// DELETE /projects/{id}/boards/{board_id}   -> board::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/user/{username}/projects",
            get(project::list_for_user).post(project::create_for_user),
        )
        .route(
            "/orgs/{org}/projects",
            get(project::list_for_org).post(project::create_for_org),
        )
        .route(
            "/repos/{owner}/{repo}/projects",
            get(project::list_for_repo).post(project::create_for_repo),
        )
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route(
            "/projects/{id}/boards",
            get(board::list).post(board::create),
        )
        .route("/projects/{id}/boards/order", put(board::reorder))
        .route(
            "/projects/{id}/boards/{board_id}",
            get(board::get_by_id)
                .patch(board::update)
                .delete(board::delete),
        )
}
