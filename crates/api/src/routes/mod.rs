pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/{username}/projects                 list, create (user scope)
/// /orgs/{org}/projects                      list, create (organization scope)
/// /repos/{owner}/{repo}/projects            list, create (repository scope)
///
/// /projects/{id}                            get, update, delete
/// /projects/{id}/boards                     list, create
/// /projects/{id}/boards/order               bulk reorder (PUT)
/// /projects/{id}/boards/{board_id}          get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(project::router())
}
