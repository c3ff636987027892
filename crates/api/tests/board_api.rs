mod common;

use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;

use common::{
    auth_token, body_json, build_test_app, delete, get, patch_json, post_json, put_json, seed_user,
};

const INDIVIDUAL: i16 = 0;

/// Create a project under alice's scope and return its id.
async fn create_project(app: &Router, token: &str, body: Value) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/user/alice/projects",
        Some(token),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn list_boards(app: &Router, token: &str, project_id: i64) -> Vec<Value> {
    let response = get(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/boards"),
        Some(token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await.as_array().unwrap().clone()
}

fn default_titles(boards: &[Value]) -> Vec<&str> {
    boards
        .iter()
        .filter(|b| b["default"] == true)
        .map(|b| b["title"].as_str().unwrap())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_layout_seeds_boards(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);

    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Kanban", "layout": { "kind": "basic_kanban" } }),
    )
    .await;

    let boards = list_boards(&app, &token, project_id).await;
    let titles: Vec<_> = boards.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["To Do", "In Progress", "Done"]);
    let sortings: Vec<_> = boards.iter().map(|b| b["sorting"].as_i64().unwrap()).collect();
    assert_eq!(sortings, [0, 1, 2]);
    assert_eq!(default_titles(&boards), ["To Do"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_board_becomes_default(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(&app, &token, json!({ "title": "Empty" })).await;
    let uri = format!("/api/v1/projects/{project_id}/boards");

    let response = post_json(
        app.clone(),
        &uri,
        Some(&token),
        json!({ "title": "Test Board", "color": "#000000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let board = body_json(response).await;
    assert_eq!(board["title"], "Test Board");
    assert_eq!(board["color"], "#000000");
    assert_eq!(board["sorting"], 0);
    // First board is always the default even when not requested.
    assert_eq!(board["default"], true);

    let response = post_json(
        app.clone(),
        &uri,
        Some(&token),
        json!({ "title": "Second" }),
    )
    .await;
    let second = body_json(response).await;
    assert_eq!(second["default"], false);
    assert_eq!(second["sorting"], 1);

    assert_eq!(
        default_titles(&list_boards(&app, &token, project_id).await),
        ["Test Board"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creating_a_default_board_demotes_the_previous(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Kanban", "layout": { "kind": "basic_kanban" } }),
    )
    .await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/boards"),
        Some(&token),
        json!({ "title": "Inbox", "default": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(
        default_titles(&list_boards(&app, &token, project_id).await),
        ["Inbox"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn board_lookups_are_scoped_to_their_project(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let first = create_project(&app, &token, json!({ "title": "First" })).await;
    let second = create_project(&app, &token, json!({ "title": "Second" })).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{first}/boards"),
        Some(&token),
        json!({ "title": "Only here" }),
    )
    .await;
    let board_id = body_json(response).await["id"].as_i64().unwrap();

    let response = get(
        app.clone(),
        &format!("/api/v1/projects/{first}/boards/{board_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The same board id through the wrong project is a 404, not a leak.
    let response = get(
        app,
        &format!("/api/v1/projects/{second}/boards/{board_id}"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn patch_updates_title_and_color_only(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Kanban", "layout": { "kind": "basic_kanban" } }),
    )
    .await;
    let boards = list_boards(&app, &token, project_id).await;
    let in_progress = boards[1]["id"].as_i64().unwrap();

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/boards/{in_progress}"),
        Some(&token),
        json!({ "title": "Doing", "color": "#ff0000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let board = body_json(response).await;
    assert_eq!(board["title"], "Doing");
    assert_eq!(board["color"], "#ff0000");
    assert_eq!(board["sorting"], 1);
    assert_eq!(board["default"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn promoting_a_board_keeps_a_single_default(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Triage", "layout": { "kind": "bug_triage" } }),
    )
    .await;
    let boards = list_boards(&app, &token, project_id).await;
    assert_eq!(boards.len(), 4);
    let closed = boards[3]["id"].as_i64().unwrap();

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/boards/{closed}"),
        Some(&token),
        json!({ "default": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["default"], true);

    assert_eq!(
        default_titles(&list_boards(&app, &token, project_id).await),
        ["Closed"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_the_default_promotes_a_successor(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Kanban", "layout": { "kind": "basic_kanban" } }),
    )
    .await;
    let boards = list_boards(&app, &token, project_id).await;
    let todo = boards[0]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/projects/{project_id}/boards/{todo}");

    let response = delete(app.clone(), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Lowest remaining sorting takes over the default slot.
    assert_eq!(
        default_titles(&list_boards(&app, &token, project_id).await),
        ["In Progress"]
    );

    // Deleting an already-deleted board is a 404.
    let response = delete(app.clone(), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app, &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_rewrites_the_display_order(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Kanban", "layout": { "kind": "basic_kanban" } }),
    )
    .await;
    let boards = list_boards(&app, &token, project_id).await;
    let mut ids: Vec<i64> = boards.iter().map(|b| b["id"].as_i64().unwrap()).collect();
    ids.reverse();

    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/boards/order"),
        Some(&token),
        json!({ "board_ids": ids }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let boards = list_boards(&app, &token, project_id).await;
    let titles: Vec<_> = boards.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Done", "In Progress", "To Do"]);
    let sortings: Vec<_> = boards.iter().map(|b| b["sorting"].as_i64().unwrap()).collect();
    assert_eq!(sortings, [0, 1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_rejects_a_mismatched_id_set(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(
        &app,
        &token,
        json!({ "title": "Kanban", "layout": { "kind": "basic_kanban" } }),
    )
    .await;
    let boards = list_boards(&app, &token, project_id).await;
    let ids: Vec<i64> = boards
        .iter()
        .take(2)
        .map(|b| b["id"].as_i64().unwrap())
        .collect();

    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/boards/order"),
        Some(&token),
        json!({ "board_ids": ids }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Order is untouched after the rejection.
    let boards = list_boards(&app, &token, project_id).await;
    let titles: Vec<_> = boards.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["To Do", "In Progress", "Done"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_board_title_is_rejected(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let token = auth_token(alice);
    let project_id = create_project(&app, &token, json!({ "title": "Empty" })).await;

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/boards"),
        Some(&token),
        json!({ "title": " " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn boards_of_a_foreign_project_are_forbidden(pool: PgPool) {
    let alice = seed_user(&pool, "alice", INDIVIDUAL).await;
    let mallory = seed_user(&pool, "mallory", INDIVIDUAL).await;
    let app = build_test_app(pool);
    let project_id = create_project(&app, &auth_token(alice), json!({ "title": "Private" })).await;

    let response = get(
        app,
        &format!("/api/v1/projects/{project_id}/boards"),
        Some(&auth_token(mallory)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
