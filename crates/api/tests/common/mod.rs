//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! and drives it with `tower::ServiceExt::oneshot`, no TCP listener needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use kanri_api::auth::jwt::{generate_access_token, JwtConfig};
use kanri_api::config::ServerConfig;
use kanri_api::router::build_app_router;
use kanri_api::state::AppState;
use kanri_core::access::AccessLevel;
use kanri_core::owner::OwnerRef;
use kanri_core::types::DbId;
use kanri_db::detach::NoopDetach;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        detach_hook: Arc::new(NoopDetach),
    };
    build_app_router(state, &config)
}

/// Mint a Bearer token for the given user id, signed with the test secret.
pub fn auth_token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, "GET", uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, "POST", uri, token, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, "PATCH", uri, token, Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, "PUT", uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response {
    send(app, "DELETE", uri, token, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user row (`kind` 0 = individual, 1 = organization).
pub async fn seed_user(pool: &PgPool, name: &str, kind: i16) -> DbId {
    sqlx::query_scalar("INSERT INTO users (name, kind) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(kind)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Insert a repository row under the given owner.
pub async fn seed_repo(pool: &PgPool, owner_id: DbId, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO repositories (owner_id, name) VALUES ($1, $2) RETURNING id")
        .bind(owner_id)
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Grant `user_id` an access level over an owner context.
pub async fn grant(pool: &PgPool, user_id: DbId, owner: OwnerRef, level: AccessLevel) {
    sqlx::query(
        "INSERT INTO access_grants (user_id, owner_kind, owner_id, level) VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(owner.kind.code())
    .bind(owner.id)
    .bind(level.code())
    .execute(pool)
    .await
    .unwrap();
}
