use std::sync::Arc;

use kanri_db::detach::DetachHook;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kanri_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// External work-item detach hook, run inside deletion transactions.
    pub detach_hook: Arc<dyn DetachHook>,
}
