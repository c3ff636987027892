//! Persistence layer: connection pool helpers, sqlx models, and
//! repositories for the project/board domain.

pub mod detach;
pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared alias so callers don't spell out the sqlx pool type.
pub type DbPool = PgPool;

/// Create a connection pool against the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Cheap liveness probe: runs `SELECT 1` against the pool.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Whether an error is a transient serialization failure (SQLSTATE 40001).
///
/// Compound writes retry once on these before surfacing the error, so a
/// caller-visible failure means two attempts both lost.
pub fn is_serialization_failure(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("40001"),
        _ => false,
    }
}
