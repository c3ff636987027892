//! Seam for external cascade side effects on board deletion.
//!
//! Work items referencing a deleted board live outside this service. The
//! repositories call the hook inside the deletion transaction so the detach
//! commits or rolls back together with the delete itself.

use async_trait::async_trait;
use kanri_core::types::DbId;
use sqlx::PgConnection;

/// Invoked synchronously inside every transaction that removes boards.
#[async_trait]
pub trait DetachHook: Send + Sync {
    /// `board_ids` lists every board the surrounding transaction deletes.
    /// Returning an error rolls the whole deletion back.
    async fn boards_removed(
        &self,
        conn: &mut PgConnection,
        board_ids: &[DbId],
    ) -> Result<(), sqlx::Error>;
}

/// Default hook for deployments with no linked work-item store.
pub struct NoopDetach;

#[async_trait]
impl DetachHook for NoopDetach {
    async fn boards_removed(
        &self,
        _conn: &mut PgConnection,
        board_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if !board_ids.is_empty() {
            tracing::debug!(count = board_ids.len(), "no detach hook configured");
        }
        Ok(())
    }
}
