//! Repository for the `project_boards` table.
//!
//! Every write that could disturb the single-default invariant or the
//! sorting order runs as one transaction holding a `FOR UPDATE` lock on the
//! owning project row. Readers therefore never observe zero or two default
//! boards, nor a half-applied reorder. Each compound write retries once on
//! a transient serialization failure before surfacing the error.

use kanri_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::detach::DetachHook;
use crate::models::board::{Board, CreateBoard, ReorderOutcome, UpdateBoard};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, color, sorting, is_default, created_at, updated_at";

/// Provides CRUD, default handling, and ordering for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a new board at the end of the project's order.
    ///
    /// The project's first board becomes default regardless of the
    /// requested flag; a later board created with `is_default` demotes the
    /// previous default in the same transaction.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        match Self::create_inner(pool, project_id, input).await {
            Err(err) if crate::is_serialization_failure(&err) => {
                Self::create_inner(pool, project_id, input).await
            }
            other => other,
        }
    }

    async fn create_inner(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_project(&mut tx, project_id).await? {
            return Ok(None);
        }

        let (count, max_sorting) = sqlx::query_as::<_, (i64, Option<i32>)>(
            "SELECT COUNT(*), MAX(sorting) FROM project_boards WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await?;

        let sorting = max_sorting.map_or(0, |max| max + 1);
        let is_default = count == 0 || input.is_default;

        if is_default && count > 0 {
            Self::clear_default(&mut tx, project_id).await?;
        }

        let query = format!(
            "INSERT INTO project_boards (project_id, title, color, sorting, is_default)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.color)
            .bind(sorting)
            .bind(is_default)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(board))
    }

    /// Find a board by ID within a project. Boards are never returned
    /// across project boundaries: a valid board ID under the wrong project
    /// is `None`.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        board_id: DbId,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_boards WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Board>(&query)
            .bind(board_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's boards ascending by sorting, ties broken by
    /// creation order (id).
    pub async fn list(pool: &PgPool, project_id: DbId) -> Result<Vec<Board>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_boards WHERE project_id = $1
             ORDER BY sorting ASC, id ASC"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a board. Only non-`None` fields in `input` are applied.
    ///
    /// Promoting to default demotes the previous default atomically.
    /// Requesting `is_default = false` is a no-op: the flag only moves by
    /// promoting another board or deleting this one. Moving to an occupied
    /// sorting swaps positions with the occupant, touching nothing else.
    ///
    /// Returns `None` for an unknown project/board pair.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        board_id: DbId,
        input: &UpdateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        match Self::update_inner(pool, project_id, board_id, input).await {
            Err(err) if crate::is_serialization_failure(&err) => {
                Self::update_inner(pool, project_id, board_id, input).await
            }
            other => other,
        }
    }

    async fn update_inner(
        pool: &PgPool,
        project_id: DbId,
        board_id: DbId,
        input: &UpdateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_project(&mut tx, project_id).await? {
            return Ok(None);
        }

        let query = format!("SELECT {COLUMNS} FROM project_boards WHERE id = $1 AND project_id = $2");
        let Some(current) = sqlx::query_as::<_, Board>(&query)
            .bind(board_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(new_sorting) = input.sorting {
            if new_sorting != current.sorting {
                // Keep sortings unique: the occupant of the target position
                // (if any) takes over this board's old position.
                sqlx::query(
                    "UPDATE project_boards SET sorting = $1, updated_at = NOW()
                     WHERE project_id = $2 AND sorting = $3 AND id <> $4",
                )
                .bind(current.sorting)
                .bind(project_id)
                .bind(new_sorting)
                .bind(board_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let promote = input.is_default == Some(true) && !current.is_default;
        if promote {
            Self::clear_default(&mut tx, project_id).await?;
        }

        let query = format!(
            "UPDATE project_boards SET
                title = COALESCE($3, title),
                color = COALESCE($4, color),
                sorting = COALESCE($5, sorting),
                is_default = is_default OR $6,
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(board_id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.color)
            .bind(input.sorting)
            .bind(promote)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(board))
    }

    /// Delete a board. If it held the default flag, the remaining board
    /// with the smallest sorting is promoted in the same transaction; a
    /// project left with zero boards has no default.
    ///
    /// Returns `false` for an unknown project/board pair.
    pub async fn delete(
        pool: &PgPool,
        project_id: DbId,
        board_id: DbId,
        hook: &dyn DetachHook,
    ) -> Result<bool, sqlx::Error> {
        match Self::delete_inner(pool, project_id, board_id, hook).await {
            Err(err) if crate::is_serialization_failure(&err) => {
                Self::delete_inner(pool, project_id, board_id, hook).await
            }
            other => other,
        }
    }

    async fn delete_inner(
        pool: &PgPool,
        project_id: DbId,
        board_id: DbId,
        hook: &dyn DetachHook,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_project(&mut tx, project_id).await? {
            return Ok(false);
        }

        let removed = sqlx::query_as::<_, (DbId, bool)>(
            "DELETE FROM project_boards WHERE id = $1 AND project_id = $2
             RETURNING id, is_default",
        )
        .bind(board_id)
        .bind(project_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((removed_id, was_default)) = removed else {
            return Ok(false);
        };

        hook.boards_removed(&mut *tx, &[removed_id]).await?;

        if was_default {
            sqlx::query(
                "UPDATE project_boards SET is_default = TRUE, updated_at = NOW()
                 WHERE id = (
                     SELECT id FROM project_boards WHERE project_id = $1
                     ORDER BY sorting ASC, id ASC LIMIT 1
                 )",
            )
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Atomically rewrite all sortings to match `ordered_ids`.
    ///
    /// The id set must exactly match the project's current boards — no
    /// partial reorders, no foreign ids, no duplicates. On mismatch nothing
    /// changes and the outcome reports it.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<ReorderOutcome, sqlx::Error> {
        match Self::reorder_inner(pool, project_id, ordered_ids).await {
            Err(err) if crate::is_serialization_failure(&err) => {
                Self::reorder_inner(pool, project_id, ordered_ids).await
            }
            other => other,
        }
    }

    async fn reorder_inner(
        pool: &PgPool,
        project_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<ReorderOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_project(&mut tx, project_id).await? {
            return Ok(ReorderOutcome::ProjectMissing);
        }

        let current_ids =
            sqlx::query_scalar::<_, DbId>("SELECT id FROM project_boards WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(&mut *tx)
                .await?;

        let mut requested = ordered_ids.to_vec();
        requested.sort_unstable();
        requested.dedup();
        let mut existing = current_ids;
        existing.sort_unstable();

        if requested.len() != ordered_ids.len() || requested != existing {
            // Dropping the transaction rolls back; current order stands.
            return Ok(ReorderOutcome::BoardSetMismatch);
        }

        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE project_boards SET sorting = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(position as i32)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(ReorderOutcome::Applied)
    }

    /// Drop the default flag from whichever board currently holds it.
    async fn clear_default(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE project_boards SET is_default = FALSE, updated_at = NOW()
             WHERE project_id = $1 AND is_default",
        )
        .bind(project_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Take the per-project write lock. `false` when the project is gone.
    async fn lock_project(
        tx: &mut Transaction<'_, Postgres>,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let locked =
            sqlx::query_scalar::<_, DbId>("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut **tx)
                .await?;
        Ok(locked.is_some())
    }
}
