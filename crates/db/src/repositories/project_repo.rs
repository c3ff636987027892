//! Repository for the `projects` table.

use kanri_core::owner::OwnerRef;
use kanri_core::types::DbId;
use sqlx::PgPool;

use crate::detach::DetachHook;
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, layout, is_closed, owner_kind, owner_id, \
                       created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project for a resolved owner, returning the created row.
    ///
    /// Template boards from the requested layout are created in the same
    /// transaction, the first one marked default, so `ListBoards` right
    /// after creation already sees exactly one default.
    pub async fn create(
        pool: &PgPool,
        owner: OwnerRef,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (title, description, layout, owner_kind, owner_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.layout.code())
            .bind(owner.kind.code())
            .bind(owner.id)
            .fetch_one(&mut *tx)
            .await?;

        for (position, title) in input.layout.template_titles().iter().enumerate() {
            sqlx::query(
                "INSERT INTO project_boards (project_id, title, sorting, is_default)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(project.id)
            .bind(title)
            .bind(position as i32)
            .bind(position == 0)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's projects, most recently created first, narrowed by
    /// open/closed status.
    pub async fn list(
        pool: &PgPool,
        owner: OwnerRef,
        filter: ProjectFilter,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let status_clause = match filter {
            ProjectFilter::Open => "AND is_closed = FALSE",
            ProjectFilter::Closed => "AND is_closed = TRUE",
            ProjectFilter::All => "",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE owner_kind = $1 AND owner_id = $2 {status_clause}
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner.kind.code())
            .bind(owner.id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied; the
    /// owner pair is immutable and never part of the statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                is_closed = COALESCE($4, is_closed),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_closed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and all of its boards as one transaction script,
    /// invoking the detach hook for the removed boards before they go.
    ///
    /// Returns `false` if no row with the given `id` exists.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        hook: &dyn DetachHook,
    ) -> Result<bool, sqlx::Error> {
        match Self::delete_inner(pool, id, hook).await {
            Err(err) if crate::is_serialization_failure(&err) => {
                Self::delete_inner(pool, id, hook).await
            }
            other => other,
        }
    }

    async fn delete_inner(
        pool: &PgPool,
        id: DbId,
        hook: &dyn DetachHook,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let board_ids =
            sqlx::query_scalar::<_, DbId>("SELECT id FROM project_boards WHERE project_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        hook.boards_removed(&mut *tx, &board_ids).await?;

        sqlx::query("DELETE FROM project_boards WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
