//! Board entity model and DTOs.

use kanri_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A board row from the `project_boards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Board {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    /// Opaque color token (typically `#rrggbb`); never parsed here.
    pub color: String,
    pub sorting: i32,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new board on a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoard {
    pub title: String,
    #[serde(default)]
    pub color: String,
    /// Ignored for the project's first board, which is always default.
    #[serde(default, rename = "default")]
    pub is_default: bool,
}

/// DTO for updating an existing board. All fields are optional; `None`
/// leaves the column untouched. `is_default: Some(true)` promotes the board
/// and demotes its siblings in the same transaction; `Some(false)` against
/// the current default is ignored (the invariant admits no zero-default
/// state while boards exist).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub color: Option<String>,
    pub sorting: Option<i32>,
    #[serde(rename = "default")]
    pub is_default: Option<bool>,
}

/// Result of a bulk reorder attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// All sortings were rewritten to match the requested order.
    Applied,
    /// The project does not exist.
    ProjectMissing,
    /// The requested id set does not exactly match the project's boards;
    /// nothing was changed.
    BoardSetMismatch,
}
