//! Project entity model and DTOs.

use kanri_core::board_layout::BoardLayout;
use kanri_core::error::CoreError;
use kanri_core::owner::{OwnerKind, OwnerRef};
use kanri_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Layout kind code; see [`BoardLayout::code`].
    pub layout: i16,
    pub is_closed: bool,
    #[serde(skip)]
    pub owner_kind: i16,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The owner context this project belongs to.
    ///
    /// `owner_kind` is only ever written from an [`OwnerRef`], so a code
    /// that no longer decodes means corrupt data and surfaces as an
    /// internal error rather than a misattributed owner.
    pub fn owner(&self) -> Result<OwnerRef, CoreError> {
        let kind = OwnerKind::from_code(self.owner_kind).ok_or_else(|| {
            CoreError::Internal(format!(
                "project {} has invalid owner_kind {}",
                self.id, self.owner_kind
            ))
        })?;
        Ok(OwnerRef {
            kind,
            id: self.owner_id,
        })
    }
}

/// DTO for creating a new project. The owner is passed separately as a
/// resolved [`OwnerRef`], never as raw request input.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layout: BoardLayout,
}

/// DTO for updating an existing project. All fields are optional; `None`
/// leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_closed: Option<bool>,
}

/// Status filter for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectFilter {
    #[default]
    Open,
    Closed,
    All,
}
