//! Board layout templates applied when a project is created.

use serde::{Deserialize, Serialize};

/// The layout a project starts with. Predefined templates seed a fixed set
/// of boards; `Custom` takes caller-provided column titles. The kind (not
/// the custom titles) is persisted as SMALLINT in `projects.layout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardLayout {
    /// No boards are created; the project starts empty.
    None,
    /// "To Do" / "In Progress" / "Done".
    BasicKanban,
    /// "Needs Triage" / "High Priority" / "Low Priority" / "Closed".
    BugTriage,
    /// Caller-provided column titles, created in the given order.
    Custom { titles: Vec<String> },
}

impl Default for BoardLayout {
    fn default() -> Self {
        BoardLayout::None
    }
}

impl BoardLayout {
    /// Database code for the layout kind.
    pub fn code(&self) -> i16 {
        match self {
            BoardLayout::None => 0,
            BoardLayout::BasicKanban => 1,
            BoardLayout::BugTriage => 2,
            BoardLayout::Custom { .. } => 3,
        }
    }

    /// The board titles this layout seeds, in creation order. The first one
    /// becomes the project's default board.
    pub fn template_titles(&self) -> Vec<&str> {
        match self {
            BoardLayout::None => Vec::new(),
            BoardLayout::BasicKanban => vec!["To Do", "In Progress", "Done"],
            BoardLayout::BugTriage => {
                vec!["Needs Triage", "High Priority", "Low Priority", "Closed"]
            }
            BoardLayout::Custom { titles } => {
                titles.iter().map(String::as_str).collect()
            }
        }
    }
}
