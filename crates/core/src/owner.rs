//! Owner contexts for projects.
//!
//! A project belongs to exactly one of: an individual user, an organization,
//! or a repository. The pair is modelled as a tagged reference rather than a
//! hierarchy so downstream code matches on the kind exhaustively.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// The kind half of an [`OwnerRef`]. Stored as SMALLINT in `projects.owner_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    User,
    Organization,
    Repository,
}

impl OwnerKind {
    /// Database code for this kind.
    pub fn code(self) -> i16 {
        match self {
            OwnerKind::User => 0,
            OwnerKind::Organization => 1,
            OwnerKind::Repository => 2,
        }
    }

    /// Inverse of [`OwnerKind::code`]. `None` for unknown codes.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(OwnerKind::User),
            1 => Some(OwnerKind::Organization),
            2 => Some(OwnerKind::Repository),
            _ => None,
        }
    }
}

/// A resolved owning entity: the kind plus the row id it points at.
///
/// For `User` and `Organization` the id references `users`; for `Repository`
/// it references `repositories`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OwnerRef {
    pub kind: OwnerKind,
    pub id: DbId,
}

impl OwnerRef {
    pub fn user(id: DbId) -> Self {
        OwnerRef {
            kind: OwnerKind::User,
            id,
        }
    }

    pub fn organization(id: DbId) -> Self {
        OwnerRef {
            kind: OwnerKind::Organization,
            id,
        }
    }

    pub fn repository(id: DbId) -> Self {
        OwnerRef {
            kind: OwnerKind::Repository,
            id,
        }
    }
}

/// The API-level address of an owner, before resolution: names rather than ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    User(String),
    Organization(String),
    Repository { owner: String, name: String },
}

impl Scope {
    pub fn user(name: &str) -> Result<Self, CoreError> {
        let name = non_blank(name, "user name")?;
        Ok(Scope::User(name))
    }

    pub fn organization(name: &str) -> Result<Self, CoreError> {
        let name = non_blank(name, "organization name")?;
        Ok(Scope::Organization(name))
    }

    /// A repository scope is a (owner name, repo name) pair; either half
    /// being blank makes the whole identifier malformed.
    pub fn repository(owner: &str, name: &str) -> Result<Self, CoreError> {
        let owner = non_blank(owner, "repository owner")?;
        let name = non_blank(name, "repository name")?;
        Ok(Scope::Repository { owner, name })
    }

    /// The kind this scope resolves to.
    pub fn kind(&self) -> OwnerKind {
        match self {
            Scope::User(_) => OwnerKind::User,
            Scope::Organization(_) => OwnerKind::Organization,
            Scope::Repository { .. } => OwnerKind::Repository,
        }
    }
}

fn non_blank(value: &str, what: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be blank")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip() {
        for kind in [OwnerKind::User, OwnerKind::Organization, OwnerKind::Repository] {
            assert_eq!(OwnerKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(OwnerKind::from_code(7), None);
    }

    #[test]
    fn repository_scope_rejects_blank_halves() {
        assert!(Scope::repository("alice", "widgets").is_ok());
        assert!(Scope::repository("", "widgets").is_err());
        assert!(Scope::repository("alice", "  ").is_err());
    }

    #[test]
    fn scope_names_are_trimmed() {
        let scope = Scope::user("  alice ").unwrap();
        assert_eq!(scope, Scope::User("alice".to_string()));
    }
}
