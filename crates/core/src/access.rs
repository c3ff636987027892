//! Access-level ordering and the permission decision used by every handler.
//!
//! The lookup half (what level a caller holds on an owner) lives in the db
//! crate; this module only decides whether a held level clears the bar.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Permission tiers over an owner context. Derived `Ord` gives
/// `Read < Write < Admin`, which the checks below rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Read,
    Write,
    Admin,
}

impl AccessLevel {
    /// Database code, as stored in `access_grants.level`.
    pub fn code(self) -> i16 {
        match self {
            AccessLevel::Read => 1,
            AccessLevel::Write => 2,
            AccessLevel::Admin => 3,
        }
    }

    /// Inverse of [`AccessLevel::code`]. `None` for unknown codes.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(AccessLevel::Read),
            2 => Some(AccessLevel::Write),
            3 => Some(AccessLevel::Admin),
            _ => None,
        }
    }
}

/// Require that `effective` (the caller's level on the owner, `None` when
/// the caller holds nothing) is at least `required`.
///
/// Side-effect free; callers run this before touching the store so a failed
/// check never leaves partial state behind.
pub fn require(effective: Option<AccessLevel>, required: AccessLevel) -> Result<(), CoreError> {
    match effective {
        Some(level) if level >= required => Ok(()),
        _ => Err(CoreError::Forbidden(format!(
            "requires {required:?} access"
        ))),
    }
}
