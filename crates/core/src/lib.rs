//! Pure domain types and rules for the kanri project/board service.
//!
//! No I/O lives here: the `db` crate persists these types and the `api`
//! crate exposes them over HTTP.

pub mod access;
pub mod board_layout;
pub mod error;
pub mod owner;
pub mod types;
