//! Row structs and DTOs for the repository layer.

pub mod board;
pub mod owner;
pub mod project;
