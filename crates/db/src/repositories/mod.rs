//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Compound writes (anything that
//! must keep the single-default-board invariant or rewrite sortings) run
//! inside one transaction and take a `FOR UPDATE` lock on the owning
//! project row, so concurrent writers to the same project serialize.

pub mod access_repo;
pub mod board_repo;
pub mod owner_repo;
pub mod project_repo;

pub use access_repo::AccessRepo;
pub use board_repo::BoardRepo;
pub use owner_repo::OwnerRepo;
pub use project_repo::ProjectRepo;
