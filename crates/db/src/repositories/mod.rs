//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod list_repo;
pub mod user_repo;

pub use list_repo::{DeleteOutcome, ListRepo};
pub use user_repo::UserRepo;
