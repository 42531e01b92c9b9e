//! Rankly domain logic.
//!
//! Everything here is pure: no database access and no HTTP. The `db` and
//! `api` crates build on these types and rules.

pub mod draft;
pub mod error;
pub mod lists;
pub mod pagination;
pub mod types;
pub mod visibility;
