//! Domain model structs and DTOs.
//!
//! Row structs derive `FromRow` + `Serialize`; create DTOs are plain structs
//! built from validated input. Serialized field names are camelCase to match
//! the RPC client, whose TypeScript types are generated via `ts-rs`.

pub mod list;
pub mod user;
