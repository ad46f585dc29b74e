//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches (all `Option` fields for patches)

pub mod company;
pub mod configuration;
pub mod contact;
pub mod user;
