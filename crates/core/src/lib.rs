//! Domain logic for the CRM backend.
//!
//! Everything here is free of database and HTTP dependencies so it can be
//! unit tested in isolation and shared by the storage and API layers.

pub mod configuration;
pub mod contact;
pub mod contact_import;
pub mod error;
pub mod metadata;
pub mod spreadsheet;
pub mod text;
pub mod types;
