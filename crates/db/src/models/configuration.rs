//! Configuration lookup entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crm_core::types::{DbId, Timestamp};

/// A row from the `configurations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Configuration {
    pub id: DbId,
    pub label: String,
    pub description: Option<String>,
    pub category: String,
    pub is_hidden: bool,
    pub is_disabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a configuration entry.
///
/// `category` is optional here so a missing value can be reported as a
/// validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateConfiguration {
    pub category: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub is_hidden: Option<bool>,
    pub is_disabled: Option<bool>,
}

/// DTO for updating a configuration entry. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConfiguration {
    pub label: Option<String>,
    pub description: Option<String>,
    pub is_hidden: Option<bool>,
    pub is_disabled: Option<bool>,
}

/// Filters for listing and searching configuration entries.
///
/// Hidden and disabled entries are excluded unless explicitly requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationFilter {
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub include_disabled: bool,
    pub category: Option<String>,
    /// Case-insensitive substring matched against label or description.
    pub query: Option<String>,
}
