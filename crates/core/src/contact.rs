//! Structured email and phone containers for contacts, plus the field
//! validation shared by the create/update handlers and the bulk importer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Country code assigned to phone numbers that arrive without one.
pub const DEFAULT_COUNTRY_CODE: &str = "us";

/// A labeled email address attached to a contact.
///
/// `label` is the id of a `contact_labels` configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailEntry {
    pub label: DbId,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
}

/// A labeled phone number attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PhoneEntry {
    pub label: DbId,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub country_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub phone_number: String,
}

/// Ensure at least one email is present and every entry is well-formed.
pub fn validate_emails(emails: &[EmailEntry]) -> Result<(), CoreError> {
    if emails.is_empty() {
        return Err(CoreError::Validation(
            "At least one email is required".into(),
        ));
    }
    for (i, entry) in emails.iter().enumerate() {
        entry.validate().map_err(|e| {
            CoreError::Validation(format!("Invalid email at position {}: {e}", i + 1))
        })?;
    }
    Ok(())
}

/// Ensure at least one phone number is present and every entry is well-formed.
pub fn validate_phone_numbers(phone_numbers: &[PhoneEntry]) -> Result<(), CoreError> {
    if phone_numbers.is_empty() {
        return Err(CoreError::Validation(
            "At least one phone number is required".into(),
        ));
    }
    for (i, entry) in phone_numbers.iter().enumerate() {
        entry.validate().map_err(|e| {
            CoreError::Validation(format!("Invalid phone number at position {}: {e}", i + 1))
        })?;
    }
    Ok(())
}

/// Split a comma-separated cell into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
