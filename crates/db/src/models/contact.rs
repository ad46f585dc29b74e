//! Contact entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use crm_core::contact::{EmailEntry, PhoneEntry};
use crm_core::contact_import::ImportedContact;
use crm_core::types::{DbId, Timestamp};

use crate::models::company::{Company, CompanyFields};

/// A contact row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub avatar: Option<String>,
    pub background: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    /// Configuration id in the `network_university` category.
    pub university: DbId,
    pub major: Option<String>,
    pub notes: Option<String>,
    pub emails: Json<Vec<EmailEntry>>,
    pub phone_numbers: Json<Vec<PhoneEntry>>,
    pub is_alumni: bool,
    pub is_contest_winner: bool,
    pub company_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A contact with its company embedded, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ContactWithCompany {
    #[serde(flatten)]
    pub contact: Contact,
    pub company: Option<Company>,
}

/// Company reference inside a contact create/update body.
///
/// With an `id` it points at an existing company; without one the remaining
/// fields describe a company to create or patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyInput {
    pub id: Option<DbId>,
    #[serde(flatten)]
    pub fields: CompanyFields,
}

/// Request body for creating a contact.
///
/// Required fields are `Option` so that missing values surface as
/// validation errors with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub avatar: Option<String>,
    pub background: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub university: Option<DbId>,
    pub major: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneEntry>,
    pub is_alumni: Option<bool>,
    pub is_contest_winner: Option<bool>,
    pub company: Option<CompanyInput>,
}

/// Validated DTO for inserting a contact.
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub avatar: Option<String>,
    pub background: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub university: DbId,
    pub major: Option<String>,
    pub notes: Option<String>,
    pub emails: Vec<EmailEntry>,
    pub phone_numbers: Vec<PhoneEntry>,
    pub is_alumni: bool,
    pub is_contest_winner: bool,
    pub company_id: Option<DbId>,
}

impl CreateContact {
    /// Build an insert DTO from a planned import row.
    pub fn from_import(row: ImportedContact, company_id: DbId) -> Self {
        Self {
            avatar: None,
            background: None,
            first_name: row.first_name,
            last_name: row.last_name,
            title: row.title,
            university: row.university,
            major: row.major,
            notes: row.notes,
            emails: row.emails,
            phone_numbers: row.phone_numbers,
            is_alumni: row.is_alumni,
            is_contest_winner: row.is_contest_winner,
            company_id: Some(company_id),
        }
    }
}

/// Request body for updating a contact. All fields are optional.
///
/// `emails` and `phone_numbers` replace the stored lists when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    pub avatar: Option<String>,
    pub background: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub university: Option<DbId>,
    pub major: Option<String>,
    pub notes: Option<String>,
    pub emails: Option<Vec<EmailEntry>>,
    pub phone_numbers: Option<Vec<PhoneEntry>>,
    pub is_alumni: Option<bool>,
    pub is_contest_winner: Option<bool>,
    pub company: Option<CompanyInput>,
}
