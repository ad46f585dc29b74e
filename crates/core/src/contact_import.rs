//! Bulk contact import planning.
//!
//! Turns parsed spreadsheet rows into a list of company + contact pairs ready
//! to insert. Category, industry, and university cells carry human-readable
//! labels; they are resolved against the configuration lookup table here.
//! Every row is checked before anything is written, so a bad row aborts the
//! whole import with a message naming its spreadsheet row.

use std::collections::HashMap;

use validator::Validate;

use crate::configuration::{
    normalize_label, CATEGORY_COMPANY_CATEGORY, CATEGORY_CONTACT_LABELS,
    CATEGORY_NETWORK_UNIVERSITY, CATEGORY_PRIMARY_INDUSTRY, DEFAULT_CONTACT_LABEL,
};
use crate::contact::{split_list, EmailEntry, PhoneEntry, DEFAULT_COUNTRY_CODE};
use crate::error::CoreError;
use crate::spreadsheet::SheetRow;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Column headers
// ---------------------------------------------------------------------------

pub const COL_FIRST_NAME: &str = "First Name";
pub const COL_LAST_NAME: &str = "Last Name";
pub const COL_TITLE: &str = "Title";
pub const COL_UNIVERSITY: &str = "University";
pub const COL_EMAILS: &str = "Emails";
pub const COL_PHONE_NUMBERS: &str = "Phone Numbers";
pub const COL_IS_ALUMNI: &str = "Is Alumni";
pub const COL_IS_CONTEST_WINNER: &str = "Is Contest Winner";
pub const COL_MAJOR: &str = "Major";
pub const COL_NOTES: &str = "Notes";
pub const COL_COMPANY_NAME: &str = "Company Name";
pub const COL_COMPANY_DESCRIPTION: &str = "Company Description";
pub const COL_COMPANY_WEBSITE: &str = "Company Website";
pub const COL_COMPANY_CATEGORY: &str = "Company Category";
pub const COL_COMPANY_PRIMARY_INDUSTRY: &str = "Company Primary Industry";
pub const COL_COMPANY_INTELLECTUAL_PROPERTY: &str = "Company Intellectual Property";
pub const COL_COMPANY_FUNDING_RECEIVED: &str = "Company Funding Received";
pub const COL_UPLOAD_STATUS: &str = "Upload Status";

/// Column order used by the contact export, which doubles as an import template.
pub const IMPORT_COLUMNS: &[&str] = &[
    COL_FIRST_NAME,
    COL_LAST_NAME,
    COL_TITLE,
    COL_UNIVERSITY,
    COL_EMAILS,
    COL_PHONE_NUMBERS,
    COL_IS_ALUMNI,
    COL_IS_CONTEST_WINNER,
    COL_MAJOR,
    COL_NOTES,
    COL_COMPANY_NAME,
    COL_COMPANY_DESCRIPTION,
    COL_COMPANY_WEBSITE,
    COL_COMPANY_CATEGORY,
    COL_COMPANY_PRIMARY_INDUSTRY,
    COL_COMPANY_INTELLECTUAL_PROPERTY,
    COL_COMPANY_FUNDING_RECEIVED,
    COL_UPLOAD_STATUS,
];

/// Contact columns that must be filled on every pending row.
const MANDATORY_CONTACT_COLUMNS: &[&str] = &[
    COL_FIRST_NAME,
    COL_LAST_NAME,
    COL_TITLE,
    COL_UNIVERSITY,
    COL_EMAILS,
    COL_PHONE_NUMBERS,
    COL_IS_ALUMNI,
    COL_IS_CONTEST_WINNER,
];

/// Rows whose `Upload Status` equals this were imported before and are skipped.
pub const UPLOAD_STATUS_COMPLETED: &str = "COMPLETED";

// ---------------------------------------------------------------------------
// Label lookup
// ---------------------------------------------------------------------------

/// In-memory index over configuration entries, built once per import.
#[derive(Debug, Default)]
pub struct LabelLookup {
    by_label: HashMap<(String, String), DbId>,
    by_id: HashMap<DbId, String>,
}

impl LabelLookup {
    /// Build from `(id, category, label)` triples.
    pub fn new<'a>(entries: impl IntoIterator<Item = (DbId, &'a str, &'a str)>) -> Self {
        let mut lookup = Self::default();
        for (id, category, label) in entries {
            lookup
                .by_label
                .entry((category.to_string(), normalize_label(label)))
                .or_insert(id);
            lookup.by_id.insert(id, label.to_string());
        }
        lookup
    }

    /// Resolve a label within a category. Matching ignores case and
    /// surrounding whitespace.
    pub fn resolve(&self, category: &str, label: &str) -> Option<DbId> {
        self.by_label
            .get(&(category.to_string(), normalize_label(label)))
            .copied()
    }

    /// The label of an entry, for rendering ids back to text.
    pub fn label_of(&self, id: DbId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// Company fields taken from one import row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedCompany {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub category: DbId,
    pub primary_industry: DbId,
    pub intellectual_property: Option<String>,
    pub funding_received: Option<f64>,
}

/// Contact fields taken from one import row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedContact {
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
}

/// A validated row, ready to be written as one company + contact pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub line: usize,
    pub company: ImportedCompany,
    pub contact: ImportedContact,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Validate and resolve every pending row.
///
/// Fails with [`CoreError::Import`] on the first bad row, or before looking at
/// any row when the default `Personal` contact label is not configured.
pub fn plan_import(rows: &[SheetRow], lookup: &LabelLookup) -> Result<Vec<ImportRow>, CoreError> {
    let default_label = lookup
        .resolve(CATEGORY_CONTACT_LABELS, DEFAULT_CONTACT_LABEL)
        .ok_or_else(|| {
            CoreError::Import(format!(
                "{DEFAULT_CONTACT_LABEL} label configuration not found."
            ))
        })?;

    let mut planned = Vec::new();
    for row in rows {
        if row.get(COL_UPLOAD_STATUS) == Some(UPLOAD_STATUS_COMPLETED) {
            continue;
        }
        planned.push(plan_row(row, lookup, default_label)?);
    }
    Ok(planned)
}

fn plan_row(row: &SheetRow, lookup: &LabelLookup, default_label: DbId) -> Result<ImportRow, CoreError> {
    let line = row.line;

    if MANDATORY_CONTACT_COLUMNS
        .iter()
        .any(|column| row.get(column).is_none())
    {
        return Err(CoreError::Import(format!(
            "Missing mandatory contact fields at row {line}"
        )));
    }
    let Some(company_name) = row.get(COL_COMPANY_NAME) else {
        return Err(CoreError::Import(format!(
            "Missing mandatory company fields at row {line}"
        )));
    };

    let emails: Vec<EmailEntry> = split_list(row.get(COL_EMAILS).unwrap_or_default())
        .into_iter()
        .map(|email| EmailEntry {
            label: default_label,
            email,
        })
        .collect();
    for entry in &emails {
        entry.validate().map_err(|_| {
            CoreError::Import(format!("Invalid email at row {line}: {}", entry.email))
        })?;
    }

    let phone_numbers: Vec<PhoneEntry> =
        split_list(row.get(COL_PHONE_NUMBERS).unwrap_or_default())
            .into_iter()
            .map(|phone_number| PhoneEntry {
                label: default_label,
                country_code: DEFAULT_COUNTRY_CODE.to_string(),
                phone_number,
            })
            .collect();

    let category = resolve_cell(
        row,
        lookup,
        COL_COMPANY_CATEGORY,
        CATEGORY_COMPANY_CATEGORY,
        "company category",
    )?;
    let primary_industry = resolve_cell(
        row,
        lookup,
        COL_COMPANY_PRIMARY_INDUSTRY,
        CATEGORY_PRIMARY_INDUSTRY,
        "primary industry",
    )?;
    let university = resolve_cell(
        row,
        lookup,
        COL_UNIVERSITY,
        CATEGORY_NETWORK_UNIVERSITY,
        "university",
    )?;

    let funding_received = match row.get(COL_COMPANY_FUNDING_RECEIVED) {
        Some(raw) => Some(parse_amount(raw).ok_or_else(|| {
            CoreError::Import(format!("Invalid funding amount at row {line}: {raw}"))
        })?),
        None => None,
    };

    Ok(ImportRow {
        line,
        company: ImportedCompany {
            name: company_name.to_string(),
            description: optional(row, COL_COMPANY_DESCRIPTION),
            website: optional(row, COL_COMPANY_WEBSITE),
            category,
            primary_industry,
            intellectual_property: optional(row, COL_COMPANY_INTELLECTUAL_PROPERTY),
            funding_received,
        },
        contact: ImportedContact {
            first_name: required(row, COL_FIRST_NAME),
            last_name: required(row, COL_LAST_NAME),
            title: required(row, COL_TITLE),
            university,
            major: optional(row, COL_MAJOR),
            notes: optional(row, COL_NOTES),
            emails,
            phone_numbers,
            is_alumni: parse_bool(row.get(COL_IS_ALUMNI)),
            is_contest_winner: parse_bool(row.get(COL_IS_CONTEST_WINNER)),
        },
    })
}

/// Resolve a label cell to a configuration id. A blank cell is invalid too.
fn resolve_cell(
    row: &SheetRow,
    lookup: &LabelLookup,
    column: &str,
    category: &str,
    what: &str,
) -> Result<DbId, CoreError> {
    let raw = row.get(column).unwrap_or_default();
    lookup.resolve(category, raw).ok_or_else(|| {
        CoreError::Import(format!("Invalid {what} at row {}: {raw}", row.line))
    })
}

fn required(row: &SheetRow, column: &str) -> String {
    row.get(column).unwrap_or_default().to_string()
}

fn optional(row: &SheetRow, column: &str) -> Option<String> {
    row.get(column).map(String::from)
}

/// Spreadsheet booleans: only `TRUE` (any case) counts as true.
pub fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Render a boolean the way [`parse_bool`] reads it back.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Parse a money cell, tolerating a leading `$` and thousands separators.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
