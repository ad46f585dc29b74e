//! Configuration lookup constants and helpers.
//!
//! Configuration entries are generic labeled lookup values grouped by
//! category. Companies and contacts reference them by id for their category,
//! industry, university, and email/phone label fields.

// ---------------------------------------------------------------------------
// Category keys
// ---------------------------------------------------------------------------

/// Labels attached to contact emails and phone numbers ("Personal", "Work").
pub const CATEGORY_CONTACT_LABELS: &str = "contact_labels";

/// Company category (e.g. "Startup", "Faculty Spinout").
pub const CATEGORY_COMPANY_CATEGORY: &str = "company_category";

/// Primary industry of a company.
pub const CATEGORY_PRIMARY_INDUSTRY: &str = "primary_industry";

/// Universities in the network a contact can belong to.
pub const CATEGORY_NETWORK_UNIVERSITY: &str = "network_university";

/// All known category keys with their display names, in display order.
pub const CATEGORIES: &[(&str, &str)] = &[
    (CATEGORY_CONTACT_LABELS, "Contact Labels"),
    (CATEGORY_COMPANY_CATEGORY, "Company Category"),
    (CATEGORY_PRIMARY_INDUSTRY, "Primary Industry"),
    (CATEGORY_NETWORK_UNIVERSITY, "Network University"),
];

/// Check whether a category key is one of the known categories.
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.iter().any(|(key, _)| *key == category)
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Label given to a configuration entry created without one.
pub const DEFAULT_ENTRY_LABEL: &str = "New Configuration Entry";

/// Description given to a configuration entry created without one.
pub const DEFAULT_ENTRY_DESCRIPTION: &str = "New Description";

/// Contact label assigned to imported emails and phone numbers.
pub const DEFAULT_CONTACT_LABEL: &str = "Personal";

// ---------------------------------------------------------------------------
// Label matching
// ---------------------------------------------------------------------------

/// Normalize a label for lookup: trimmed and lowercased.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed label comparison.
pub fn labels_match(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}

/// Build the `ILIKE` pattern for a free-text configuration search.
///
/// `%` and `_` in the user's query are escaped so they match literally.
pub fn search_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
