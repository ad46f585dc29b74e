//! Small helpers for free-text request fields.

/// Returns `true` when a text field is absent or only whitespace.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
