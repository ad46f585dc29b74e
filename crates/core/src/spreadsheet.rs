//! Tabular file reading and writing for bulk contact import/export.
//!
//! Uploads arrive as either CSV or XLSX. Both are reduced to a list of
//! [`SheetRow`]s keyed by the header row, so the importer never cares which
//! format the user picked. Only the first worksheet of a workbook is read.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::CoreError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Xlsx,
}

impl SheetFormat {
    /// Detect the format from an uploaded file name's extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.')?.1.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// One data row of a sheet, keyed by column header.
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    /// 1-based row number as the user sees it in their spreadsheet
    /// (the header is row 1).
    pub line: usize,
    cells: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(line: usize) -> Self {
        Self {
            line,
            cells: HashMap::new(),
        }
    }

    /// Set a cell. Headers are trimmed; empty values are not stored.
    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.insert(column, value.into());
        self
    }

    fn insert(&mut self, column: &str, value: String) {
        if !value.trim().is_empty() {
            self.cells.insert(column.trim().to_string(), value);
        }
    }

    /// Trimmed cell value, or `None` for a missing or blank cell.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parse an uploaded file into rows. Blank rows are skipped.
pub fn parse_sheet(format: SheetFormat, data: &[u8]) -> Result<Vec<SheetRow>, CoreError> {
    match format {
        SheetFormat::Csv => parse_csv(data),
        SheetFormat::Xlsx => parse_xlsx(data),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn parse_csv(data: &[u8]) -> Result<Vec<SheetRow>, CoreError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| CoreError::Validation(format!("CSV is not valid UTF-8: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_csv_records(text).into_iter();

    let headers = match records.next() {
        Some((_, header_record)) => parse_csv_line(header_record),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for (line, record) in records {
        if record.trim().is_empty() {
            continue;
        }
        let mut row = SheetRow::new(line);
        for (header, value) in headers.iter().zip(parse_csv_line(record)) {
            row.insert(header, value);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Split CSV text into records, each with the 1-based line it starts on.
///
/// Line breaks inside a quoted field belong to the field, so a record may
/// span several physical lines. A trailing `\r` before a record break is
/// dropped.
fn split_csv_records(text: &str) -> Vec<(usize, &str)> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut start_line = 1;
    let mut line = 1;

    for (pos, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' => {
                if !in_quotes {
                    let record = &text[start..pos];
                    records.push((start_line, record.strip_suffix('\r').unwrap_or(record)));
                    start = pos + 1;
                    start_line = line + 1;
                }
                line += 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        let record = &text[start..];
        records.push((start_line, record.strip_suffix('\r').unwrap_or(record)));
    }
    records
}

/// Parse a single CSV record into fields, handling quoted fields.
fn parse_csv_line(record: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}

/// Escape a value for CSV: wrap in quotes if it contains a comma, a quote,
/// or a line break.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build a CSV document from a header row and data rows.
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| csv_escape(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|v| csv_escape(v))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

fn parse_xlsx(data: &[u8]) -> Result<Vec<SheetRow>, CoreError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| CoreError::Validation(format!("Unreadable spreadsheet: {e}")))?;

    let Some(sheet_name) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| CoreError::Validation(format!("Unreadable worksheet '{sheet_name}': {e}")))?;

    // Absolute position of the first used row, so reported line numbers match
    // what the user sees even when the sheet starts below row 1.
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut sheet_rows = range.rows();

    let headers: Vec<String> = match sheet_rows.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for (offset, cells) in sheet_rows.enumerate() {
        // +1 for the header row, +1 for 1-based numbering.
        let mut row = SheetRow::new(first_row + offset + 2);
        for (header, cell) in headers.iter().zip(cells) {
            row.insert(header, cell_text(cell));
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Render a cell the way a user would read it in their spreadsheet.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Int(i) => i.to_string(),
        // Phone numbers typed into a sheet come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
