//! Bulk contact import (`POST /contacts/upload`) and export
//! (`GET /contacts/export`).
//!
//! An upload is staged in the configured upload directory, parsed, and
//! validated as a whole before anything is written. Each row's company and
//! contact are then committed together in their own transaction, so a storage
//! failure part-way through keeps the rows already committed. The staged file
//! is removed when the request finishes, whether or not the import succeeded.

use std::io::Write;
use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use crm_core::contact_import::{
    format_bool, plan_import, ImportRow, LabelLookup, IMPORT_COLUMNS, UPLOAD_STATUS_COMPLETED,
};
use crm_core::error::CoreError;
use crm_core::spreadsheet::{build_csv, parse_sheet, SheetFormat};
use crm_db::models::company::CreateCompany;
use crm_db::models::configuration::Configuration;
use crm_db::models::contact::{ContactWithCompany, CreateContact};
use crm_db::repositories::{CompanyRepo, ConfigurationRepo, ContactRepo};
use crm_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

fn label_lookup(configurations: &[Configuration]) -> LabelLookup {
    LabelLookup::new(
        configurations
            .iter()
            .map(|c| (c.id, c.category.as_str(), c.label.as_str())),
    )
}

/// POST /api/v1/contacts/upload
///
/// Accepts a multipart form with a required `file` field holding a `.csv` or
/// `.xlsx` sheet. Returns the created contacts with their companies.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<MessageResponse<Vec<ContactWithCompany>>>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    let format = SheetFormat::from_file_name(&filename).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unsupported file '{filename}'. Upload a .csv or .xlsx file"
        ))
    })?;

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    // Removed from disk when dropped, on every return path below.
    let mut staged = tempfile::Builder::new()
        .prefix("contacts-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(&state.config.upload_dir)
        .map_err(|e| AppError::InternalError(format!("Failed to stage upload: {e}")))?;
    staged
        .write_all(&data)
        .map_err(|e| AppError::InternalError(format!("Failed to stage upload: {e}")))?;
    tracing::debug!(path = %staged.path().display(), bytes = data.len(), "Staged contact upload");

    let created = import_file(&state.pool, staged.path(), format).await?;

    let message = if created.is_empty() {
        "No new contacts created"
    } else {
        "Contacts uploaded successfully"
    };
    tracing::info!(
        created = created.len(),
        %filename,
        user_id = auth.user_id,
        "Contact import finished"
    );
    Ok(Json(MessageResponse::new(message, created)))
}

/// Parse, validate, and commit a staged import file.
async fn import_file(
    pool: &DbPool,
    path: &Path,
    format: SheetFormat,
) -> AppResult<Vec<ContactWithCompany>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read staged upload: {e}")))?;
    let rows = parse_sheet(format, &bytes).map_err(|e| match e {
        CoreError::Validation(msg) => CoreError::Import(msg),
        other => other,
    })?;

    let configurations = ConfigurationRepo::list_all(pool).await?;
    let plan = plan_import(&rows, &label_lookup(&configurations))?;

    let mut created = Vec::with_capacity(plan.len());
    for row in plan {
        let line = row.line;
        let pair = commit_row(pool, row).await.map_err(|e| {
            tracing::error!(error = %e, line, committed = created.len(), "Import row failed");
            e
        })?;
        created.push(pair);
    }
    Ok(created)
}

/// Insert one row's company and contact in a transaction of their own.
async fn commit_row(pool: &DbPool, row: ImportRow) -> Result<ContactWithCompany, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let company = CompanyRepo::create(&mut *tx, &CreateCompany::from(row.company)).await?;
    let contact =
        ContactRepo::create(&mut *tx, &CreateContact::from_import(row.contact, company.id))
            .await?;
    tx.commit().await?;
    Ok(ContactWithCompany {
        contact,
        company: Some(company),
    })
}

/// GET /api/v1/contacts/export
///
/// All contacts as a CSV in the import layout. Configuration ids are written
/// back as labels and every row is marked completed, so re-uploading an
/// export does not duplicate contacts.
pub async fn export(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let contacts = ContactRepo::list_with_companies(&state.pool).await?;
    let configurations = ConfigurationRepo::list_all(&state.pool).await?;
    let lookup = label_lookup(&configurations);

    let rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|c| export_row(c, &lookup))
        .collect();
    let csv = build_csv(IMPORT_COLUMNS, &rows);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"contacts.csv\""),
        ],
        csv,
    ))
}

/// One export row, in [`IMPORT_COLUMNS`] order.
fn export_row(entry: &ContactWithCompany, lookup: &LabelLookup) -> Vec<String> {
    let label = |id: Option<i64>| {
        id.and_then(|id| lookup.label_of(id))
            .unwrap_or_default()
            .to_string()
    };
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let contact = &entry.contact;
    let emails: Vec<&str> = contact.emails.0.iter().map(|e| e.email.as_str()).collect();
    let phones: Vec<&str> = contact
        .phone_numbers
        .0
        .iter()
        .map(|p| p.phone_number.as_str())
        .collect();

    let mut row = vec![
        contact.first_name.clone(),
        contact.last_name.clone(),
        contact.title.clone(),
        label(Some(contact.university)),
        emails.join(", "),
        phones.join(", "),
        format_bool(contact.is_alumni).to_string(),
        format_bool(contact.is_contest_winner).to_string(),
        text(&contact.major),
        text(&contact.notes),
    ];
    match &entry.company {
        Some(company) => row.extend([
            company.name.clone(),
            text(&company.description),
            text(&company.website),
            label(company.category),
            label(company.primary_industry),
            text(&company.intellectual_property),
            company
                .funding_received
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ]),
        None => row.extend(std::iter::repeat(String::new()).take(7)),
    }
    row.push(UPLOAD_STATUS_COMPLETED.to_string());
    row
}
