//! Handlers for the `/contacts` resource.
//!
//! Create and update run in a single transaction together with any company
//! they create, re-point, or patch. Returning early with `?` drops the
//! transaction, which rolls it back.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core::contact::{validate_emails, validate_phone_numbers};
use crm_core::text::is_blank;
use crm_core::error::CoreError;
use crm_core::types::DbId;
use crm_db::models::contact::{
    CompanyInput, ContactWithCompany, CreateContact, CreateContactRequest, UpdateContact,
};
use crm_db::repositories::{CompanyRepo, ContactRepo};
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn contact_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

fn company_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Company",
        id,
    })
}

/// Check the create body and turn it into an insert DTO (without company).
fn validate_create(input: &CreateContactRequest) -> Result<CreateContact, CoreError> {
    let required = [
        input.first_name.as_deref(),
        input.last_name.as_deref(),
        input.title.as_deref(),
    ];
    let Some(university) = input.university else {
        return Err(CoreError::Validation(
            "First name, last name, title and university are required".into(),
        ));
    };
    if required.into_iter().any(is_blank) {
        return Err(CoreError::Validation(
            "First name, last name, title and university are required".into(),
        ));
    }
    validate_emails(&input.emails)?;
    validate_phone_numbers(&input.phone_numbers)?;

    let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
    Ok(CreateContact {
        avatar: input.avatar.clone(),
        background: input.background.clone(),
        first_name: text(&input.first_name),
        last_name: text(&input.last_name),
        title: text(&input.title),
        university,
        major: input.major.clone(),
        notes: input.notes.clone(),
        emails: input.emails.clone(),
        phone_numbers: input.phone_numbers.clone(),
        is_alumni: input.is_alumni.unwrap_or(false),
        is_contest_winner: input.is_contest_winner.unwrap_or(false),
        company_id: None,
    })
}

/// Resolve the company of a new contact: reference an existing one by id,
/// or create one from the given fields.
async fn resolve_new_company(conn: &mut PgConnection, input: CompanyInput) -> AppResult<DbId> {
    match input.id {
        Some(company_id) => {
            let company = CompanyRepo::find_by_id(&mut *conn, company_id)
                .await?
                .ok_or_else(|| company_not_found(company_id))?;
            Ok(company.id)
        }
        None => {
            let create = input.fields.into_create()?;
            let company = CompanyRepo::create(&mut *conn, &create).await?;
            tracing::debug!(company_id = company.id, "Created company for contact");
            Ok(company.id)
        }
    }
}

/// Apply a company change during update and return the id the contact
/// should point at.
///
/// - With an `id`: patch that company and re-point the contact to it.
/// - Without: patch the contact's current company, or create one.
async fn apply_company_change(
    conn: &mut PgConnection,
    current: Option<DbId>,
    input: &CompanyInput,
) -> AppResult<DbId> {
    let target = input.id.or(current);
    match target {
        Some(company_id) => {
            let company = CompanyRepo::update(&mut *conn, company_id, &input.fields)
                .await?
                .ok_or_else(|| company_not_found(company_id))?;
            Ok(company.id)
        }
        None => {
            let create = input.fields.clone().into_create()?;
            let company = CompanyRepo::create(&mut *conn, &create).await?;
            tracing::debug!(company_id = company.id, "Created company for contact");
            Ok(company.id)
        }
    }
}

/// GET /api/v1/contacts
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContactWithCompany>>> {
    let contacts = ContactRepo::list_with_companies(&state.pool).await?;
    Ok(Json(contacts))
}

/// GET /api/v1/contacts/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContactWithCompany>> {
    let mut conn = state.pool.acquire().await?;
    let contact = ContactRepo::find_with_company(&mut conn, id)
        .await?
        .ok_or_else(|| contact_not_found(id))?;
    Ok(Json(contact))
}

/// POST /api/v1/contacts
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateContactRequest>,
) -> AppResult<(StatusCode, Json<ContactWithCompany>)> {
    let mut new_contact = validate_create(&input)?;

    let mut tx = state.pool.begin().await?;

    if let Some(company) = input.company {
        new_contact.company_id = Some(resolve_new_company(&mut tx, company).await?);
    }
    let contact = ContactRepo::create(&mut *tx, &new_contact).await?;
    let full = ContactRepo::find_with_company(&mut tx, contact.id)
        .await?
        .ok_or_else(|| contact_not_found(contact.id))?;

    tx.commit().await?;

    tracing::info!(
        contact_id = contact.id,
        company_id = ?contact.company_id,
        user_id = auth.user_id,
        "Contact created"
    );
    Ok((StatusCode::CREATED, Json(full)))
}

/// PATCH /api/v1/contacts/{id}
///
/// Absent `emails` / `phoneNumbers` keep their stored values; present ones
/// replace them and must be non-empty.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContact>,
) -> AppResult<Json<ContactWithCompany>> {
    if let Some(emails) = &input.emails {
        validate_emails(emails)?;
    }
    if let Some(phone_numbers) = &input.phone_numbers {
        validate_phone_numbers(phone_numbers)?;
    }

    let mut tx = state.pool.begin().await?;

    let existing = ContactRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| contact_not_found(id))?;

    let company_id = match &input.company {
        Some(company) => Some(apply_company_change(&mut tx, existing.company_id, company).await?),
        None => None,
    };

    ContactRepo::update(&mut *tx, id, &input, company_id)
        .await?
        .ok_or_else(|| contact_not_found(id))?;
    let full = ContactRepo::find_with_company(&mut tx, id)
        .await?
        .ok_or_else(|| contact_not_found(id))?;

    tx.commit().await?;

    tracing::info!(contact_id = id, user_id = auth.user_id, "Contact updated");
    Ok(Json(full))
}

/// DELETE /api/v1/contacts/{id}
///
/// The contact's company is kept.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !ContactRepo::delete(&state.pool, id).await? {
        return Err(contact_not_found(id));
    }
    tracing::info!(contact_id = id, user_id = auth.user_id, "Contact deleted");
    Ok(Json(SuccessResponse::ok()))
}
