//! Handlers for the `/companies` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core::error::CoreError;
use crm_core::types::DbId;
use crm_db::models::company::{Company, CompanyFields, CompanyListParams};
use crm_db::repositories::CompanyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Company",
        id,
    })
}

/// GET /api/v1/companies?category=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CompanyListParams>,
) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepo::list(&state.pool, params.category).await?;
    Ok(Json(companies))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(company))
}

/// POST /api/v1/companies
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CompanyFields>,
) -> AppResult<(StatusCode, Json<Company>)> {
    let input = input.into_create()?;
    let company = CompanyRepo::create(&state.pool, &input).await?;
    tracing::info!(company_id = company.id, user_id = auth.user_id, "Company created");
    Ok((StatusCode::CREATED, Json(company)))
}

/// PATCH /api/v1/companies/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompanyFields>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(company_id = id, user_id = auth.user_id, "Company updated");
    Ok(Json(company))
}

/// DELETE /api/v1/companies/{id}
///
/// Refused while any contact still belongs to the company.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let mut tx = state.pool.begin().await?;

    if CompanyRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(not_found(id));
    }
    let contacts = CompanyRepo::count_contacts(&mut *tx, id).await?;
    if contacts > 0 {
        return Err(AppError::BadRequest(format!(
            "Cannot delete company with {contacts} associated contact(s)"
        )));
    }
    CompanyRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(company_id = id, user_id = auth.user_id, "Company deleted");
    Ok(Json(SuccessResponse::ok()))
}
