//! Handlers for the `/configurations` resource.
//!
//! Writes are wrapped in a transaction so concurrent readers never observe a
//! half-applied change.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use crm_core::configuration::{DEFAULT_ENTRY_DESCRIPTION, DEFAULT_ENTRY_LABEL};
use crm_core::text::is_blank;
use crm_core::error::CoreError;
use crm_core::types::DbId;
use crm_db::models::configuration::{
    Configuration, ConfigurationFilter, CreateConfiguration, UpdateConfiguration,
};
use crm_db::repositories::ConfigurationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Configuration",
        id,
    })
}

/// Use the given text unless it is missing or blank.
fn or_default(value: Option<&str>, default: &str) -> String {
    if is_blank(value) {
        default.to_string()
    } else {
        value.unwrap_or(default).trim().to_string()
    }
}

/// POST /api/v1/configurations
///
/// Only `category` is required; label and description fall back to
/// placeholder text the user edits afterwards.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateConfiguration>,
) -> AppResult<(StatusCode, Json<Configuration>)> {
    let category = input
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Core(CoreError::Validation("Category is required".into())))?
        .to_string();
    let label = or_default(input.label.as_deref(), DEFAULT_ENTRY_LABEL);
    let description = or_default(input.description.as_deref(), DEFAULT_ENTRY_DESCRIPTION);

    let mut tx = state.pool.begin().await?;
    let configuration =
        ConfigurationRepo::create(&mut *tx, &category, &label, &description, &input).await?;
    tx.commit().await?;

    tracing::info!(
        configuration_id = configuration.id,
        %category,
        user_id = auth.user_id,
        "Configuration created"
    );
    Ok((StatusCode::CREATED, Json(configuration)))
}

/// GET /api/v1/configurations?include_hidden&include_disabled&category&query
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ConfigurationFilter>,
) -> AppResult<Json<Vec<Configuration>>> {
    let configurations = ConfigurationRepo::list(&state.pool, &filter).await?;
    Ok(Json(configurations))
}

/// GET /api/v1/configurations/search?query&include_hidden&include_disabled
///
/// Like [`list`], but a non-blank `query` is required.
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<ConfigurationFilter>,
) -> AppResult<Json<Vec<Configuration>>> {
    if is_blank(filter.query.as_deref()) {
        return Err(AppError::BadRequest("Search query is required".into()));
    }
    let configurations = ConfigurationRepo::list(&state.pool, &filter).await?;
    Ok(Json(configurations))
}

/// GET /api/v1/configurations/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Configuration>> {
    let configuration = ConfigurationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(configuration))
}

/// PUT /api/v1/configurations/{id}
///
/// Partial: omitted fields keep their stored values.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConfiguration>,
) -> AppResult<Json<Configuration>> {
    let mut tx = state.pool.begin().await?;
    let configuration = ConfigurationRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(configuration_id = id, user_id = auth.user_id, "Configuration updated");
    Ok(Json(configuration))
}

/// DELETE /api/v1/configurations/{id}
///
/// Companies and contacts referencing the entry keep the dangling id.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let mut tx = state.pool.begin().await?;
    if !ConfigurationRepo::delete(&mut *tx, id).await? {
        return Err(not_found(id));
    }
    tx.commit().await?;

    tracing::info!(configuration_id = id, user_id = auth.user_id, "Configuration deleted");
    Ok(Json(SuccessResponse::ok()))
}
