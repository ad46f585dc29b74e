//! Handlers for the static `/metadata` lookups.

use axum::Json;
use crm_core::metadata::{categories as category_list, CategoryInfo, Country, COUNTRIES};

/// GET /api/v1/metadata/countries
pub async fn countries() -> Json<&'static [Country]> {
    Json(COUNTRIES)
}

/// GET /api/v1/metadata/categories
pub async fn categories() -> Json<Vec<CategoryInfo>> {
    Json(category_list())
}
