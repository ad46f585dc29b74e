//! Route definitions for the `/metadata` lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::metadata;
use crate::state::AppState;

/// Routes mounted at `/metadata`.
///
/// ```text
/// GET /countries   -> countries
/// GET /categories  -> categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/countries", get(metadata::countries))
        .route("/categories", get(metadata::categories))
}
