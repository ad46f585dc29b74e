//! Route definitions for the `/configurations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::configuration;
use crate::state::AppState;

/// Routes mounted at `/configurations`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /search  -> search
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(configuration::list).post(configuration::create))
        .route("/search", get(configuration::search))
        .route(
            "/{id}",
            get(configuration::get_by_id)
                .put(configuration::update)
                .delete(configuration::delete),
        )
}
