//! Route definitions for the `/contacts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{contact, contact_import};
use crate::state::AppState;

/// Routes mounted at `/contacts`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// POST   /upload  -> upload
/// GET    /export  -> export
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list).post(contact::create))
        .route("/upload", post(contact_import::upload))
        .route("/export", get(contact_import::export))
        .route(
            "/{id}",
            get(contact::get_by_id)
                .patch(contact::update)
                .delete(contact::delete),
        )
}
