pub mod auth;
pub mod company;
pub mod configuration;
pub mod contact;
pub mod health;
pub mod metadata;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signin                       signin (public)
/// /auth/signin-with-token            resume session from token (public)
///
/// /users                             register (public)
///
/// /contacts                          list, create
/// /contacts/upload                   bulk import (multipart)
/// /contacts/export                   CSV export
/// /contacts/{id}                     get, patch, delete
///
/// /companies                         list (?category=), create
/// /companies/{id}                    get, patch, delete
///
/// /configurations                    list (filters), create
/// /configurations/search             search by label/description
/// /configurations/{id}               get, update, delete
///
/// /metadata/countries                static country list (public)
/// /metadata/categories               configuration categories (public)
/// ```
///
/// Contacts, companies, and configurations require a Bearer token; their
/// handlers take the [`AuthUser`](crate::middleware::auth::AuthUser) extractor.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/contacts", contact::router())
        .nest("/companies", company::router())
        .nest("/configurations", configuration::router())
        .nest("/metadata", metadata::router())
}
