//! User account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crm_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
///
/// Not `Serialize`: it carries the password hash and reset token. Convert to
/// [`UserResponse`] before sending a user over the wire.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<Timestamp>,
    pub tenant_name: String,
    pub tenant_description: Option<String>,
    pub tenant_category: String,
    pub tenant_logo: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub tenant_name: String,
    pub tenant_description: Option<String>,
    pub tenant_category: String,
    pub tenant_logo: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            tenant_name: user.tenant_name,
            tenant_description: user.tenant_description,
            tenant_category: user.tenant_category,
            tenant_logo: user.tenant_logo,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration request body. Required fields are checked by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub tenant_name: Option<String>,
    pub tenant_description: Option<String>,
    pub tenant_category: Option<String>,
    pub tenant_logo: Option<serde_json::Value>,
}

/// DTO for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub tenant_name: String,
    pub tenant_description: Option<String>,
    pub tenant_category: String,
    pub tenant_logo: Option<serde_json::Value>,
}
