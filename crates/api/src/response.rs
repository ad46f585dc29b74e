//! Shared response envelope types for API handlers.
//!
//! Reads return the entity itself. Auth, registration, and upload responses
//! use `{ "message": ..., "data": ... }`; deletes return `{ "success": true }`.

use serde::Serialize;

/// `{ "message": ..., "data": T }` envelope for create/upload/auth responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// `{ "success": true }` body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
