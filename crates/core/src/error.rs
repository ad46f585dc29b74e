use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A bulk import was aborted. The message names the offending row.
    #[error("Import failed: {0}")]
    Import(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
