//! Domain error type shared by every crate in the workspace.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `entity` is a human-readable kind such as `"Action"` or `"Theme"`.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    /// A status token outside `not_started` / `in_progress` / `completed`.
    pub fn unknown_status(token: &str) -> Self {
        CoreError::Validation(format!(
            "Unknown status '{token}'. Expected one of: not_started, in_progress, completed"
        ))
    }
}
