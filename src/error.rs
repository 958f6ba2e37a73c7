use thiserror::Error;

/// Main error type for sift operations
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Search configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("Search field not found: {0}")]
    FieldNotFound(u64),

    #[error("Invalid date for field '{field}': '{value}' (expected DD.MM.YYYY)")]
    MalformedDate { field: String, value: String },

    #[error("Invalid number for field '{field}': '{value}'")]
    MalformedNumber { field: String, value: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for sift operations
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Check if this error should surface as a not-found response
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SiftError::UnknownEntityType(_)
                | SiftError::ConfigNotFound(_)
                | SiftError::FieldNotFound(_)
        )
    }

    /// Check if this error was caused by malformed caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SiftError::MalformedDate { .. }
                | SiftError::MalformedNumber { .. }
                | SiftError::InvalidRequest(_)
        )
    }
}
