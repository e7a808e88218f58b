//! Error types for Perfect Booking Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Perfect Booking Lambda functions.
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required booking field was absent from the input record
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Not found error
    #[error("Not found: {0}")]
    NotFound(String),

    /// Outbound messaging (Twilio) error
    #[error("Messaging error: {0}")]
    Messaging(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) | Error::MissingField(_) => 400,
            Error::NotFound(_) => 404,
            Error::Messaging(_) => 502,
            Error::Config(_) => 503,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_client_errors() {
        assert_eq!(Error::MissingField("service".into()).status_code(), 400);
        assert_eq!(Error::Validation("bad price".into()).status_code(), 400);
        assert_eq!(Error::NotFound("booking".into()).status_code(), 404);
        assert_eq!(Error::Config("no credentials".into()).status_code(), 503);
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
    }
}
