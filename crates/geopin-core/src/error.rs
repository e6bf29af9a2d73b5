//! Error types for GeoPin

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeopinError {
    // Input errors
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // Remote service errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected response from place service (status {status}): {reason}")]
    UnexpectedResponse { status: u16, reason: String },

    // Interaction guard outcome, never shown to the user
    #[error("Result discarded: the mode that requested it is no longer active")]
    StaleResultDiscarded,

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeopinError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error should surface as a notification.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, GeopinError::StaleResultDiscarded)
    }
}

pub type Result<T> = std::result::Result<T, GeopinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_result_is_hidden() {
        assert!(!GeopinError::StaleResultDiscarded.is_user_visible());
        assert!(GeopinError::Network("timed out".into()).is_user_visible());
        assert!(GeopinError::validation("radius", "must be positive").is_user_visible());
    }

    #[test]
    fn test_validation_message() {
        let err = GeopinError::validation("radius", "must be greater than zero");
        assert_eq!(err.to_string(), "Invalid radius: must be greater than zero");
    }
}
