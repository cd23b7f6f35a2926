//! Error handling for Entrain
//!
//! All validation errors are deterministic and detected before any output
//! is produced.

use thiserror::Error;

/// Result type alias for Entrain operations
pub type Result<T> = std::result::Result<T, EntrainError>;

/// Main error type for Entrain operations
#[derive(Error, Debug)]
pub enum EntrainError {
    // Session Parameter Errors
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    // Encoder Input Errors
    #[error("Channel length mismatch: expected {expected} samples, got {actual}")]
    ChannelLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid channel count: {count} (at least one channel required)")]
    InvalidChannelCount { count: usize },

    // Preset Errors
    #[error("Unknown preset: '{id}'")]
    UnknownPreset { id: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EntrainError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            EntrainError::InvalidParameter { .. } => "INVALID_PARAMETER",
            EntrainError::ChannelLengthMismatch { .. } => "CHANNEL_LENGTH_MISMATCH",
            EntrainError::InvalidChannelCount { .. } => "INVALID_CHANNEL_COUNT",
            EntrainError::UnknownPreset { .. } => "UNKNOWN_PRESET",
            EntrainError::Io(_) => "IO_ERROR",
            EntrainError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is a validation failure of caller-supplied input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EntrainError::InvalidParameter { .. }
                | EntrainError::ChannelLengthMismatch { .. }
                | EntrainError::InvalidChannelCount { .. }
                | EntrainError::UnknownPreset { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = EntrainError::InvalidParameter {
            field: "base_hz",
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_PARAMETER");

        let err = EntrainError::ChannelLengthMismatch {
            expected: 100,
            actual: 101,
        };
        assert_eq!(err.error_code(), "CHANNEL_LENGTH_MISMATCH");
    }

    #[test]
    fn test_validation_classification() {
        let err = EntrainError::InvalidChannelCount { count: 0 };
        assert!(err.is_validation());

        let err = EntrainError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_display_messages() {
        let err = EntrainError::ChannelLengthMismatch {
            expected: 100,
            actual: 101,
        };
        assert_eq!(
            err.to_string(),
            "Channel length mismatch: expected 100 samples, got 101"
        );

        let err = EntrainError::UnknownPreset {
            id: "gamma-burst".to_string(),
        };
        assert!(err.to_string().contains("gamma-burst"));
    }
}
