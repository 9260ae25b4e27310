//! Error types for advecta.
//!
//! Every fallible operation returns `Result<T, AdvectError>`. Parameter
//! problems are reported at construction time, before any stepping begins.
//! A scheme that blows up numerically is not an error.

use thiserror::Error;

/// Result type alias for advecta operations.
pub type AdvectResult<T> = Result<T, AdvectError>;

/// Unified error type for all advecta operations.
#[derive(Debug, Error)]
pub enum AdvectError {
    // ===== Construction Errors =====
    /// A numerical parameter is out of its admissible range.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name (`L`, `h`, `T`, `dt`, `c`, ...).
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// A state does not match the grid it is stepped on.
    #[error("State length {actual} does not match grid size {expected}")]
    ShapeMismatch {
        /// Number of grid points.
        expected: usize,
        /// Length of the supplied state.
        actual: usize,
    },

    // ===== History Errors =====
    /// History lookup outside `[0, m]`.
    #[error("Index {index} out of range for history of length {len}")]
    IndexOutOfRange {
        /// Requested snapshot index.
        index: usize,
        /// Number of recorded snapshots.
        len: usize,
    },

    /// Archive integrity violation.
    #[error("Archive integrity violation: hash mismatch")]
    ArchiveIntegrity,

    // ===== Configuration Errors =====
    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AdvectError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error was raised while validating inputs, i.e. before
    /// any stepping could have started.
    #[must_use]
    pub const fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. }
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = AdvectError::invalid_parameter("h", -0.1, "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("Invalid parameter h"));
        assert!(msg.contains("-0.1"));
        assert!(msg.contains("must be positive"));
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = AdvectError::IndexOutOfRange { index: 82, len: 81 };
        let msg = err.to_string();
        assert!(msg.contains("82"));
        assert!(msg.contains("81"));
        assert!(!err.is_parameter_error());
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = AdvectError::ShapeMismatch {
            expected: 101,
            actual: 100,
        };
        assert!(err.to_string().contains("does not match grid size 101"));
        assert!(!err.is_parameter_error());
    }

    #[test]
    fn test_error_config() {
        let err = AdvectError::config("spacing exceeds domain");
        assert!(err.is_parameter_error());
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("spacing exceeds domain"));
    }

    #[test]
    fn test_error_serialization() {
        let err = AdvectError::serialization("truncated payload");
        assert!(!err.is_parameter_error());
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_archive_integrity() {
        let err = AdvectError::ArchiveIntegrity;
        assert!(err.to_string().contains("hash mismatch"));
    }

    #[test]
    fn test_error_from_io() {
        let err: AdvectError = std::io::Error::other("disk full").into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_error_debug() {
        let err = AdvectError::config("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
    }
}
