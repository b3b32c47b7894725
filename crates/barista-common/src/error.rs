//! Error types shared across Barista components

use thiserror::Error;

/// Marker trait implemented by every Barista error type.
///
/// Lets generic code accept any error originating in this workspace.
pub trait BaristaError: std::error::Error {}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {details}")]
    FileError { path: String, details: String },

    /// The configuration sources could not be parsed into the target type
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// A configuration value is present but does not satisfy its invariant
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl BaristaError for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigurationError::ParseError {
            details: "expected a table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse configuration: expected a table"
        );

        let err = ConfigurationError::InvalidValue {
            field: "environment.apiServerUrl".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.to_string().contains("environment.apiServerUrl"));
    }
}
