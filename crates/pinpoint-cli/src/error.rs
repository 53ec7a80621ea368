//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Target selector matched nothing
    #[error("No element matches target selector: {selector}")]
    TargetNotFound {
        /// Selector given with --target
        selector: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pinpoint library error
    #[error("Pinpoint error: {0}")]
    Pinpoint(#[from] pinpoint::PinpointError),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML output error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a target not found error
    #[must_use]
    pub fn target_not_found(selector: impl Into<String>) -> Self {
        Self::TargetNotFound {
            selector: selector.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_target_not_found_error() {
        let err = CliError::target_not_found("#missing");
        assert!(err.to_string().contains("#missing"));
    }

    #[test]
    fn test_from_library_error() {
        let err: CliError = pinpoint::PinpointError::invalid_config("weights").into();
        assert!(err.to_string().starts_with("Pinpoint error"));
    }

    #[test]
    fn test_from_io_error() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().contains("I/O"));
    }
}
