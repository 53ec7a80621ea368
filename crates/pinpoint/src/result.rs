//! Result and error types for Pinpoint.

use thiserror::Error;

use crate::dom::DomError;

/// Result type for Pinpoint operations
pub type PinpointResult<T> = Result<T, PinpointError>;

/// Errors that can occur in Pinpoint
///
/// Generators never surface query failures through this type; they degrade
/// to a fallback candidate instead. Only precondition violations and
/// configuration/I/O problems reach the caller.
#[derive(Debug, Error)]
pub enum PinpointError {
    /// Element does not belong to the document it was inspected against
    #[error("Element <{tag}> is not attached to the inspected document")]
    DetachedElement {
        /// Tag name of the offending element
        tag: String,
    },

    /// No element matched the selector used to pick the inspection target
    #[error("No element matches selector: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// DOM capability error
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// Invalid engine configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl PinpointError {
    /// Create a detached element error
    #[must_use]
    pub fn detached(tag: impl Into<String>) -> Self {
        Self::DetachedElement { tag: tag.into() }
    }

    /// Create an element not found error
    #[must_use]
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_error_message() {
        let err = PinpointError::detached("button");
        assert!(err.to_string().contains("<button>"));
        assert!(err.to_string().contains("not attached"));
    }

    #[test]
    fn test_not_found_error_message() {
        let err = PinpointError::not_found("#missing");
        assert_eq!(err.to_string(), "No element matches selector: #missing");
    }

    #[test]
    fn test_invalid_config_error_message() {
        let err = PinpointError::invalid_config("weights must sum to 1.0");
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_dom_error_conversion() {
        let err: PinpointError = DomError::LayoutUnavailable.into();
        assert!(matches!(err, PinpointError::Dom(DomError::LayoutUnavailable)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PinpointError = io.into();
        assert!(err.to_string().contains("gone"));
    }
}
