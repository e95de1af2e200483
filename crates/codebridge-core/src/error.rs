//! Error types for the CodeBridge client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire CodeBridge client.
///
/// The variants follow the failure taxonomy of the client: transport
/// failures, non-2xx responses, application errors reported inside a
/// successful response body, and local failures (config, IO, editor
/// ownership).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CodebridgeError {
    /// The request never produced a response (connect error, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered 2xx but reported `status: "error"` in the body
    #[error("{message}")]
    Application {
        message: String,
        /// Fallback body the server sent along with the error, if any
        fallback: Option<String>,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Another component already owns the editor slot
    #[error("Editor already registered by '{owner}'")]
    EditorConflict { owner: String },

    /// An operation of the same kind is still in flight
    #[error("Busy: {0}")]
    Busy(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CodebridgeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an Application error without a fallback body
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
            fallback: None,
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Busy error
    pub fn busy(message: impl Into<String>) -> Self {
        Self::Busy(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the failure happened before any response arrived
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if the server reported a non-2xx status
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Check if the server reported an error inside a 2xx body
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || matches!(self, Self::Http { status: 404, .. })
    }

    /// Returns the fallback body attached to an application error, if any.
    pub fn fallback_body(&self) -> Option<&str> {
        match self {
            Self::Application { fallback, .. } => fallback.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CodebridgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CodebridgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodebridgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CodebridgeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (used at the binary boundary)
impl From<anyhow::Error> for CodebridgeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for CodebridgeError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, CodebridgeError>`.
pub type Result<T> = std::result::Result<T, CodebridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display_includes_status() {
        let err = CodebridgeError::http(502, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert!(err.is_http());
        assert!(!err.is_network());
    }

    #[test]
    fn test_application_error_keeps_fallback() {
        let err = CodebridgeError::Application {
            message: "quota exceeded".to_string(),
            fallback: Some("Loops repeat work.".to_string()),
        };
        assert!(err.is_application());
        assert_eq!(err.fallback_body(), Some("Loops repeat work."));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_not_found_matches_http_404() {
        assert!(CodebridgeError::http(404, "missing").is_not_found());
        assert!(CodebridgeError::not_found("concept", "monads").is_not_found());
        assert!(!CodebridgeError::http(500, "boom").is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: CodebridgeError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        match err {
            CodebridgeError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
