//! Error types for RagChat
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for RagChat operations
///
/// Per-request failures (`Transport`, `MalformedResponse`) are caught by the
/// chat session and rendered into the transcript. `SessionUnavailable` and
/// `Config` are fatal at startup.
#[derive(Error, Debug)]
pub enum RagChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP call itself failed (network, DNS, TLS, client setup)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered 200 but the body had no usable `answer`
    #[error("Malformed response from endpoint: {0}")]
    MalformedResponse(String),

    /// A session identifier was required but none could be obtained
    #[error("Session identifier unavailable: {0}")]
    SessionUnavailable(String),

    /// Request payload could not be encoded or decoded
    #[error("Payload encoding error: {0}")]
    Encoding(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for RagChat operations
///
/// Uses `anyhow::Error` so callers can attach context; typed
/// [`RagChatError`] values are recovered with `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = RagChatError::Config("invalid endpoint".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid endpoint");
    }

    #[test]
    fn test_malformed_response_display() {
        let error = RagChatError::MalformedResponse("missing field `answer`".to_string());
        assert_eq!(
            error.to_string(),
            "Malformed response from endpoint: missing field `answer`"
        );
    }

    #[test]
    fn test_session_unavailable_display() {
        let error = RagChatError::SessionUnavailable("no runtime context".to_string());
        assert_eq!(
            error.to_string(),
            "Session identifier unavailable: no runtime context"
        );
    }

    #[test]
    fn test_encoding_error_display() {
        let error = RagChatError::Encoding("invalid base64".to_string());
        assert_eq!(error.to_string(), "Payload encoding error: invalid base64");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: RagChatError = io_error.into();
        assert!(matches!(error, RagChatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: RagChatError = json_error.into();
        assert!(matches!(error, RagChatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: RagChatError = yaml_error.into();
        assert!(matches!(error, RagChatError::Yaml(_)));
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let result: Result<()> = Err(RagChatError::MalformedResponse("x".to_string()).into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RagChatError>(),
            Some(RagChatError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RagChatError>();
    }
}
