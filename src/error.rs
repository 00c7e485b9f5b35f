//! Error types for the CFP console
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the CFP console
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Identity Errors
    // ============================================================================
    #[error("Not logged in: run `cfp-console login` first")]
    NotLoggedIn,

    // ============================================================================
    // Remote API Errors
    // ============================================================================
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request aborted")]
    Aborted,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ============================================================================
    // Session Errors
    // ============================================================================
    #[error("Session error: {message}")]
    Session { message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error for bad command arguments or input files
    pub fn input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether this error is a cancellation rather than a real failure
    pub fn is_aborted(&self) -> bool {
        matches!(self, Error::Aborted)
    }

    /// Whether this is an API error carrying the given HTTP status
    pub fn is_api_status(&self, expected: u16) -> bool {
        matches!(self, Error::Api { status, .. } if *status == expected)
    }

    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the CFP console
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("missing base_url");
        assert_eq!(err.to_string(), "Configuration error: missing base_url");

        let err = Error::api(404, "NotFound", "trace id not found");
        assert_eq!(
            err.to_string(),
            "API error 404 (NotFound): trace id not found"
        );

        assert_eq!(
            Error::NotLoggedIn.to_string(),
            "Not logged in: run `cfp-console login` first"
        );

        let err = Error::input("At least one trace id is required");
        assert_eq!(
            err.to_string(),
            "Invalid input: At least one trace id is required"
        );
    }

    #[test]
    fn test_is_aborted() {
        assert!(Error::Aborted.is_aborted());
        assert!(!Error::NotLoggedIn.is_aborted());
        assert!(!Error::api(503, "Unavailable", "").is_aborted());
    }

    #[test]
    fn test_api_status() {
        let err = Error::api(401, "Unauthorized", "token expired");
        assert!(err.is_api_status(401));
        assert!(!err.is_api_status(403));
        assert_eq!(err.status(), Some(401));
        assert_eq!(Error::session("x").status(), None);
    }
}
