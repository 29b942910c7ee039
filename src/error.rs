//! Error types and handling infrastructure for digitpad.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors that reach the prediction panel are shown verbatim
//! - **Context preservation**: Include relevant information for debugging
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for digitpad operations.
///
/// Network failures and non-success statuses are recoverable: the submission flow turns them
/// into a visible error state. Terminal and configuration errors abort the application.
#[derive(Error, Debug)]
pub enum DigitpadError {
    /// File system related errors (config file unreadable, log file not creatable, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file given on the command line does not exist
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The request never produced an HTTP response (connection refused, DNS, TLS, timeout)
    #[error("{message}")]
    Transport { message: String },

    /// The endpoint answered with a non-2xx status code
    #[error("Server error: {status}")]
    ServerStatus { status: u16 },

    /// The surface could not be encoded as PNG
    #[error("Image encoding failed: {message}")]
    Encode { message: String },

    /// Terminal rendering or input errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for digitpad operations.
pub type Result<T> = std::result::Result<T, DigitpadError>;

impl DigitpadError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a Transport error carrying the underlying failure's message
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an Encode error with a descriptive message
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to DigitpadError
impl From<std::io::Error> for DigitpadError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

impl From<reqwest::Error> for DigitpadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let status = DigitpadError::ServerStatus { status: 500 };
        assert_eq!(status.to_string(), "Server error: 500");

        let transport = DigitpadError::transport("connection refused");
        assert_eq!(transport.to_string(), "connection refused");

        let missing = DigitpadError::ConfigNotFound {
            path: PathBuf::from("/etc/digitpad.toml"),
        };
        assert_eq!(
            missing.to_string(),
            "Config file not found: /etc/digitpad.toml"
        );

        let encode = DigitpadError::encode("out of memory");
        assert_eq!(encode.to_string(), "Image encoding failed: out of memory");
    }

    #[test]
    fn test_ui_error_message() {
        let err = DigitpadError::ui("failed to enter raw mode: not a tty");
        assert_eq!(
            err.to_string(),
            "UI operation failed: failed to enter raw mode: not a tty"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: DigitpadError = io_err.into();

        match err {
            DigitpadError::FileError { message, .. } => {
                assert_eq!(message, "Permission denied");
            }
            _ => panic!("Expected FileError variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        assert_eq!(returns_result().unwrap(), "success");
    }
}
