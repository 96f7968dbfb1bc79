//! Error types for SoftLayer operations.
//!
//! This module provides the error taxonomy shared by the API client and the resource
//! controllers, including the classification helpers the controllers branch and log on.

use std::fmt::Display;
use thiserror::Error;

/// Message fragment SoftLayer returns when a billing item cannot be cancelled because
/// compute resources are still attached to the VLAN.
pub const RESOURCES_ATTACHED_PATTERN: &str = "servers still on the VLAN";

/// Main error type for SoftLayer operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input failed validation before any remote call
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// More than one remote object matched where exactly one was expected
    #[error("Ambiguous state: {0}")]
    AmbiguousState(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Cancellation blocked by resources still attached to the VLAN
    #[error("Resources still attached: {0}")]
    ResourcesAttached(String),

    /// Error reported by the SoftLayer API
    #[error("SoftLayer API error: {code}: {message}")]
    RemoteError {
        /// SoftLayer exception class (e.g. `SoftLayer_Exception_Public`)
        code: String,
        /// Error message
        message: String,
    },

    /// SoftLayer service is unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Invalid request (authentication or authorization failure)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to parse an API response
    #[error("Failed to parse SoftLayer response: {0}")]
    ParseError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A wait was cancelled before it completed
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

/// Specialized result type for SoftLayer operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AmbiguousState(_) => "AMBIGUOUS_STATE",
            Self::Timeout(_) => "TIMEOUT",
            Self::ResourcesAttached(_) => "RESOURCES_ATTACHED",
            Self::RemoteError { .. } => "REMOTE_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Cancelled(_) => "CANCELLED",
        }
    }

    /// Prefixes the error message with operation context, keeping the variant.
    #[must_use]
    pub fn with_context(self, context: impl Display) -> Self {
        match self {
            Self::ValidationError(msg) => Self::ValidationError(format!("{context}: {msg}")),
            Self::NotFound(msg) => Self::NotFound(format!("{context}: {msg}")),
            Self::AmbiguousState(msg) => Self::AmbiguousState(format!("{context}: {msg}")),
            Self::Timeout(msg) => Self::Timeout(format!("{context}: {msg}")),
            Self::ResourcesAttached(msg) => Self::ResourcesAttached(format!("{context}: {msg}")),
            Self::RemoteError { code, message } => Self::RemoteError {
                code,
                message: format!("{context}: {message}"),
            },
            Self::ServiceUnavailable(msg) => Self::ServiceUnavailable(format!("{context}: {msg}")),
            Self::HttpError(msg) => Self::HttpError(format!("{context}: {msg}")),
            Self::InvalidRequest(msg) => Self::InvalidRequest(format!("{context}: {msg}")),
            Self::ConfigError(msg) => Self::ConfigError(format!("{context}: {msg}")),
            Self::ParseError(msg) => Self::ParseError(format!("{context}: {msg}")),
            Self::InvalidEndpoint(msg) => Self::InvalidEndpoint(format!("{context}: {msg}")),
            Self::Cancelled(msg) => Self::Cancelled(format!("{context}: {msg}")),
        }
    }

    /// Returns true if the error is a not-found signal.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if billing cancellation was refused because servers remain on the VLAN.
    ///
    /// Clients that classify the API message return [`Error::ResourcesAttached`]; for anything
    /// else the remote message text is matched against [`RESOURCES_ATTACHED_PATTERN`].
    #[must_use]
    pub fn is_resources_attached(&self) -> bool {
        match self {
            Self::ResourcesAttached(_) => true,
            Self::RemoteError { message, .. } | Self::HttpError(message) => {
                message.contains(RESOURCES_ATTACHED_PATTERN)
            }
            _ => false,
        }
    }

    /// Returns true if a transport-level retry may succeed.
    ///
    /// Only timeouts and unavailability qualify; a rejected request stays rejected.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::ServiceUnavailable(_))
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousState(_) | Self::ConfigError(_) | Self::RemoteError { .. }
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
