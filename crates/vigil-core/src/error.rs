//! Error types for the vigil toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! input validation, backend (remote service) failures, and local durable
//! storage failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for vigil operations.
///
/// Callers can match on the variant to distinguish failures they can fix
/// locally (validation) from failures that need user-facing reporting
/// (backend, storage).
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any I/O was attempted.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Remote service failure (transport, auth rejection, API error).
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Local durable-store failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if this error originated in local input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Input validation errors.
///
/// These are always raised before any I/O; a validation error never
/// reaches a backend or the local store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Prayer content is empty or whitespace-only.
    #[error("prayer content must not be empty")]
    EmptyContent,

    /// A typed field failed format validation.
    #[error("invalid {field} '{value}': {reason}")]
    Field {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Remote service errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP-level failure.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// No authenticated session is available for this operation.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Credentials were rejected by the service.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session's tokens are no longer accepted.
    #[error("session expired")]
    SessionExpired,

    /// A structured error response from the service.
    #[error("{0}")]
    Api(ApiError),
}

/// A structured error response from the remote service.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code, if present.
    pub code: Option<String>,
    /// Error message from the service, if present.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if this is an authentication/authorization failure.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Backend(BackendError::Api(err))
    }
}

/// Local durable-store errors.
///
/// Read failures are normally degraded to an empty result by the guest
/// store; write failures surface to the submission caller.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading a key failed.
    #[error("storage read failed: {message}")]
    Read { message: String },

    /// Writing a key failed.
    #[error("storage write failed: {message}")]
    Write { message: String },

    /// A stored value could not be decoded.
    #[error("corrupt value under '{key}': {message}")]
    Corrupt { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_code_and_message() {
        let err = ApiError::new(
            403,
            Some("42501".to_string()),
            Some("permission denied".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 403 [42501]: permission denied");
    }

    #[test]
    fn api_error_auth_detection() {
        assert!(ApiError::new(401, None, None).is_auth_error());
        assert!(ApiError::new(403, None, None).is_auth_error());
        assert!(!ApiError::new(500, None, None).is_auth_error());
    }

    #[test]
    fn validation_variant_is_recognizable() {
        let err = Error::from(ValidationError::EmptyContent);
        assert!(err.is_validation());
    }
}
