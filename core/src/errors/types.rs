//! Error type definitions for the authentication and session core
//!
//! The fine-grained variants exist for internal observability only.
//! Everything a caller sees collapses to one of two coarse outcomes
//! (`UNAUTHENTICATED` or `INVALID_CREDENTIALS`) via [`ErrorResponse`],
//! so error shape cannot be used as an oracle to probe the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DomainError;

/// Authentication-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Login rejected. Deliberately does not say whether the subject was
    /// unknown or the secret was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The caller presented no credential, or one that failed
    /// verification for any reason.
    #[error("Unauthenticated")]
    Unauthenticated,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Wrong token purpose: expected {expected}")]
    WrongPurpose { expected: crate::domain::entities::TokenPurpose },

    #[error("Refresh token reuse detected")]
    RefreshReused,

    #[error("Subject is no longer active")]
    SubjectInactive,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Unified error response structure surfaced at the application boundary
///
/// The `error` code is always one of `UNAUTHENTICATED` or
/// `INVALID_CREDENTIALS`; the fine-grained cause stays in the logs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Coarse error code for programmatic handling
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Auth(AuthError::InvalidCredentials) => {
                ErrorResponse::new("INVALID_CREDENTIALS", "Incorrect username or password")
            }
            // Token failures, storage failures, and everything else leave
            // the caller with the same recourse: authenticate again.
            _ => ErrorResponse::new("UNAUTHENTICATED", "Could not validate credentials"),
        }
    }
}
