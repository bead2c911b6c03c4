//! Executor error type
//!
//! Every failure a caller can see is an [`Error`]. [`Error::kind`] sorts
//! them into the three classes the list view reacts to differently:
//! network failures and backend rejections become error notifications,
//! validation failures block a submission without reaching the backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Executor error
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum Error {
    /// Record does not exist
    #[error("record not found: {entity}")]
    RecordNotFound {
        /// `collection/id`
        entity: String,
    },

    /// Collection does not exist
    #[error("collection not found: {collection}")]
    CollectionNotFound {
        /// Collection name
        collection: String,
    },

    /// Identifier already taken
    #[error("conflict: {reason}")]
    Conflict {
        /// Details
        reason: String,
    },

    /// Form input refused before submission
    #[error("invalid value for '{field}': {reason}")]
    Validation {
        /// Offending field
        field: String,
        /// What is wrong
        reason: String,
    },

    /// Backend unreachable
    #[error("network failure: {reason}")]
    Network {
        /// Transport details
        reason: String,
    },

    /// Backend refused the request
    #[error("{reason}")]
    Rejected {
        /// Backend message, verbatim
        reason: String,
    },

    /// Write attempted without write access
    #[error("access denied: {reason}")]
    AccessDenied {
        /// Details
        reason: String,
    },

    /// Malformed command
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Details
        reason: String,
    },

    /// Encoding or decoding failure
    #[error("serialization error: {reason}")]
    Serialization {
        /// Details
        reason: String,
    },

    /// Bug or broken invariant
    #[error("internal error: {reason}")]
    Internal {
        /// Details
        reason: String,
    },
}

/// Failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failed; surfaced as a notification
    NetworkFailure,
    /// Local check failed; blocks submission
    ValidationFailure,
    /// Backend refused; surfaced verbatim as a notification
    BackendRejection,
    /// Bug
    Internal,
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network { .. } => ErrorKind::NetworkFailure,
            Error::Validation { .. } | Error::InvalidInput { .. } => ErrorKind::ValidationFailure,
            Error::RecordNotFound { .. }
            | Error::CollectionNotFound { .. }
            | Error::Conflict { .. }
            | Error::Rejected { .. }
            | Error::AccessDenied { .. } => ErrorKind::BackendRejection,
            Error::Serialization { .. } | Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for a validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unexpected_output(command: &str) -> Self {
        Error::Internal {
            reason: format!("Unexpected output for {}", command),
        }
    }
}

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
