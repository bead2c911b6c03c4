//! Errors raised by the list-view engine

use thiserror::Error;

/// List-view error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Column key not present in the list configuration
    #[error("unknown column: {column}")]
    UnknownColumn {
        /// The requested key
        column: String,
    },

    /// Column exists but cannot be sorted on
    #[error("column is not sortable: {column}")]
    NotSortable {
        /// The requested key
        column: String,
    },

    /// Dialog action not valid in the current dialog state
    #[error("cannot {action} while the dialog is {state}")]
    InvalidTransition {
        /// Attempted action
        action: &'static str,
        /// Current state name
        state: &'static str,
    },

    /// A submission is already awaiting its response
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// List configuration is unusable
    #[error("invalid list configuration: {message}")]
    InvalidConfig {
        /// What is wrong
        message: String,
    },
}

/// Result type for list-view operations
pub type ViewResult<T> = std::result::Result<T, ViewError>;
