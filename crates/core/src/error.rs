//! Error types shared by every Roster layer
//!
//! Backends report failures as [`RosterError`]. The executor maps these to
//! its own error type and classifies them for user-facing notifications.

use crate::record::RecordId;
use crate::types::Collection;
use std::fmt;
use thiserror::Error;

/// Reference to the entity an error is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A whole collection
    Collection {
        /// Collection name
        collection: Collection,
    },
    /// One record in a collection
    Record {
        /// Collection name
        collection: Collection,
        /// Record identifier
        id: RecordId,
    },
}

impl EntityRef {
    /// Reference a collection
    pub fn collection(collection: impl Into<Collection>) -> Self {
        EntityRef::Collection {
            collection: collection.into(),
        }
    }

    /// Reference a record
    pub fn record(collection: impl Into<Collection>, id: impl Into<RecordId>) -> Self {
        EntityRef::Record {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Collection { collection } => write!(f, "collection '{}'", collection),
            EntityRef::Record { collection, id } => write!(f, "{}/{}", collection, id),
        }
    }
}

/// Errors raised by backends and core operations
#[derive(Debug, Error)]
pub enum RosterError {
    /// Entity does not exist
    #[error("not found: {entity_ref}")]
    NotFound {
        /// What was looked up
        entity_ref: EntityRef,
    },

    /// Insert collided with an existing identifier
    #[error("already exists: {entity_ref}")]
    AlreadyExists {
        /// What collided
        entity_ref: EntityRef,
    },

    /// Malformed request (empty id, bad field name)
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Details
        message: String,
    },

    /// Backend refused the write (constraint or type violation)
    #[error("rejected by backend: {message}")]
    Rejected {
        /// Backend's message, surfaced verbatim
        message: String,
    },

    /// Write attempted on a read-only database
    #[error("database is read-only")]
    ReadOnly,

    /// Backend could not be reached
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Transport-level details
        message: String,
    },

    /// Encoding or decoding failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Details
        message: String,
    },

    /// Bug or broken invariant
    #[error("internal error: {message}")]
    Internal {
        /// Details
        message: String,
    },
}

/// Result alias for core operations
pub type RosterResult<T> = Result<T, RosterError>;

impl RosterError {
    /// Entity not found
    pub fn not_found(entity_ref: EntityRef) -> Self {
        RosterError::NotFound { entity_ref }
    }

    /// Identifier already taken
    pub fn already_exists(entity_ref: EntityRef) -> Self {
        RosterError::AlreadyExists { entity_ref }
    }

    /// Malformed request
    pub fn invalid_input(message: impl Into<String>) -> Self {
        RosterError::InvalidInput {
            message: message.into(),
        }
    }

    /// Backend rejection
    pub fn rejected(message: impl Into<String>) -> Self {
        RosterError::Rejected {
            message: message.into(),
        }
    }

    /// Transport failure
    pub fn unavailable(message: impl Into<String>) -> Self {
        RosterError::Unavailable {
            message: message.into(),
        }
    }

    /// Internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        RosterError::Internal {
            message: message.into(),
        }
    }

    /// Check for a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::NotFound { .. })
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        RosterError::Serialization {
            message: e.to_string(),
        }
    }
}
