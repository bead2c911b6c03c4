//! Error conversion from internal error types.
//!
//! Maps backend ([`RosterError`]) and list-view ([`ViewError`]) errors onto
//! the executor's [`Error`].

use crate::Error;
use roster_core::{EntityRef, RosterError};
use roster_view::ViewError;

impl From<RosterError> for Error {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::NotFound { entity_ref } => match &entity_ref {
                EntityRef::Record { .. } => Error::RecordNotFound {
                    entity: entity_ref.to_string(),
                },
                EntityRef::Collection { collection } => Error::CollectionNotFound {
                    collection: collection.to_string(),
                },
            },

            RosterError::AlreadyExists { entity_ref } => Error::Conflict {
                reason: format!("{} already exists", entity_ref),
            },

            RosterError::InvalidInput { message } => Error::InvalidInput { reason: message },

            RosterError::Rejected { message } => Error::Rejected { reason: message },

            RosterError::ReadOnly => Error::AccessDenied {
                reason: "database is read-only".into(),
            },

            RosterError::Unavailable { message } => Error::Network { reason: message },

            RosterError::Serialization { message } => Error::Serialization { reason: message },

            RosterError::Internal { message } => Error::Internal { reason: message },
        }
    }
}

impl From<ViewError> for Error {
    fn from(err: ViewError) -> Self {
        match err {
            ViewError::UnknownColumn { .. }
            | ViewError::NotSortable { .. }
            | ViewError::InvalidTransition { .. }
            | ViewError::SubmissionInFlight => Error::InvalidInput {
                reason: err.to_string(),
            },
            ViewError::InvalidConfig { message } => Error::Internal { reason: message },
        }
    }
}

/// Convert a backend result to an executor Result.
pub fn convert_result<T>(result: roster_core::RosterResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
