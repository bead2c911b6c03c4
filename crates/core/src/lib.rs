//! Core types for Roster
//!
//! This crate defines the vocabulary every other layer speaks:
//! - Value: scalar field values and the shared sort comparator
//! - Record / RecordId / Patch: rows, identities and partial updates
//! - Collection, ActiveFilter, FieldFilter, OrderBy: list request types
//! - RosterError / RosterResult: backend error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod types;
pub mod value;

pub use error::{EntityRef, RosterError, RosterResult};
pub use record::{Patch, Record, RecordId, ID_FIELD};
pub use types::{ActiveFilter, Collection, FieldFilter, OrderBy, Versioned};
pub use value::{collate, compare_for_sort, NullOrder, SortDirection, Value};
