//! Public types for the Roster API.
//!
//! This module re-exports types from the internal crates under one path.

// ============================================================================
// Records and values
// ============================================================================

pub use roster_core::{Patch, Record, RecordId, Value, ID_FIELD};

// Query vocabulary
pub use roster_core::{ActiveFilter, Collection, FieldFilter, NullOrder, OrderBy, SortDirection};

// Backend errors
pub use roster_core::{EntityRef, RosterError, RosterResult};

// ============================================================================
// Engine
// ============================================================================

pub use roster_engine::{
    Backend, Database, EntitySchema, FieldKind, ListQuery, RosterConfig, SeedReport,
};

// Open options
pub use roster_security::{AccessMode, OpenOptions};

// ============================================================================
// List view
// ============================================================================

pub use roster_view::{
    ColumnDef, ColumnKind, DerivedPage, DialogMode, EditDialog, FetchTicket, ListConfig, Page,
    SearchScope, SortState, ViewState,
};
