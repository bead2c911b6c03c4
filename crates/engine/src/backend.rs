//! Backend contract
//!
//! The list view talks to its data source only through [`Backend`]: a
//! request/response CRUD service over named collections. The bundled
//! [`Database`](crate::Database) implements it in memory; a hosted service
//! client would implement the same trait.
//!
//! ## Error Handling
//!
//! | Condition | Error |
//! |-----------|-------|
//! | Unknown collection | `NotFound` (collection) |
//! | `get`/`update`/`delete` on a missing id | `NotFound` (record) |
//! | `insert` with a taken id | `AlreadyExists` |
//! | Constraint or type violation | `Rejected` |
//! | Transport failure | `Unavailable` |

use roster_core::{
    ActiveFilter, Collection, FieldFilter, OrderBy, Patch, Record, RecordId, RosterResult,
};
use serde::{Deserialize, Serialize};

/// Filter and ordering of a list request
///
/// All filters must match (logical AND). When `order` is `None` the backend
/// applies the collection's default ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Equality filters
    pub filters: Vec<FieldFilter>,
    /// Explicit ordering
    pub order: Option<OrderBy>,
}

impl ListQuery {
    /// Unfiltered query in default order
    pub fn new() -> Self {
        Self::default()
    }

    /// Query restricted by the tri-state active filter
    pub fn active(filter: ActiveFilter) -> Self {
        ListQuery {
            filters: filter.to_field_filter().into_iter().collect(),
            order: None,
        }
    }

    /// Add an equality filter (builder pattern)
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<roster_core::Value>) -> Self {
        self.filters.push(FieldFilter::eq(field, value));
        self
    }

    /// Set explicit ordering (builder pattern)
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Check a record against every filter
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// Request/response CRUD service over named collections
pub trait Backend: Send + Sync {
    /// All records matching the query, ordered
    fn list(&self, collection: &Collection, query: &ListQuery) -> RosterResult<Vec<Record>>;

    /// One record by identifier
    fn get(&self, collection: &Collection, id: &RecordId) -> RosterResult<Record>;

    /// Insert a record with a client-generated identifier
    ///
    /// Returns the stored row.
    fn insert(&self, collection: &Collection, record: Record) -> RosterResult<Record>;

    /// Replace the fields named in `patch`
    ///
    /// Returns the stored row after the update.
    fn update(&self, collection: &Collection, id: &RecordId, patch: &Patch)
        -> RosterResult<Record>;

    /// Remove a record
    fn delete(&self, collection: &Collection, id: &RecordId) -> RosterResult<()>;

    /// Insert, or overwrite every field of an existing row
    ///
    /// The default implementation is two calls and therefore not atomic.
    fn upsert(&self, collection: &Collection, record: Record) -> RosterResult<Record> {
        match self.get(collection, record.id()) {
            Ok(existing) => {
                let patch = Patch::diff(&existing, &record);
                self.update(collection, record.id(), &patch)
            }
            Err(e) if e.is_not_found() => self.insert(collection, record),
            Err(e) => Err(e),
        }
    }
}
