//! Record command handlers.
//!
//! List, Get, Insert, Update and Delete, dispatched to the record backend.

use std::sync::Arc;

use roster_core::{ActiveFilter, Collection, FieldFilter, Patch, Record, RecordId};
use roster_engine::ListQuery;

use crate::bridge::{validate_id, Backends};
use crate::convert::convert_result;
use crate::{Error, Output, Result};

/// Handle List command.
pub fn list(
    p: &Arc<Backends>,
    collection: Collection,
    active: ActiveFilter,
    filters: Vec<FieldFilter>,
) -> Result<Output> {
    let mut query = ListQuery::active(active);
    query.filters.extend(filters);
    let rows = convert_result(p.backend.list(&collection, &query))?;
    Ok(Output::Records(rows))
}

/// Handle Get command.
pub fn get(p: &Arc<Backends>, collection: Collection, id: RecordId) -> Result<Output> {
    validate_id(&id)?;
    let row = convert_result(p.backend.get(&collection, &id))?;
    Ok(Output::Record(row))
}

/// Handle Insert command.
pub fn insert(p: &Arc<Backends>, collection: Collection, record: Record) -> Result<Output> {
    validate_id(record.id())?;
    let row = convert_result(p.backend.insert(&collection, record))?;
    Ok(Output::Record(row))
}

/// Handle Update command.
pub fn update(
    p: &Arc<Backends>,
    collection: Collection,
    id: RecordId,
    patch: Patch,
) -> Result<Output> {
    validate_id(&id)?;
    if let Some(other) = patch.get(roster_core::ID_FIELD).and_then(|v| v.as_str()) {
        if other != id.as_str() {
            return Err(Error::InvalidInput {
                reason: format!("cannot change id of {} to {}", id, other),
            });
        }
    }
    let row = convert_result(p.backend.update(&collection, &id, &patch))?;
    Ok(Output::Record(row))
}

/// Handle Delete command.
pub fn delete(p: &Arc<Backends>, collection: Collection, id: RecordId) -> Result<Output> {
    validate_id(&id)?;
    convert_result(p.backend.delete(&collection, &id))?;
    Ok(Output::Unit)
}
