//! Record operations: list, get, insert, update, delete.

use super::{unexpected, Roster};
use crate::{Command, Output, Result};
use roster_core::{ActiveFilter, FieldFilter, Patch, Record};

impl Roster {
    /// Records of a collection filtered by status, in default order.
    pub fn list(&self, collection: &str, active: ActiveFilter) -> Result<Vec<Record>> {
        self.list_where(collection, active, Vec::new())
    }

    /// Records matching the status filter and every equality filter.
    pub fn list_where(
        &self,
        collection: &str,
        active: ActiveFilter,
        filters: Vec<FieldFilter>,
    ) -> Result<Vec<Record>> {
        match self.executor.execute(Command::List {
            collection: collection.into(),
            active,
            filters,
        })? {
            Output::Records(rows) => Ok(rows),
            other => unexpected("List", other),
        }
    }

    /// One record.
    pub fn get(&self, collection: &str, id: &str) -> Result<Record> {
        match self.executor.execute(Command::Get {
            collection: collection.into(),
            id: id.into(),
        })? {
            Output::Record(row) => Ok(row),
            other => unexpected("Get", other),
        }
    }

    /// Insert a record; its identifier must be unused.
    pub fn insert(&self, collection: &str, record: Record) -> Result<Record> {
        match self.executor.execute(Command::Insert {
            collection: collection.into(),
            record,
        })? {
            Output::Record(row) => Ok(row),
            other => unexpected("Insert", other),
        }
    }

    /// Replace the fields named in `patch`.
    pub fn update(&self, collection: &str, id: &str, patch: Patch) -> Result<Record> {
        match self.executor.execute(Command::Update {
            collection: collection.into(),
            id: id.into(),
            patch,
        })? {
            Output::Record(row) => Ok(row),
            other => unexpected("Update", other),
        }
    }

    /// Remove a record.
    pub fn delete(&self, collection: &str, id: &str) -> Result<()> {
        match self.executor.execute(Command::Delete {
            collection: collection.into(),
            id: id.into(),
        })? {
            Output::Unit => Ok(()),
            other => unexpected("Delete", other),
        }
    }
}
