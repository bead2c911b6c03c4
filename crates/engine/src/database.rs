//! In-memory database
//!
//! [`Database`] is the reference [`Backend`]: schema-checked CRUD over a
//! [`ShardedStore`], with list ordering taken from the request, the config
//! override, or the schema default (in that order).
//!
//! # Example
//!
//! ```ignore
//! let db = Database::cache()?;
//! db.insert(&"clients".into(), Record::new("x1").with("name", "Alpha"))?;
//! let rows = db.list(&"clients".into(), &ListQuery::active(ActiveFilter::Active))?;
//! ```

use crate::backend::{Backend, ListQuery};
use crate::config::RosterConfig;
use crate::schema::{EntitySchema, SchemaRegistry};
use crate::seed::{SeedReport, Seeder};
use parking_lot::RwLock;
use roster_core::{
    compare_for_sort, Collection, EntityRef, OrderBy, Patch, Record, RecordId, RosterError,
    RosterResult, Versioned, ID_FIELD,
};
use roster_security::{AccessMode, OpenOptions};
use roster_storage::ShardedStore;
use std::sync::Arc;
use tracing::{debug, info};

/// In-memory, schema-checked record database
pub struct Database {
    store: ShardedStore,
    schemas: RwLock<SchemaRegistry>,
    config: RwLock<RosterConfig>,
}

impl Database {
    /// Open an empty database with default configuration and the built-in schemas
    pub fn cache() -> RosterResult<Arc<Database>> {
        Self::with_config(RosterConfig::default())
    }

    /// Open an empty database with the given configuration
    pub fn with_config(config: RosterConfig) -> RosterResult<Arc<Database>> {
        config.validate()?;
        Ok(Arc::new(Database {
            store: ShardedStore::with_capacity(4),
            schemas: RwLock::new(SchemaRegistry::builtin()),
            config: RwLock::new(config),
        }))
    }

    /// Open a database from options
    ///
    /// Loads the config file if one is named, seeds synthetic rows if a
    /// seed is given, and only then applies read-only mode.
    pub fn open(options: &OpenOptions) -> RosterResult<Arc<Database>> {
        let mut config = match &options.config_path {
            Some(path) => RosterConfig::from_file(path)?,
            None => RosterConfig::default(),
        };
        let read_only = config.access_mode == AccessMode::ReadOnly
            || options.access_mode == AccessMode::ReadOnly;
        config.access_mode = AccessMode::ReadWrite;

        let db = Self::with_config(config)?;
        if let Some(seed) = options.seed {
            let report = Seeder::new(seed).seed_all(db.as_ref())?;
            info!(target: "roster::engine", seed, total = report.total(), "Seeded database");
        }
        if read_only {
            db.update_config(|cfg| cfg.access_mode = AccessMode::ReadOnly)?;
        }
        Ok(db)
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> RosterConfig {
        self.config.read().clone()
    }

    /// Modify the configuration; the change is rejected if it fails validation
    pub fn update_config<F>(&self, f: F) -> RosterResult<()>
    where
        F: FnOnce(&mut RosterConfig),
    {
        let mut guard = self.config.write();
        let mut next = guard.clone();
        f(&mut next);
        next.validate()?;
        *guard = next;
        Ok(())
    }

    /// Current access mode
    pub fn access_mode(&self) -> AccessMode {
        self.config.read().access_mode
    }

    /// Add or replace a collection schema
    pub fn register_schema(&self, schema: EntitySchema) {
        self.schemas.write().register(schema);
    }

    /// Schema of a collection
    pub fn schema(&self, collection: &Collection) -> RosterResult<EntitySchema> {
        self.schemas
            .read()
            .get(collection)
            .cloned()
            .ok_or_else(|| RosterError::not_found(EntityRef::collection(collection.clone())))
    }

    /// Registered collection names
    pub fn collections(&self) -> Vec<Collection> {
        self.schemas.read().collections().cloned().collect()
    }

    /// Number of stored records in a collection
    pub fn count(&self, collection: &Collection) -> usize {
        self.store.collection_entry_count(collection)
    }

    /// Seed synthetic rows
    pub fn seed(&self, seed: u64) -> RosterResult<SeedReport> {
        Seeder::new(seed).seed_all(self)
    }

    fn require_writable(&self) -> RosterResult<()> {
        if self.access_mode().allows_writes() {
            Ok(())
        } else {
            Err(RosterError::ReadOnly)
        }
    }

    fn effective_order(&self, schema: &EntitySchema, query: &ListQuery) -> OrderBy {
        if let Some(order) = &query.order {
            return order.clone();
        }
        self.config
            .read()
            .default_sort_for(&schema.collection)
            .cloned()
            .unwrap_or_else(|| schema.default_order.clone())
    }
}

impl Backend for Database {
    fn list(&self, collection: &Collection, query: &ListQuery) -> RosterResult<Vec<Record>> {
        let schema = self.schema(collection)?;
        for filter in &query.filters {
            if schema.field(&filter.field).is_none() {
                return Err(RosterError::rejected(format!(
                    "column {}.{} does not exist",
                    collection, filter.field
                )));
            }
        }

        let order = self.effective_order(&schema, query);
        let nulls = self.config.read().null_order;
        let mut rows = self.store.scan(collection, |r| query.matches(r));
        rows.sort_by(|a, b| {
            compare_for_sort(a.get(&order.field), b.get(&order.field), order.direction, nulls)
                .then_with(|| a.id().cmp(b.id()))
        });

        debug!(
            target: "roster::engine",
            collection = %collection,
            filters = query.filters.len(),
            rows = rows.len(),
            "list"
        );
        Ok(rows)
    }

    fn get(&self, collection: &Collection, id: &RecordId) -> RosterResult<Record> {
        self.schema(collection)?;
        self.store
            .get(collection, id)
            .map(Versioned::into_value)
            .ok_or_else(|| RosterError::not_found(EntityRef::record(collection.clone(), id.clone())))
    }

    fn insert(&self, collection: &Collection, record: Record) -> RosterResult<Record> {
        let schema = self.schema(collection)?;
        self.require_writable()?;
        if record.id().is_empty() {
            return Err(RosterError::invalid_input("record identifier must not be empty"));
        }
        schema.check_record(&record)?;

        let version = self.store.next_version();
        if !self
            .store
            .put_if_absent(collection, Versioned::new(record.clone(), version))
        {
            return Err(RosterError::already_exists(EntityRef::record(
                collection.clone(),
                record.id().clone(),
            )));
        }
        debug!(target: "roster::engine", collection = %collection, id = %record.id(), version, "insert");
        Ok(record)
    }

    fn update(
        &self,
        collection: &Collection,
        id: &RecordId,
        patch: &Patch,
    ) -> RosterResult<Record> {
        let schema = self.schema(collection)?;
        self.require_writable()?;
        if let Some(new_id) = patch.get(ID_FIELD) {
            if new_id.as_str() != Some(id.as_str()) {
                return Err(RosterError::invalid_input(format!(
                    "record identifier is immutable ({} -> {})",
                    id, new_id
                )));
            }
        }
        let mut checked = patch.clone();
        checked.remove(ID_FIELD);
        schema.check_patch(&checked)?;

        let version = self.store.next_version();
        let updated = self
            .store
            .update(collection, id, |entry| {
                entry.value.apply(&checked);
                entry.version = version;
                entry.timestamp = chrono::Utc::now().timestamp();
                entry.value.clone()
            })
            .ok_or_else(|| RosterError::not_found(EntityRef::record(collection.clone(), id.clone())))?;
        debug!(target: "roster::engine", collection = %collection, id = %id, version, "update");
        Ok(updated)
    }

    fn delete(&self, collection: &Collection, id: &RecordId) -> RosterResult<()> {
        self.schema(collection)?;
        self.require_writable()?;
        match self.store.delete(collection, id) {
            Some(_) => {
                debug!(target: "roster::engine", collection = %collection, id = %id, "delete");
                Ok(())
            }
            None => Err(RosterError::not_found(EntityRef::record(
                collection.clone(),
                id.clone(),
            ))),
        }
    }

    fn upsert(&self, collection: &Collection, record: Record) -> RosterResult<Record> {
        let schema = self.schema(collection)?;
        self.require_writable()?;
        if record.id().is_empty() {
            return Err(RosterError::invalid_input("record identifier must not be empty"));
        }
        schema.check_record(&record)?;
        let version = self.store.next_version();
        self.store
            .put(collection, Versioned::new(record.clone(), version));
        Ok(record)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("store", &self.store)
            .field("access_mode", &self.access_mode())
            .finish()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use roster_core::{ActiveFilter, Value};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn list_returns_exactly_the_matching_rows_in_order(
            rows in prop::collection::vec(("[A-Za-z]{1,8}", prop::option::of(any::<bool>())), 0..30),
            filter in prop_oneof![
                Just(ActiveFilter::All),
                Just(ActiveFilter::Active),
                Just(ActiveFilter::Inactive),
            ],
        ) {
            let db = Database::cache().unwrap();
            let clients = Collection::new(Collection::CLIENTS);
            for (i, (name, active)) in rows.iter().enumerate() {
                let record = Record::new(format!("r{:02}", i))
                    .with("name", name.as_str())
                    .with("active", Value::from(*active));
                db.insert(&clients, record).unwrap();
            }

            let listed = db.list(&clients, &ListQuery::active(filter)).unwrap();
            let expected = rows
                .iter()
                .filter(|(_, active)| match filter {
                    ActiveFilter::All => true,
                    ActiveFilter::Active => *active == Some(true),
                    ActiveFilter::Inactive => *active == Some(false),
                })
                .count();
            prop_assert_eq!(listed.len(), expected);
            for pair in listed.windows(2) {
                let ord = compare_for_sort(
                    pair[0].get("name"),
                    pair[1].get("name"),
                    roster_core::SortDirection::Ascending,
                    roster_core::NullOrder::Last,
                );
                prop_assert_ne!(ord, std::cmp::Ordering::Greater);
            }
        }
    }
}
