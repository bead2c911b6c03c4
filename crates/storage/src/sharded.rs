//! Sharded record storage
//!
//! One shard per collection, keyed by record identifier.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, lock-free reads
//! - FxHashMap: O(1) lookups, fast non-crypto hash
//! - Per-collection: writes to `clients` never contend with `contracts`
//!
//! Ordering is not kept here; list operations return records in arbitrary
//! order and the caller sorts.

use dashmap::DashMap;
use roster_core::{Collection, Record, RecordId, Versioned};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-collection shard
#[derive(Debug)]
pub struct Shard {
    /// Records by identifier
    pub(crate) data: FxHashMap<RecordId, Versioned<Record>>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }

    /// Create a shard with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Get number of records in this shard
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Shard {
    fn default() -> Self {
        Self::new()
    }
}

/// Sharded storage - DashMap by Collection, HashMap within
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - get(): Lock-free read via DashMap
/// - put(): Only locks the target collection's shard
/// - Different collections never contend
///
/// # Example
///
/// ```ignore
/// use roster_storage::ShardedStore;
///
/// let store = ShardedStore::new();
/// let version = store.next_version();
/// store.put(&collection, Versioned::new(record, version));
/// ```
pub struct ShardedStore {
    /// Per-collection shards using DashMap
    shards: DashMap<Collection, Shard>,
    /// Global write version
    version: AtomicU64,
}

impl ShardedStore {
    /// Create new sharded store
    pub fn new() -> Self {
        Self {
            shards: DashMap::new(),
            version: AtomicU64::new(0),
        }
    }

    /// Create with expected number of collections
    pub fn with_capacity(num_collections: usize) -> Self {
        Self {
            shards: DashMap::with_capacity(num_collections),
            version: AtomicU64::new(0),
        }
    }

    /// Get current version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Increment version and return new value
    #[inline]
    pub fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Get number of shards (collections that have ever been written)
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Get total number of records across all shards
    pub fn total_entries(&self) -> usize {
        self.shards.iter().map(|entry| entry.value().len()).sum()
    }

    /// Get a record by identifier
    #[inline]
    pub fn get(&self, collection: &Collection, id: &RecordId) -> Option<Versioned<Record>> {
        self.shards
            .get(collection)
            .and_then(|shard| shard.data.get(id).cloned())
    }

    /// Store a record, replacing any previous version
    ///
    /// Returns the replaced entry, if any.
    #[inline]
    pub fn put(
        &self,
        collection: &Collection,
        record: Versioned<Record>,
    ) -> Option<Versioned<Record>> {
        let id = record.value.id().clone();
        self.shards
            .entry(collection.clone())
            .or_insert_with(Shard::new)
            .data
            .insert(id, record)
    }

    /// Store a record only if its identifier is free
    ///
    /// The check and the insert happen under the shard's write lock, so two
    /// concurrent inserts of the same identifier cannot both succeed.
    /// Returns `false` when the identifier is taken.
    pub fn put_if_absent(&self, collection: &Collection, record: Versioned<Record>) -> bool {
        let mut shard = self
            .shards
            .entry(collection.clone())
            .or_insert_with(Shard::new);
        let id = record.value.id().clone();
        if shard.data.contains_key(&id) {
            return false;
        }
        shard.data.insert(id, record);
        true
    }

    /// Replace an existing record through a closure
    ///
    /// Returns `None` when the record does not exist; otherwise the closure's
    /// result. The closure runs under the shard's write lock.
    pub fn update<F, T>(&self, collection: &Collection, id: &RecordId, f: F) -> Option<T>
    where
        F: FnOnce(&mut Versioned<Record>) -> T,
    {
        self.shards
            .get_mut(collection)
            .and_then(|mut shard| shard.data.get_mut(id).map(f))
    }

    /// Delete a record
    ///
    /// Returns the removed record if it existed.
    #[inline]
    pub fn delete(&self, collection: &Collection, id: &RecordId) -> Option<Versioned<Record>> {
        self.shards
            .get_mut(collection)
            .and_then(|mut shard| shard.data.remove(id))
    }

    /// Check if a record exists
    #[inline]
    pub fn contains(&self, collection: &Collection, id: &RecordId) -> bool {
        self.shards
            .get(collection)
            .map(|shard| shard.data.contains_key(id))
            .unwrap_or(false)
    }

    /// Copy out every record matching a predicate
    pub fn scan<F>(&self, collection: &Collection, mut predicate: F) -> Vec<Record>
    where
        F: FnMut(&Record) -> bool,
    {
        self.shards
            .get(collection)
            .map(|shard| {
                shard
                    .data
                    .values()
                    .filter(|v| predicate(&v.value))
                    .map(|v| v.value.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get count of records in a collection
    pub fn collection_entry_count(&self, collection: &Collection) -> usize {
        self.shards
            .get(collection)
            .map(|shard| shard.len())
            .unwrap_or(0)
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("shard_count", &self.shard_count())
            .field("version", &self.version())
            .field("total_entries", &self.total_entries())
            .finish()
    }
}
