//! Results returned by the [`Executor`](crate::Executor)

use roster_core::Record;
use roster_engine::{RosterConfig, SeedReport};
use roster_security::AccessMode;
use serde::{Deserialize, Serialize};

/// Row count of one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,
    /// Stored rows
    pub count: usize,
}

/// Database summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Crate version
    pub version: String,
    /// Whether writes are accepted
    pub access_mode: AccessMode,
    /// Known collections
    pub collections: Vec<CollectionInfo>,
}

/// Command result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// No payload
    Unit,
    /// Answer to `Ping`
    Pong {
        /// Crate version
        version: String,
    },
    /// Answer to `Info`
    DatabaseInfo(DatabaseInfo),
    /// Answer to `ConfigGet`
    Config(RosterConfig),
    /// Ordered rows
    Records(Vec<Record>),
    /// One stored row
    Record(Record),
    /// Answer to `Seed`
    Seeded(SeedReport),
}
