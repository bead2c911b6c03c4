//! Commands accepted by the [`Executor`](crate::Executor)
//!
//! Commands are plain serializable data so they can be logged, replayed or
//! sent over a wire unchanged.

use roster_core::{ActiveFilter, Collection, FieldFilter, Patch, Record, RecordId};
use serde::{Deserialize, Serialize};

/// A request to the executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Liveness check
    Ping,
    /// Collection counts and access mode
    Info,
    /// Current configuration
    ConfigGet,
    /// Change the rows per page
    ConfigSetPageSize {
        /// New page size
        page_size: usize,
    },
    /// Fetch records, filtered by status and optional equality filters
    List {
        /// Target collection
        collection: Collection,
        /// Status filter
        #[serde(default)]
        active: ActiveFilter,
        /// Extra equality filters (for example `client_id`)
        #[serde(default)]
        filters: Vec<FieldFilter>,
    },
    /// Fetch one record
    Get {
        /// Target collection
        collection: Collection,
        /// Record identifier
        id: RecordId,
    },
    /// Insert a record
    Insert {
        /// Target collection
        collection: Collection,
        /// New record with a client-generated identifier
        record: Record,
    },
    /// Replace some fields of a record
    Update {
        /// Target collection
        collection: Collection,
        /// Record identifier
        id: RecordId,
        /// Fields to replace
        patch: Patch,
    },
    /// Remove a record
    Delete {
        /// Target collection
        collection: Collection,
        /// Record identifier
        id: RecordId,
    },
    /// Fill every collection with synthetic rows
    Seed {
        /// RNG seed
        seed: u64,
    },
}

impl Command {
    /// Check whether the command modifies data
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::ConfigSetPageSize { .. }
                | Command::Insert { .. }
                | Command::Update { .. }
                | Command::Delete { .. }
                | Command::Seed { .. }
        )
    }

    /// Variant name for logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::Info => "Info",
            Command::ConfigGet => "ConfigGet",
            Command::ConfigSetPageSize { .. } => "ConfigSetPageSize",
            Command::List { .. } => "List",
            Command::Get { .. } => "Get",
            Command::Insert { .. } => "Insert",
            Command::Update { .. } => "Update",
            Command::Delete { .. } => "Delete",
            Command::Seed { .. } => "Seed",
        }
    }
}
