//! Typed facade over the executor.
//!
//! [`Roster`] wraps an [`Executor`] and turns each command into a method
//! with a typed result, so callers never match on [`Output`] themselves.
//!
//! ```
//! use roster_executor::Roster;
//! use roster_core::{ActiveFilter, Record};
//!
//! let db = Roster::cache().unwrap();
//! db.insert("clients", Record::new("x1").with("name", "Alpha").with("active", true)).unwrap();
//! let rows = db.list("clients", ActiveFilter::Active).unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

mod db;
mod records;

use std::sync::Arc;

use roster_core::Collection;
use roster_engine::{Backend, Database};
use roster_security::OpenOptions;
use roster_view::ListConfig;

use crate::session::ListSession;
use crate::{pages, Error, Executor, Output, Result};

/// Typed client of one database
#[derive(Debug, Clone)]
pub struct Roster {
    executor: Arc<Executor>,
}

impl Roster {
    /// Empty in-memory database
    pub fn cache() -> Result<Self> {
        Ok(Self::from_database(Database::cache()?))
    }

    /// Database built from open options (config file, seed, access mode)
    pub fn open(options: &OpenOptions) -> Result<Self> {
        Ok(Self::from_database(Database::open(options)?))
    }

    /// Wrap an existing database
    pub fn from_database(db: Arc<Database>) -> Self {
        Roster {
            executor: Arc::new(Executor::new(db)),
        }
    }

    /// Serve records from a separate backend
    pub fn with_backend(db: Arc<Database>, backend: Arc<dyn Backend>) -> Self {
        Roster {
            executor: Arc::new(Executor::with_backend(db, backend)),
        }
    }

    /// Underlying executor
    pub fn executor(&self) -> &Arc<Executor> {
        &self.executor
    }

    /// List session for a built-in collection, using the configured page size
    pub fn session(&self, collection: &str) -> Result<ListSession> {
        let collection = Collection::new(collection);
        let config = self.executor.database().config();
        let page = pages::page_for(&collection, &config).ok_or_else(|| {
            Error::CollectionNotFound {
                collection: collection.to_string(),
            }
        })?;
        ListSession::new(self.executor.clone(), page)
    }

    /// List session for a custom page definition
    pub fn session_with(&self, config: ListConfig) -> Result<ListSession> {
        ListSession::new(self.executor.clone(), config)
    }
}

fn unexpected<T>(command: &str, output: Output) -> Result<T> {
    tracing::error!(target: "roster::executor", command, ?output, "unexpected output");
    Err(Error::unexpected_output(command))
}
