//! Command dispatch

use std::sync::Arc;

use roster_engine::{Backend, Database};
use tracing::debug;

use crate::bridge::Backends;
use crate::handlers;
use crate::{Command, Error, Output, Result};

/// Executes [`Command`]s against a database
///
/// Stateless apart from its handles: cloning the `Arc`s is all that is
/// needed to share one executor between sessions.
pub struct Executor {
    backends: Arc<Backends>,
}

impl Executor {
    /// Executor serving everything from one database
    pub fn new(db: Arc<Database>) -> Self {
        Executor {
            backends: Arc::new(Backends::new(db)),
        }
    }

    /// Executor whose record commands go to a separate backend
    pub fn with_backend(db: Arc<Database>, backend: Arc<dyn Backend>) -> Self {
        Executor {
            backends: Arc::new(Backends::with_backend(db, backend)),
        }
    }

    /// The administrative database
    pub fn database(&self) -> &Arc<Database> {
        &self.backends.db
    }

    /// Run one command
    pub fn execute(&self, command: Command) -> Result<Output> {
        if command.is_write() && !self.backends.db.access_mode().allows_writes() {
            return Err(Error::AccessDenied {
                reason: format!("{} requires write access", command.name()),
            });
        }
        debug!(target: "roster::executor", command = command.name(), "execute");

        let p = &self.backends;
        match command {
            Command::Ping => handlers::config::ping(),
            Command::Info => handlers::config::info(p),
            Command::ConfigGet => handlers::config::config_get(p),
            Command::ConfigSetPageSize { page_size } => {
                handlers::config::config_set_page_size(p, page_size)
            }
            Command::List {
                collection,
                active,
                filters,
            } => handlers::records::list(p, collection, active, filters),
            Command::Get { collection, id } => handlers::records::get(p, collection, id),
            Command::Insert { collection, record } => {
                handlers::records::insert(p, collection, record)
            }
            Command::Update {
                collection,
                id,
                patch,
            } => handlers::records::update(p, collection, id, patch),
            Command::Delete { collection, id } => handlers::records::delete(p, collection, id),
            Command::Seed { seed } => handlers::seed::seed(p, seed),
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("db", &self.backends.db)
            .finish()
    }
}
