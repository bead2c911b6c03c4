//! Engine handles shared by every handler

use roster_core::RecordId;
use roster_engine::{Backend, Database};
use std::sync::Arc;

use crate::{Error, Result};

/// What handlers dispatch to
///
/// `db` answers administrative commands (info, config, seed). `backend`
/// serves record reads and writes; it is the database itself unless a
/// different [`Backend`] was supplied.
pub struct Backends {
    /// Configuration, schemas and counts
    pub db: Arc<Database>,
    /// Record CRUD
    pub backend: Arc<dyn Backend>,
}

impl Backends {
    /// Serve everything from one database
    pub fn new(db: Arc<Database>) -> Self {
        let backend: Arc<dyn Backend> = db.clone();
        Backends { db, backend }
    }

    /// Serve records from a separate backend
    pub fn with_backend(db: Arc<Database>, backend: Arc<dyn Backend>) -> Self {
        Backends { db, backend }
    }
}

/// Refuse empty identifiers before they reach a backend
pub fn validate_id(id: &RecordId) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidInput {
            reason: "record id must not be empty".into(),
        });
    }
    Ok(())
}
