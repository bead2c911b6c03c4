//! Roster: record list views over a CRUD backend
//!
//! One list-view engine serves the client, contact, contract and user pages
//! of a small business-administration dashboard: status filter, free-text
//! search, column sort, pagination, and a create/edit dialog whose writes
//! are followed by a refetch.
//!
//! # Quick start
//!
//! ```
//! use roster::{ActiveFilter, Record, Roster};
//!
//! let db = Roster::cache()?;
//! db.insert("clients", Record::new("b").with("name", "Bravo").with("active", true))?;
//! db.insert("clients", Record::new("a").with("name", "Alpha").with("active", false))?;
//! db.insert("clients", Record::new("c").with("name", "Charlie").with("active", true))?;
//!
//! let mut clients = db.session("clients")?;
//! clients.set_active(ActiveFilter::Active)?;
//! clients.toggle_sort("name")?;
//!
//! let page = clients.page();
//! let names: Vec<String> = page.rows().into_iter().map(|row| row[0].clone()).collect();
//! assert_eq!(names, ["Bravo", "Charlie"]);
//! # Ok::<(), roster::Error>(())
//! ```
//!
//! # Layers
//!
//! | crate | role |
//! |-------|------|
//! | `roster-core` | values, records, errors, the sort comparator |
//! | `roster-storage` | sharded in-memory store |
//! | `roster-engine` | `Backend` trait, `Database`, schemas, config, seeding |
//! | `roster-view` | pure list-view derivation and dialog state |
//! | `roster-executor` | commands, sessions, notifications, the `Roster` facade |

#![warn(missing_docs)]

mod types;

pub use types::*;

pub use roster_executor::{
    Command, Error, ErrorKind, Executor, Level, ListSession, Notification, Output, Result, Roster,
};

/// Pure list-view functions, usable without a backend
pub mod view {
    pub use roster_view::{derive_page, filter_records, paginate, sort_records, FetchSequencer};
}
