//! Command execution layer for Roster
//!
//! - [`Command`] / [`Output`] / [`Executor`]: every backend operation as a
//!   serializable command, dispatched to a handler
//! - [`Error`] / [`ErrorKind`]: the error taxonomy callers react to
//! - [`ListSession`]: one entity list page with fetch sequencing, the edit
//!   dialog and mutation dispatch-and-refresh
//! - [`Roster`]: typed facade over the executor
//!
//! # Example
//!
//! ```
//! use roster_executor::Roster;
//! use roster_core::ActiveFilter;
//!
//! let db = Roster::cache().unwrap();
//! db.seed(42).unwrap();
//!
//! let mut clients = db.session("clients").unwrap();
//! clients.set_active(ActiveFilter::Active).unwrap();
//! clients.refresh().unwrap();
//! clients.toggle_sort("name").unwrap();
//! let page = clients.page();
//! assert!(page.page.items.len() <= 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
mod bridge;
mod command;
mod convert;
mod error;
mod executor;
mod handlers;
mod output;

pub mod notify;
pub mod pages;
pub mod session;
pub mod validate;

pub use api::Roster;
pub use bridge::Backends;
pub use command::Command;
pub use convert::convert_result;
pub use error::{Error, ErrorKind, Result};
pub use executor::Executor;
pub use notify::{Level, Notification};
pub use output::{CollectionInfo, DatabaseInfo, Output};
pub use session::{ListSession, MutationAction, PendingMutation};
