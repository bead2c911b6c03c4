//! Backend engine for Roster
//!
//! - [`Backend`]: the request/response CRUD contract the list view consumes
//! - [`Database`]: the in-memory implementation, schema-checked and
//!   optionally read-only
//! - [`RosterConfig`]: `roster.toml` configuration
//! - [`Seeder`]: deterministic synthetic data

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod database;
pub mod schema;
pub mod seed;

pub use backend::{Backend, ListQuery};
pub use config::{RosterConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use database::Database;
pub use schema::{EntitySchema, FieldKind, FieldSpec, SchemaRegistry};
pub use seed::{SeedReport, Seeder};
