//! Access control and open options for Roster.
//!
//! This crate provides the [`AccessMode`] and [`OpenOptions`] types used to
//! control how a database is opened and whether mutations are permitted.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Controls whether the database allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Allow both reads and writes (default).
    #[default]
    ReadWrite,
    /// Read-only mode: create, update and delete are refused.
    ReadOnly,
}

impl AccessMode {
    /// Check whether mutations are allowed.
    pub fn allows_writes(self) -> bool {
        matches!(self, AccessMode::ReadWrite)
    }
}

/// Options for opening a database.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use roster_security::{AccessMode, OpenOptions};
///
/// let opts = OpenOptions::new()
///     .access_mode(AccessMode::ReadOnly)
///     .seed(42);
/// assert!(!opts.access_mode.allows_writes());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// The access mode for the database.
    ///
    /// Read-only here or in the config file makes the database read-only.
    pub access_mode: AccessMode,
    /// Path to a `roster.toml` configuration file.
    pub config_path: Option<PathBuf>,
    /// Populate the database with synthetic rows from this RNG seed.
    pub seed: Option<u64>,
}

impl OpenOptions {
    /// Create a new `OpenOptions` with default settings (read-write mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode for the database.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Load configuration from a TOML file.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Seed synthetic data on open.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
