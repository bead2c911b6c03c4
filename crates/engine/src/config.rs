//! Unified configuration (`roster.toml`)
//!
//! ```toml
//! page_size = 10
//! null_order = "last"
//! access_mode = "read_write"
//!
//! [default_sort.clients]
//! field = "company_name"
//! direction = "ascending"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use roster_core::{Collection, NullOrder, OrderBy, RosterError, RosterResult};
use roster_security::AccessMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default rows per page, matching the dashboard tables
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 1000;

/// Database and list-view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Rows per list page
    pub page_size: usize,
    /// Placement of null values when sorting
    pub null_order: NullOrder,
    /// Whether mutations are allowed
    pub access_mode: AccessMode,
    /// Per-collection overrides of the schema's default ordering
    pub default_sort: BTreeMap<String, OrderBy>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            page_size: DEFAULT_PAGE_SIZE,
            null_order: NullOrder::Last,
            access_mode: AccessMode::ReadWrite,
            default_sort: BTreeMap::new(),
        }
    }
}

impl RosterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> RosterResult<Self> {
        let config: RosterConfig = toml::from_str(s).map_err(|e| RosterError::Serialization {
            message: format!("invalid roster.toml: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> RosterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RosterError::invalid_input(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> RosterResult<String> {
        toml::to_string_pretty(self).map_err(|e| RosterError::Serialization {
            message: e.to_string(),
        })
    }

    /// Write to a file, replacing it
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RosterResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|e| {
            RosterError::invalid_input(format!("cannot write {}: {}", path.display(), e))
        })
    }

    /// Check value ranges
    pub fn validate(&self) -> RosterResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(RosterError::invalid_input(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        for (collection, order) in &self.default_sort {
            if order.field.trim().is_empty() {
                return Err(RosterError::invalid_input(format!(
                    "default_sort.{} has an empty field",
                    collection
                )));
            }
        }
        Ok(())
    }

    /// Configured ordering override for a collection
    pub fn default_sort_for(&self, collection: &Collection) -> Option<&OrderBy> {
        self.default_sort.get(collection.as_str())
    }
}
