//! Shared query and bookkeeping types
//!
//! - Collection: name of a backend table
//! - ActiveFilter: the tri-state active/inactive/all filter
//! - FieldFilter / OrderBy: the equality filter and ordering a list request carries
//! - Versioned: a stored value with its write version and timestamp

use crate::record::Record;
use crate::value::{SortDirection, Value};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a backend collection (table)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(String);

impl Collection {
    /// Client companies
    pub const CLIENTS: &'static str = "clients";
    /// People attached to a client
    pub const CONTACTS: &'static str = "contacts";
    /// Service contracts
    pub const CONTRACTS: &'static str = "contracts";
    /// Staff users
    pub const USERS: &'static str = "users";

    /// Create a collection name
    pub fn new(name: impl Into<String>) -> Self {
        Collection(name.into())
    }

    /// Get the name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Collection {
    fn from(s: &str) -> Self {
        Collection::new(s)
    }
}

impl From<String> for Collection {
    fn from(s: String) -> Self {
        Collection(s)
    }
}

/// Tri-state filter on the `active` flag
///
/// `All` does not filter. Records whose flag is null match neither
/// `Active` nor `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    /// No filtering
    #[default]
    All,
    /// Only `active = true`
    Active,
    /// Only `active = false`
    Inactive,
}

impl ActiveFilter {
    /// The flag value to match, if any
    pub fn as_flag(self) -> Option<bool> {
        match self {
            ActiveFilter::All => None,
            ActiveFilter::Active => Some(true),
            ActiveFilter::Inactive => Some(false),
        }
    }

    /// Check whether a record passes the filter
    pub fn matches(self, record: &Record) -> bool {
        match self.as_flag() {
            None => true,
            Some(flag) => record.active() == Some(flag),
        }
    }

    /// Convert into the equality filter sent to a backend
    pub fn to_field_filter(self) -> Option<FieldFilter> {
        self.as_flag().map(|flag| FieldFilter::eq("active", flag))
    }
}

impl From<Option<bool>> for ActiveFilter {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => ActiveFilter::All,
            Some(true) => ActiveFilter::Active,
            Some(false) => ActiveFilter::Inactive,
        }
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::All => write!(f, "all"),
            ActiveFilter::Active => write!(f, "active"),
            ActiveFilter::Inactive => write!(f, "inactive"),
        }
    }
}

impl FromStr for ActiveFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(ActiveFilter::All),
            "active" | "true" => Ok(ActiveFilter::Active),
            "inactive" | "false" => Ok(ActiveFilter::Inactive),
            other => Err(format!(
                "invalid status filter '{}': expected all, active or inactive",
                other
            )),
        }
    }
}

/// Equality filter on one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// Field to compare
    pub field: String,
    /// Value the field must equal
    pub value: Value,
}

impl FieldFilter {
    /// Build an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldFilter {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check a record against the filter
    ///
    /// Null never equals anything, matching SQL `=` semantics.
    pub fn matches(&self, record: &Record) -> bool {
        if self.value.is_null() {
            return false;
        }
        record.get(&self.field) == Some(&self.value)
    }
}

/// Ordering applied by a backend list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Field to order by
    pub field: String,
    /// Direction
    pub direction: SortDirection,
}

impl OrderBy {
    /// Ascending order on a field
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending order on a field
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// A stored value with write metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    /// The stored value
    pub value: T,
    /// Store-wide version assigned to the write
    pub version: u64,
    /// Write time, seconds since the Unix epoch
    pub timestamp: i64,
}

impl<T> Versioned<T> {
    /// Wrap a value written now at the given version
    pub fn new(value: T, version: u64) -> Self {
        Versioned {
            value,
            version,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Unwrap the stored value
    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_filter_from_option() {
        assert_eq!(ActiveFilter::from(None), ActiveFilter::All);
        assert_eq!(ActiveFilter::from(Some(true)), ActiveFilter::Active);
        assert_eq!(ActiveFilter::from(Some(false)), ActiveFilter::Inactive);
    }

    #[test]
    fn test_active_filter_parse() {
        assert_eq!("all".parse::<ActiveFilter>().unwrap(), ActiveFilter::All);
        assert_eq!("Active".parse::<ActiveFilter>().unwrap(), ActiveFilter::Active);
        assert_eq!("false".parse::<ActiveFilter>().unwrap(), ActiveFilter::Inactive);
        assert!("maybe".parse::<ActiveFilter>().is_err());
    }

    #[test]
    fn test_active_filter_null_matches_only_all() {
        let record = Record::new("x").with("active", Value::Null);
        assert!(ActiveFilter::All.matches(&record));
        assert!(!ActiveFilter::Active.matches(&record));
        assert!(!ActiveFilter::Inactive.matches(&record));
    }

    #[test]
    fn test_field_filter_null_never_matches() {
        let record = Record::new("x").with("client_id", Value::Null);
        assert!(!FieldFilter::eq("client_id", Value::Null).matches(&record));
        let record = Record::new("x").with("client_id", "c1");
        assert!(FieldFilter::eq("client_id", "c1").matches(&record));
    }

    #[test]
    fn test_active_to_field_filter() {
        assert!(ActiveFilter::All.to_field_filter().is_none());
        assert_eq!(
            ActiveFilter::Inactive.to_field_filter(),
            Some(FieldFilter::eq("active", false))
        );
    }
}
