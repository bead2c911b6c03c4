//! Records and record identifiers
//!
//! A [`Record`] is one row of a business entity: an immutable [`RecordId`]
//! plus a map of field name to [`Value`]. Updates are expressed as a
//! [`Patch`], which replaces only the fields it names.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Name of the identifier field as it appears in serialized rows
pub const ID_FIELD: &str = "id";

/// Unique record identifier
///
/// Identifiers are generated by the client before insertion. Any non-empty
/// token is accepted; [`RecordId::generate`] produces a random UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing token
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        RecordId(Uuid::new_v4().to_string())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for the empty token, which no backend accepts
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

/// One row of a collection
///
/// Serializes as a flat object with the identifier under `"id"`:
///
/// ```
/// use roster_core::Record;
///
/// let record = Record::new("c1").with("name", "Jean Tremblay").with("active", true);
/// let json = serde_json::to_string(&record).unwrap();
/// assert_eq!(json, r#"{"id":"c1","active":true,"name":"Jean Tremblay"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record with the given identifier
    pub fn new(id: impl Into<RecordId>) -> Self {
        Record {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Create an empty record with a freshly generated identifier
    pub fn generate() -> Self {
        Record::new(RecordId::generate())
    }

    /// Set a field (builder pattern)
    ///
    /// Setting `"id"` is ignored; identity is fixed at construction.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Record identifier
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Get a field value; `None` when the field is absent
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field value, returning the previous one
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        if field == ID_FIELD {
            return None;
        }
        self.fields.insert(field, value.into())
    }

    /// Remove a field entirely
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Iterate fields in name order (the identifier is not included)
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of non-identifier fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Read the `active` flag
    ///
    /// Returns `None` when the flag is null or missing.
    pub fn active(&self) -> Option<bool> {
        self.get("active").and_then(Value::as_bool)
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &Patch) {
        for (field, value) in patch.fields() {
            self.set(field, value.clone());
        }
    }
}

/// Partial update keyed by record identifier
///
/// Every field named in the patch replaces the stored value; fields not
/// named are left untouched. Setting a field to [`Value::Null`] clears it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch {
    fields: BTreeMap<String, Value>,
}

impl Patch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field replacement (builder pattern)
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Add a field replacement (mutating)
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Get a replacement value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Drop a replacement
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Iterate replacements in field order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check for an empty patch
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the patch that turns `from` into `to`
    ///
    /// Fields present in `from` but missing in `to` are cleared to null.
    pub fn diff(from: &Record, to: &Record) -> Self {
        let mut patch = Patch::new();
        for (field, value) in to.fields() {
            if from.get(field) != Some(value) {
                patch.insert(field, value.clone());
            }
        }
        for (field, _) in from.fields() {
            if to.get(field).is_none() {
                patch.insert(field, Value::Null);
            }
        }
        patch
    }
}
