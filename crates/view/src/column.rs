//! Column definitions and the display adapter

use roster_core::{Record, Value};
use serde::{Deserialize, Serialize};

/// How a column's values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free text
    Text,
    /// Numeric amount
    Number,
    /// Yes/No flag
    Bool,
    /// Active/Inactive status flag
    Status,
    /// ISO date string
    Date,
}

/// One table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Record field shown in this column
    pub key: String,
    /// Header label
    pub label: String,
    /// Rendering kind
    pub kind: ColumnKind,
    /// Whether clicking the header sorts
    pub sortable: bool,
    /// Hidden until the user toggles it on
    pub hidden_by_default: bool,
}

impl ColumnDef {
    /// Sortable, visible column of the given kind
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: ColumnKind) -> Self {
        ColumnDef {
            key: key.into(),
            label: label.into(),
            kind,
            sortable: true,
            hidden_by_default: false,
        }
    }

    /// Text column
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnKind::Text)
    }

    /// Number column
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnKind::Number)
    }

    /// Date column
    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnKind::Date)
    }

    /// Status column
    pub fn status(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, ColumnKind::Status)
    }

    /// Hide until toggled (builder pattern)
    pub fn hidden(mut self) -> Self {
        self.hidden_by_default = true;
        self
    }

    /// Disable header sorting (builder pattern)
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Render this column's cell for a record
    pub fn render(&self, record: &Record) -> String {
        display_value(record.get(&self.key), self.kind)
    }
}

/// Render a field value for a table cell
///
/// Missing and null values render as `-`.
pub fn display_value(value: Option<&Value>, kind: ColumnKind) -> String {
    match (value, kind) {
        (None, _) | (Some(Value::Null), _) => "-".to_string(),
        (Some(Value::Bool(b)), ColumnKind::Status) => {
            if *b { "Active" } else { "Inactive" }.to_string()
        }
        (Some(Value::Bool(b)), _) => if *b { "Yes" } else { "No" }.to_string(),
        (Some(Value::String(s)), _) if s.is_empty() => "-".to_string(),
        // f64 Display already drops trailing zeros
        (Some(v), _) => v.to_string(),
    }
}
