//! Per-entity list configuration

use crate::column::ColumnDef;
use crate::error::{ViewError, ViewResult};
use crate::state::SortState;
use roster_core::{Collection, NullOrder};
use serde::{Deserialize, Serialize};

/// Which fields the free-text filter inspects
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Every string field except the identifier and the status field
    #[default]
    AllText,
    /// Only the named fields
    Fields(Vec<String>),
}

/// Everything that distinguishes one entity page from another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Backend collection
    pub collection: Collection,
    /// Table columns in display order
    pub columns: Vec<ColumnDef>,
    /// Field driving the active/inactive filter, excluded from text search
    pub status_field: Option<String>,
    /// Fields the text filter inspects
    pub search: SearchScope,
    /// Initial client-side sort; `None` keeps backend order
    pub default_sort: Option<SortState>,
    /// Rows per page
    pub page_size: usize,
    /// Placement of null values
    pub null_order: NullOrder,
}

impl ListConfig {
    /// Configuration with no columns, `active` as status field, 10 rows per page
    pub fn new(collection: impl Into<Collection>) -> Self {
        ListConfig {
            collection: collection.into(),
            columns: Vec::new(),
            status_field: Some("active".to_string()),
            search: SearchScope::AllText,
            default_sort: None,
            page_size: 10,
            null_order: NullOrder::Last,
        }
    }

    /// Append a column (builder pattern)
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Set or clear the status field (builder pattern)
    pub fn status_field(mut self, field: Option<&str>) -> Self {
        self.status_field = field.map(str::to_string);
        self
    }

    /// Restrict text search to the given fields (builder pattern)
    pub fn search_fields(mut self, fields: &[&str]) -> Self {
        self.search = SearchScope::Fields(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    /// Set the initial sort (builder pattern)
    pub fn default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Set rows per page (builder pattern)
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set null placement (builder pattern)
    pub fn null_order(mut self, null_order: NullOrder) -> Self {
        self.null_order = null_order;
        self
    }

    /// Look up a column by key
    pub fn column_def(&self, key: &str) -> ViewResult<&ColumnDef> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| ViewError::UnknownColumn {
                column: key.to_string(),
            })
    }

    /// Look up a column that accepts header sorting
    pub fn sortable_column(&self, key: &str) -> ViewResult<&ColumnDef> {
        let column = self.column_def(key)?;
        if !column.sortable {
            return Err(ViewError::NotSortable {
                column: key.to_string(),
            });
        }
        Ok(column)
    }

    /// Check page size, duplicate keys and the default sort column
    pub fn validate(&self) -> ViewResult<()> {
        if self.page_size == 0 {
            return Err(ViewError::InvalidConfig {
                message: "page_size must be at least 1".to_string(),
            });
        }
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.key == column.key) {
                return Err(ViewError::InvalidConfig {
                    message: format!("duplicate column key '{}'", column.key),
                });
            }
        }
        if let Some(sort) = &self.default_sort {
            self.sortable_column(&sort.column)?;
        }
        Ok(())
    }
}
