//! User-controlled view state
//!
//! [`ViewState`] holds every input the user can change on a list page. It is
//! plain data: serializable, comparable, and consumed by
//! [`derive_page`](crate::derive_page) without side effects.
//!
//! Changing the text query, the active filter or the sort resets the page
//! index to 0.

use crate::config::ListConfig;
use roster_core::{ActiveFilter, SortDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active client-side sort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column key
    pub column: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortState {
    /// Ascending sort on a column
    pub fn ascending(column: impl Into<String>) -> Self {
        SortState {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on a column
    pub fn descending(column: impl Into<String>) -> Self {
        SortState {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Inputs of one list page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Tri-state status filter, applied by the backend
    pub active: ActiveFilter,
    /// Free-text query, applied locally
    pub query: String,
    /// Client-side sort; `None` keeps backend order
    pub sort: Option<SortState>,
    /// Requested page index (clamped at derivation)
    pub page: usize,
    /// Columns currently hidden
    pub hidden_columns: BTreeSet<String>,
}

impl ViewState {
    /// Initial state for a page: default sort, default hidden columns
    pub fn for_config(config: &ListConfig) -> Self {
        ViewState {
            sort: config.default_sort.clone(),
            hidden_columns: config
                .columns
                .iter()
                .filter(|c| c.hidden_by_default)
                .map(|c| c.key.clone())
                .collect(),
            ..ViewState::default()
        }
    }

    /// Replace the text query
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.query = query;
            self.page = 0;
        }
    }

    /// Replace the status filter
    ///
    /// Returns true when the filter changed, meaning the snapshot must be
    /// refetched.
    pub fn set_active(&mut self, active: ActiveFilter) -> bool {
        if active == self.active {
            return false;
        }
        self.active = active;
        self.page = 0;
        true
    }

    /// Header click on a column
    ///
    /// The same column cycles unsorted, ascending, descending, unsorted; a
    /// different column starts ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = match self.sort.take() {
            Some(sort) if sort.column == column => match sort.direction {
                SortDirection::Ascending => Some(SortState::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::ascending(column)),
        };
        self.page = 0;
    }

    /// Set the sort explicitly
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 0;
        }
    }

    /// Advance one page; no-op on the last page
    ///
    /// Returns whether the index moved.
    pub fn next_page(&mut self, page_count: usize) -> bool {
        let current = self.page.min(page_count.saturating_sub(1));
        if current + 1 < page_count {
            self.page = current + 1;
            true
        } else {
            self.page = current;
            false
        }
    }

    /// Go back one page; no-op on the first page
    pub fn prev_page(&mut self, page_count: usize) -> bool {
        let current = self.page.min(page_count.saturating_sub(1));
        if current > 0 {
            self.page = current - 1;
            true
        } else {
            self.page = 0;
            false
        }
    }

    /// Jump to a page, clamped into range
    pub fn go_to_page(&mut self, page: usize, page_count: usize) {
        self.page = page.min(page_count.saturating_sub(1));
    }

    /// Show or hide a column; returns whether it is now visible
    pub fn toggle_column(&mut self, key: &str) -> bool {
        if self.hidden_columns.remove(key) {
            true
        } else {
            self.hidden_columns.insert(key.to_string());
            false
        }
    }

    /// Check column visibility
    pub fn is_visible(&self, key: &str) -> bool {
        !self.hidden_columns.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDef;

    #[test]
    fn test_sort_cycle_same_column() {
        let mut state = ViewState::default();
        state.toggle_sort("name");
        assert_eq!(state.sort, Some(SortState::ascending("name")));
        state.toggle_sort("name");
        assert_eq!(state.sort, Some(SortState::descending("name")));
        state.toggle_sort("name");
        assert_eq!(state.sort, None);
        state.toggle_sort("name");
        assert_eq!(state.sort, Some(SortState::ascending("name")));
    }

    #[test]
    fn test_sort_other_column_resets_to_ascending() {
        let mut state = ViewState::default();
        state.toggle_sort("name");
        state.toggle_sort("name");
        state.toggle_sort("city");
        assert_eq!(state.sort, Some(SortState::ascending("city")));
    }

    #[test]
    fn test_changes_reset_page() {
        let mut state = ViewState {
            page: 3,
            ..ViewState::default()
        };
        state.set_query("lav");
        assert_eq!(state.page, 0);

        state.page = 2;
        state.set_query("lav");
        assert_eq!(state.page, 2, "unchanged query keeps the page");

        assert!(state.set_active(ActiveFilter::Active));
        assert_eq!(state.page, 0);
        assert!(!state.set_active(ActiveFilter::Active));

        state.page = 2;
        state.toggle_sort("name");
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_page_navigation_is_clamped() {
        let mut state = ViewState::default();
        assert!(!state.prev_page(3));
        assert!(state.next_page(3));
        assert!(state.next_page(3));
        assert_eq!(state.page, 2);
        assert!(!state.next_page(3));
        assert_eq!(state.page, 2);

        state.go_to_page(10, 3);
        assert_eq!(state.page, 2);
        state.go_to_page(10, 0);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_stale_page_index_is_clamped_on_navigation() {
        // page count shrank after a refetch
        let mut state = ViewState {
            page: 7,
            ..ViewState::default()
        };
        assert!(state.prev_page(2));
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_for_config_hides_default_hidden_columns() {
        let config = ListConfig::new("clients")
            .column(ColumnDef::text("name", "Name"))
            .column(ColumnDef::text("alias", "Alias").hidden())
            .default_sort(SortState::ascending("name"));
        let mut state = ViewState::for_config(&config);
        assert!(state.is_visible("name"));
        assert!(!state.is_visible("alias"));
        assert_eq!(state.sort, Some(SortState::ascending("name")));

        assert!(state.toggle_column("alias"));
        assert!(state.is_visible("alias"));
        assert!(!state.toggle_column("alias"));
    }

    #[test]
    fn test_state_serializes() {
        let mut state = ViewState::default();
        state.set_active(ActiveFilter::Inactive);
        state.toggle_sort("name");
        let json = serde_json::to_string(&state).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
