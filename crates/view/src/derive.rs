//! Pure page derivation

use crate::column::ColumnDef;
use crate::config::ListConfig;
use crate::filter::filter_records;
use crate::paginate::{paginate, Page};
use crate::sort::sort_records;
use crate::state::ViewState;
use roster_core::{Record, RecordId};
use serde::{Deserialize, Serialize};

/// What a list page displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPage {
    /// Current page of filtered, sorted rows
    pub page: Page<Record>,
    /// Visible columns in display order
    pub columns: Vec<ColumnDef>,
    /// Rows in the snapshot before the text filter
    pub fetched: usize,
}

impl DerivedPage {
    /// Nothing to show: the empty-state flag
    pub fn is_empty(&self) -> bool {
        self.page.total == 0
    }

    /// Rows after the text filter
    pub fn matched(&self) -> usize {
        self.page.total
    }

    /// Identifiers on this page, in order
    pub fn ids(&self) -> Vec<&RecordId> {
        self.page.items.iter().map(Record::id).collect()
    }

    /// Header labels of the visible columns
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Rendered cells, one row per record
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.page
            .items
            .iter()
            .map(|record| self.columns.iter().map(|c| c.render(record)).collect())
            .collect()
    }
}

/// Derive the displayed page from a snapshot
///
/// Applies the text filter, then the sort (if any), then pagination. The
/// snapshot is not modified.
pub fn derive_page(snapshot: &[Record], state: &ViewState, config: &ListConfig) -> DerivedPage {
    let filtered = filter_records(snapshot, &state.query, config);
    let ordered = match &state.sort {
        Some(sort) => sort_records(filtered, sort, config.null_order),
        None => filtered,
    };
    let page = paginate(&ordered, state.page, config.page_size).map(Record::clone);
    let columns = config
        .columns
        .iter()
        .filter(|c| state.is_visible(&c.key))
        .cloned()
        .collect();

    DerivedPage {
        page,
        columns,
        fetched: snapshot.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDef;
    use crate::state::SortState;

    fn setup() -> (Vec<Record>, ListConfig) {
        let rows = (1..=12)
            .map(|i| {
                Record::new(format!("c{:02}", i))
                    .with("name", format!("Client {:02}", i))
                    .with("alias", format!("A{}", i))
                    .with("active", i % 2 == 0)
            })
            .collect();
        let config = ListConfig::new("clients")
            .column(ColumnDef::text("name", "Name"))
            .column(ColumnDef::text("alias", "Alias").hidden())
            .column(ColumnDef::status("active", "Status"))
            .page_size(5);
        (rows, config)
    }

    #[test]
    fn test_first_page_in_snapshot_order() {
        let (rows, config) = setup();
        let derived = derive_page(&rows, &ViewState::for_config(&config), &config);
        assert_eq!(derived.page.page_count, 3);
        assert_eq!(derived.fetched, 12);
        assert_eq!(derived.ids()[0].as_str(), "c01");
        assert_eq!(derived.headers(), vec!["Name", "Status"]);
        assert_eq!(derived.rows()[0], vec!["Client 01", "Inactive"]);
    }

    #[test]
    fn test_unbounded_page_size_shows_everything() {
        let (rows, config) = setup();
        let config = config.page_size(usize::MAX);
        config.validate().unwrap();
        let derived = derive_page(&rows, &ViewState::for_config(&config), &config);
        assert_eq!(derived.page.page_count, 1);
        assert_eq!(derived.page.items.len(), 12);
    }

    #[test]
    fn test_sorted_descending() {
        let (rows, config) = setup();
        let state = ViewState {
            sort: Some(SortState::descending("name")),
            ..ViewState::for_config(&config)
        };
        let derived = derive_page(&rows, &state, &config);
        assert_eq!(derived.ids()[0].as_str(), "c12");
    }

    #[test]
    fn test_query_then_paginate() {
        let (rows, config) = setup();
        let mut state = ViewState::for_config(&config);
        state.set_query("client 1");
        let derived = derive_page(&rows, &state, &config);
        assert_eq!(derived.matched(), 3);
        assert_eq!(derived.page.page_count, 1);
    }

    #[test]
    fn test_no_match_is_empty_state() {
        let (rows, config) = setup();
        let mut state = ViewState::for_config(&config);
        state.set_query("zzz");
        let derived = derive_page(&rows, &state, &config);
        assert!(derived.is_empty());
        assert_eq!(derived.fetched, 12);
    }

    #[test]
    fn test_out_of_range_page_clamped() {
        let (rows, config) = setup();
        let state = ViewState {
            page: 40,
            ..ViewState::for_config(&config)
        };
        let derived = derive_page(&rows, &state, &config);
        assert_eq!(derived.page.index, 2);
        assert_eq!(derived.page.items.len(), 2);
    }

    #[test]
    fn test_derivation_is_pure() {
        let (rows, config) = setup();
        let state = ViewState {
            sort: Some(SortState::ascending("alias")),
            ..ViewState::for_config(&config)
        };
        let before = rows.clone();
        let a = derive_page(&rows, &state, &config);
        let b = derive_page(&rows, &state, &config);
        assert_eq!(a, b);
        assert_eq!(rows, before);
    }
}
