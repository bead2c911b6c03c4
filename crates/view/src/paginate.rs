//! Pagination

use serde::{Deserialize, Serialize};

/// One page of a derived sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Page index after clamping
    pub index: usize,
    /// `ceil(total / page_size)`; 0 for an empty sequence
    pub page_count: usize,
    /// Rows per page
    pub page_size: usize,
    /// Length of the whole sequence
    pub total: usize,
    /// Rows on this page
    pub items: Vec<T>,
    /// A previous page exists
    pub has_previous: bool,
    /// A next page exists
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Check for an empty page
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map the rows, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            index: self.index,
            page_count: self.page_count,
            page_size: self.page_size,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Slice page `index` out of `items`
///
/// The index is clamped into `[0, page_count - 1]`. A page size of 0 is
/// treated as 1.
pub fn paginate<T: Clone>(items: &[T], index: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let page_count = total / page_size + usize::from(total % page_size != 0);
    let index = index.min(page_count.saturating_sub(1));
    let start = index * page_size;
    let end = start.saturating_add(page_size).min(total);
    Page {
        index,
        page_count,
        page_size,
        total,
        items: items[start..end].to_vec(),
        has_previous: index > 0,
        has_next: index + 1 < page_count,
    }
}
