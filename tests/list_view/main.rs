//! List view integration suite
//!
//! Drives whole list sessions through the public `roster` facade: fetch,
//! derive, dialog, write, refetch, and the notifications in between.
//!
//! ```bash
//! cargo test --test list_view
//! ```

mod test_utils;

mod fetch_ordering;
mod filter_sort_page;
mod mutations;
mod open_options;
