//! Record list view
//!
//! One engine, parameterized per entity by a [`ListConfig`], turns a fetched
//! snapshot of records into the page a table shows:
//!
//! ```text
//! snapshot ──► text filter ──► sort ──► paginate ──► DerivedPage
//!                  ▲              ▲          ▲
//!                  └──────── ViewState ──────┘
//! ```
//!
//! [`derive_page`] is pure: the same snapshot, state and config always give
//! the same page. Everything that changes over time lives in [`ViewState`]
//! (user input), the snapshot (replaced on fetch completion, see
//! [`FetchSequencer`]) and [`EditDialog`] (the create/edit form).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
pub mod config;
pub mod derive;
pub mod dialog;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod sequence;
pub mod sort;
pub mod state;

pub use column::{display_value, ColumnDef, ColumnKind};
pub use config::{ListConfig, SearchScope};
pub use derive::{derive_page, DerivedPage};
pub use dialog::{DialogMode, EditDialog, Submission};
pub use error::{ViewError, ViewResult};
pub use filter::{filter_records, matches_query};
pub use paginate::{paginate, Page};
pub use sequence::{FetchSequencer, FetchTicket};
pub use sort::sort_records;
pub use state::{SortState, ViewState};
