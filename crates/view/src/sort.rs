//! Client-side sort

use crate::state::SortState;
use roster_core::{compare_for_sort, NullOrder, Record};

/// Sort records by one column into a new sequence
///
/// The sort is stable, so rows with equal keys keep their input order. The
/// input is never reordered.
pub fn sort_records<'a, I>(records: I, sort: &SortState, nulls: NullOrder) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut sorted: Vec<&'a Record> = records.into_iter().collect();
    sorted.sort_by(|a, b| {
        compare_for_sort(a.get(&sort.column), b.get(&sort.column), sort.direction, nulls)
    });
    sorted
}
