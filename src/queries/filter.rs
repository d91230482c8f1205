//! Filter engine: dataset + criteria -> visible rows.

use crate::loader::Dataset;
use crate::models::{CardRecord, FilterCriteria, FilteredView, GroupCount, GroupField, SummaryStats};

/// Keep the records that satisfy every active clause of `criteria`,
/// preserving their order.
///
/// Empty criteria return every record. An inverted date window returns an
/// empty view; it is not treated as an error.
pub fn filter(records: &[CardRecord], criteria: &FilterCriteria) -> FilteredView {
    if criteria.is_empty() {
        return FilteredView::new(records.to_vec());
    }
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// CollectionQuery
// ---------------------------------------------------------------------------

/// Query interface borrowing a loaded [`Dataset`].
pub struct CollectionQuery<'a> {
    dataset: &'a Dataset,
}

impl<'a> CollectionQuery<'a> {
    /// Create a new `CollectionQuery` bound to the given dataset.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> FilteredView {
        filter(self.dataset.records(), criteria)
    }

    /// Filter, then count rows per `field`.
    pub fn group_by(&self, criteria: &FilterCriteria, field: GroupField) -> GroupCount {
        super::group_by(&self.filter(criteria), field)
    }

    /// Filter, then summarize.
    pub fn summarize(&self, criteria: &FilterCriteria) -> SummaryStats {
        super::summarize(&self.filter(criteria))
    }
}
