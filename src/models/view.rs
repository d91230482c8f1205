use std::ops::Deref;

use serde::Serialize;

use super::CardRecord;

// ---------------------------------------------------------------------------
// FilteredView: Records visible under the current filters
// ---------------------------------------------------------------------------

/// Records that passed the active filters, in dataset order.
///
/// Owns its rows; it holds no handle back to the dataset it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilteredView {
    rows: Vec<CardRecord>,
}

impl FilteredView {
    pub fn new(rows: Vec<CardRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CardRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<CardRecord> {
        self.rows
    }
}

impl Deref for FilteredView {
    type Target = [CardRecord];

    fn deref(&self) -> &[CardRecord] {
        &self.rows
    }
}

impl FromIterator<CardRecord> for FilteredView {
    fn from_iter<I: IntoIterator<Item = CardRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
