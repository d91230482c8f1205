use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CardRecord;

// ---------------------------------------------------------------------------
// DateRange: Date-picker bounds
// ---------------------------------------------------------------------------

/// Inclusive purchase-date window.
///
/// The window only restricts anything when both ends are set; a half-open
/// range is ignored rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Both ends set.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// The `(start, end)` pair, or `None` when the clause does not apply.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Whether `date` passes this clause. An inverted window admits nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria: One snapshot of every filter control
// ---------------------------------------------------------------------------

/// The combined state of the set, language and date filters.
///
/// Clauses are AND-combined; within the set and language clauses any member
/// matches. An empty set means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub set_names: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_set_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// True when no clause restricts anything.
    pub fn is_empty(&self) -> bool {
        self.set_names.is_empty() && self.languages.is_empty() && self.date_range.bounds().is_none()
    }

    pub fn matches(&self, record: &CardRecord) -> bool {
        (self.set_names.is_empty() || self.set_names.contains(&record.set_name))
            && (self.languages.is_empty() || self.languages.contains(&record.language))
            && self.date_range.contains(record.date_bought)
    }
}
