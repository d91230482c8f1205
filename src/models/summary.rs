use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CardRecord;

// ---------------------------------------------------------------------------
// GroupField / GroupCount: Per-key row counts
// ---------------------------------------------------------------------------

/// Column a [`GroupCount`] is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupField {
    SetName,
    Language,
}

impl GroupField {
    pub fn key<'a>(&self, record: &'a CardRecord) -> &'a str {
        match self {
            Self::SetName => &record.set_name,
            Self::Language => &record.language,
        }
    }
}

/// Rows per distinct key. Only keys present in the view appear.
pub type GroupCount = BTreeMap<String, usize>;

// ---------------------------------------------------------------------------
// SummaryStats: Headline numbers for a view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub count: usize,
    /// Sum of AVG over the view, rounded to cents.
    pub total_value: Decimal,
    pub top_card: Option<CardRecord>,
    /// AVG of `top_card`, or zero when the view is empty.
    pub top_value: Decimal,
}
