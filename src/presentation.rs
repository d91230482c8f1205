//! Display shaping for the rendering surface: chart bars, table rows,
//! pagination and the summary headline. No styling lives here.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{DISPLAY_DATE_FORMAT, SET_CHART_TOP_N, TABLE_PAGE_SIZE};
use crate::models::{CardRecord, GroupCount, SummaryStats};
use crate::queries::aggregate::round_cents;

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
}

/// Bars ordered by count descending, ties broken by label ascending.
pub fn ranked_bars(counts: &GroupCount) -> Vec<Bar> {
    let mut bars: Vec<Bar> = counts
        .iter()
        .map(|(label, count)| Bar {
            label: label.clone(),
            count: *count,
        })
        .collect();
    bars.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    bars
}

/// The ten biggest sets of the view.
pub fn set_chart(counts: &GroupCount) -> BarChart {
    let mut bars = ranked_bars(counts);
    bars.truncate(SET_CHART_TOP_N);
    BarChart {
        title: format!("Top {} Sets by Volume", SET_CHART_TOP_N),
        bars,
    }
}

pub fn language_chart(counts: &GroupCount) -> BarChart {
    BarChart {
        title: "Cards per Language".to_string(),
        bars: ranked_bars(counts),
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One collection-table row with display formatting applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Card Name")]
    pub card_name: String,
    #[serde(rename = "Set Name")]
    pub set_name: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Date Bought")]
    pub date_bought: String,
    #[serde(rename = "AVG")]
    pub avg: String,
    #[serde(rename = "Profit")]
    pub profit: String,
}

impl From<&CardRecord> for TableRow {
    fn from(record: &CardRecord) -> Self {
        Self {
            card_name: record.card_name.clone(),
            set_name: record.set_name.clone(),
            language: record.language.clone(),
            date_bought: record.date_bought.format(DISPLAY_DATE_FORMAT).to_string(),
            avg: record.avg_market_value.normalize().to_string(),
            profit: format_cents(record.profit()),
        }
    }
}

pub fn table_rows(view: &[CardRecord]) -> Vec<TableRow> {
    view.iter().map(TableRow::from).collect()
}

/// Zero-based page `index` of the table; empty past the last page.
pub fn page(view: &[CardRecord], index: usize) -> &[CardRecord] {
    let start = index.saturating_mul(TABLE_PAGE_SIZE).min(view.len());
    let end = start.saturating_add(TABLE_PAGE_SIZE).min(view.len());
    &view[start..end]
}

/// Number of pages needed for `len` rows (at least one).
pub fn page_count(len: usize) -> usize {
    len.div_ceil(TABLE_PAGE_SIZE).max(1)
}

// ---------------------------------------------------------------------------
// Headline
// ---------------------------------------------------------------------------

/// `12.5` -> `"12.50"`.
pub fn format_cents(value: Decimal) -> String {
    format!("{:.2}", round_cents(value))
}

/// The two summary sentences shown above the charts.
///
/// An empty view reads "None" and plain zeros instead of formatted amounts.
pub fn headline(owner: &str, summary: &SummaryStats) -> [String; 2] {
    let (total, name, top) = match &summary.top_card {
        Some(card) if summary.count > 0 => (
            format_cents(summary.total_value),
            card.card_name.as_str(),
            format_cents(summary.top_value),
        ),
        _ => ("0".to_string(), "None", "0".to_string()),
    };
    [
        format!(
            "{} currently has {} cards in their collection worth a total of {}€",
            owner, summary.count, total
        ),
        format!("The most valuable card is {} worth approximately {}€", name, top),
    ]
}
