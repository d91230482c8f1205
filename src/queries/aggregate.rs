//! Aggregations over a filtered view.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CardRecord, GroupCount, GroupField, SummaryStats};

/// Count rows per distinct value of `field`.
///
/// Keys that do not occur in `view` are absent, not zero. The map is keyed
/// in ascending order; ranking for display is left to the caller.
pub fn group_by(view: &[CardRecord], field: GroupField) -> GroupCount {
    let mut counts = GroupCount::new();
    for record in view {
        *counts.entry(field.key(record).to_string()).or_insert(0) += 1;
    }
    counts
}

/// Count, total value and most valuable card of `view`.
///
/// When several cards share the highest AVG the first one in view order
/// wins. The total saturates at [`Decimal::MAX`].
pub fn summarize(view: &[CardRecord]) -> SummaryStats {
    let mut top: Option<&CardRecord> = None;
    let mut total = Decimal::ZERO;

    for record in view {
        total = total.saturating_add(record.avg_market_value);
        // Strictly greater keeps the earliest of equal maxima
        match top {
            Some(t) if record.avg_market_value <= t.avg_market_value => {}
            _ => top = Some(record),
        }
    }

    SummaryStats {
        count: view.len(),
        total_value: round_cents(total),
        top_value: top.map(|t| t.avg_market_value).unwrap_or(Decimal::ZERO),
        top_card: top.cloned(),
    }
}

/// Round to two decimal places, halves away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
