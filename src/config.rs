use chrono::NaiveDate;

pub const IMAGE_BASE_URL: &str =
    "https://assets.pokemon.com/static-assets/content-assets/cms2/img/cards/web";

pub const DEFAULT_OWNER: &str = "Owner";

/// Number of bars kept on the set-volume chart.
pub const SET_CHART_TOP_N: usize = 10;

pub const TABLE_PAGE_SIZE: usize = 50;

pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Largest absolute price the loader accepts for a single card.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Name of the in-memory DuckDB view a delimited source is exposed as.
pub const SOURCE_VIEW: &str = "collection";

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

pub const COL_CARD_NAME: &str = "Card Name";
pub const COL_SET_NAME: &str = "Set Name";
pub const COL_SET_CODE: &str = "Set Code";
pub const COL_CARD_NUMBER: &str = "Card Number";
pub const COL_LANGUAGE: &str = "Language";
pub const COL_DATE_BOUGHT: &str = "Date Bought";
pub const COL_PRICE_BOUGHT: &str = "Price Bought";
pub const COL_AVG: &str = "AVG";

/// Columns every source spreadsheet must carry, paired with the alias the
/// loader selects them as.
pub fn required_columns() -> [(&'static str, &'static str); 8] {
    [
        (COL_CARD_NAME, "card_name"),
        (COL_SET_NAME, "set_name"),
        (COL_SET_CODE, "set_code"),
        (COL_CARD_NUMBER, "card_number"),
        (COL_LANGUAGE, "language"),
        (COL_DATE_BOUGHT, "date_bought"),
        (COL_PRICE_BOUGHT, "price_bought"),
        (COL_AVG, "avg"),
    ]
}

/// Fold a header so that "Date Bought", "date_bought" and "DATE-BOUGHT"
/// compare equal.
pub fn normalize_column_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Day zero of spreadsheet serial dates (1900 date system, leap-bug adjusted).
pub fn spreadsheet_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}
