//! One-shot spreadsheet loader.
//!
//! Reads the collection file (delimited text through DuckDB, workbooks
//! through [`crate::workbook`]), matches the required headers loosely (case,
//! spaces, underscores and hyphens are ignored), and types every row into a
//! [`CardRecord`]. Any problem is fatal: there is no partial dataset.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{self, SOURCE_VIEW};
use crate::connection::Connection;
use crate::error::{LoadError, Result};
use crate::models::CardRecord;
use crate::sql_builder::{quote_ident, SqlBuilder};
use crate::workbook;

// ---------------------------------------------------------------------------
// SourceFormat
// ---------------------------------------------------------------------------

/// Spreadsheet flavours the loader knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Delimited text (`.csv`, `.tsv`, `.txt`), read with DuckDB `read_csv`.
    Delimited,
    /// Workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`), read with calamine.
    Workbook,
}

impl SourceFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" | "tsv" | "txt" => Ok(Self::Delimited),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Workbook),
            "" => Err(LoadError::UnsupportedFormat(format!(
                "{} has no file extension",
                path.display()
            ))),
            other => Err(LoadError::UnsupportedFormat(format!(
                ".{} ({})",
                other,
                path.display()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The loaded collection plus the option lists derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<CardRecord>,
    set_names: Vec<String>,
    languages: Vec<String>,
}

impl Dataset {
    /// Wrap already-typed records, deriving the sorted option lists.
    pub fn from_records(records: Vec<CardRecord>) -> Self {
        let set_names: BTreeSet<&str> = records.iter().map(|r| r.set_name.as_str()).collect();
        let languages: BTreeSet<&str> = records.iter().map(|r| r.language.as_str()).collect();
        let set_names = set_names.into_iter().map(str::to_string).collect();
        let languages = languages.into_iter().map(str::to_string).collect();
        Self {
            records,
            set_names,
            languages,
        }
    }

    /// Read a spreadsheet from disk. See [`load_dataset`].
    pub fn load(path: &Path, sheet: Option<&str>) -> Result<Self> {
        load_dataset(path, sheet)
    }

    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    /// Distinct set names, ascending.
    pub fn set_names(&self) -> &[String] {
        &self.set_names
    }

    /// Distinct languages, ascending.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Earliest and latest purchase date, used as the date-picker defaults.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date_bought).min()?;
        let max = self.records.iter().map(|r| r.date_bought).max()?;
        Some((min, max))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions {
            set_names: self.set_names.clone(),
            languages: self.languages.clone(),
            date_bounds: self.date_bounds(),
        }
    }
}

/// Values the rendering surface offers in its filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub set_names: Vec<String>,
    pub languages: Vec<String>,
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Row as read from the source, every column still text.
#[derive(Debug, Deserialize)]
struct SourceRow {
    card_name: Option<String>,
    set_name: Option<String>,
    set_code: Option<String>,
    card_number: Option<String>,
    language: Option<String>,
    date_bought: Option<String>,
    price_bought: Option<String>,
    avg: Option<String>,
}

impl SourceRow {
    /// Build a row from cells given in [`config::required_columns`] order.
    fn from_cells(mut cells: impl Iterator<Item = Option<String>>) -> Self {
        let mut next = || cells.next().flatten();
        Self {
            card_name: next(),
            set_name: next(),
            set_code: next(),
            card_number: next(),
            language: next(),
            date_bought: next(),
            price_bought: next(),
            avg: next(),
        }
    }

    fn is_blank(&self) -> bool {
        [
            &self.card_name,
            &self.set_name,
            &self.set_code,
            &self.card_number,
            &self.language,
            &self.date_bought,
            &self.price_bought,
            &self.avg,
        ]
        .iter()
        .all(|cell| cell.as_deref().unwrap_or("").trim().is_empty())
    }
}

/// Load the collection spreadsheet at `path`.
///
/// `sheet` selects a worksheet in workbooks and is ignored for delimited
/// files. Rows whose required cells are all empty are skipped.
pub fn load_dataset(path: &Path, sheet: Option<&str>) -> Result<Dataset> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let rows = match SourceFormat::from_path(path)? {
        SourceFormat::Delimited => read_delimited(path)?,
        SourceFormat::Workbook => read_workbook(path, sheet)?,
    };

    let records = rows
        .into_iter()
        .filter(|(_, row)| !row.is_blank())
        .map(|(line, row)| to_record(row, line))
        .collect::<Result<Vec<_>>>()?;

    let dataset = Dataset::from_records(records);
    eprintln!(
        "Loaded {} cards ({} sets, {} languages) from {}",
        dataset.len(),
        dataset.set_names().len(),
        dataset.languages().len(),
        path.display()
    );
    Ok(dataset)
}

/// Read a delimited file through an in-memory DuckDB view. Lines are
/// numbered from the header, which is line 1.
fn read_delimited(path: &Path) -> Result<Vec<(usize, SourceRow)>> {
    let conn = Connection::new()?;
    conn.register_csv(SOURCE_VIEW, path)?;

    let header = conn.columns(SOURCE_VIEW)?;
    let projections: Vec<String> = resolve_columns(&header)?
        .into_iter()
        .map(|(index, alias)| format!("{} AS {}", quote_ident(&header[index]), alias))
        .collect();

    let projection_refs: Vec<&str> = projections.iter().map(String::as_str).collect();
    let (sql, params) = SqlBuilder::new(&quote_ident(SOURCE_VIEW))
        .select(&projection_refs)
        .build();

    let rows: Vec<SourceRow> = conn.execute_into(&sql, &params)?;
    Ok(rows.into_iter().enumerate().map(|(i, row)| (i + 2, row)).collect())
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Vec<(usize, SourceRow)>> {
    let sheet = workbook::read_sheet(path, sheet)?;
    let columns = resolve_columns(&sheet.header)?;

    Ok(sheet
        .rows
        .into_iter()
        .map(|(line, cells)| {
            let picked = columns
                .iter()
                .map(|(index, _)| cells.get(*index).cloned().flatten());
            (line, SourceRow::from_cells(picked))
        })
        .collect())
}

/// Map each required column to the index of the header that carries it,
/// paired with its alias. All missing columns are reported at once.
fn resolve_columns(header: &[String]) -> Result<Vec<(usize, &'static str)>> {
    let mut by_normalized: HashMap<String, usize> = HashMap::new();
    for (index, name) in header.iter().enumerate() {
        by_normalized
            .entry(config::normalize_column_name(name))
            .or_insert(index);
    }

    let mut resolved = Vec::new();
    let mut missing = Vec::new();
    for (required, alias) in config::required_columns() {
        match by_normalized.get(&config::normalize_column_name(required)) {
            Some(index) => resolved.push((*index, alias)),
            None => missing.push(required.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Type one source row. `row` is its 1-based line in the source file.
fn to_record(raw: SourceRow, row: usize) -> Result<CardRecord> {
    let invalid = |column: &str, value: Option<&str>| LoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.unwrap_or_default().to_string(),
    };

    let date_text = raw.date_bought.as_deref();
    let date_bought = date_text
        .and_then(parse_date)
        .ok_or_else(|| invalid(config::COL_DATE_BOUGHT, date_text))?;

    let price_text = raw.price_bought.as_deref();
    let price_bought = price_text
        .and_then(parse_price)
        .ok_or_else(|| invalid(config::COL_PRICE_BOUGHT, price_text))?;

    let avg_text = raw.avg.as_deref();
    let avg_market_value = avg_text
        .and_then(parse_price)
        .ok_or_else(|| invalid(config::COL_AVG, avg_text))?;

    Ok(CardRecord {
        card_name: text(raw.card_name),
        set_name: text(raw.set_name),
        set_code: text(raw.set_code),
        card_number: normalize_card_number(&text(raw.card_number)),
        language: text(raw.language),
        date_bought,
        price_bought,
        avg_market_value,
    })
}

/// A decimal no larger in magnitude than [`config::MAX_PRICE`].
fn parse_price(text: &str) -> Option<Decimal> {
    parse_decimal(text).filter(|d| d.abs() <= Decimal::from(config::MAX_PRICE))
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Formats tried in order. Slash and dot dates are read day-first.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

/// Largest serial day number spreadsheets accept (9999-12-31).
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

/// Parse a purchase date as written by a spreadsheet or typed by hand.
///
/// Accepts the [`DATE_FORMATS`], any of them followed by a time part
/// (separated by a space or `T`), and serial day numbers such as `45292`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    for sep in [' ', 'T'] {
        if let Some((day, _time)) = text.split_once(sep) {
            if let Some(date) = parse_date(day) {
                return Some(date);
            }
        }
    }

    let serial: f64 = text.parse().ok()?;
    if !serial.is_finite() || !(1.0..=MAX_SERIAL_DAY).contains(&serial) {
        return None;
    }
    config::spreadsheet_epoch().checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parse a price cell, accepting plain (`12.50`) and scientific (`1.25e1`)
/// notation.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .map(|d| d.normalize())
}

/// Undo the `25.0` rendering spreadsheets give whole-number cells, leaving
/// other card numbers (`025`, `TG12`, `SV001`) untouched.
pub fn normalize_card_number(number: &str) -> String {
    match number.strip_suffix(".0") {
        Some(whole) if !whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit()) => {
            whole.to_string()
        }
        _ => number.to_string(),
    }
}
