//! Shared fixtures for the dashboard integration tests.
//!
//! Provides a small five-card collection both as typed records (for the
//! pure filter/aggregate tests) and as a CSV file written to a temp
//! directory (for the loader tests), plus a workbook writer for the
//! `.xlsx` loader tests.

#![allow(dead_code)]

use card_dashboard::{CardRecord, Dataset};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use std::str::FromStr;

/// The sample collection as the owner would export it.
pub const SAMPLE_CSV: &str = "\
Card Name,Set Name,Set Code,Card Number,Language,Date Bought,Price Bought,AVG
Pikachu,Scarlet & Violet,SV1,025,English,2024-01-01,2.50,5.00
Charizard ex,Obsidian Flames,OBF,125,Japanese,2024-01-02,40.00,55.75
Mew ex,151,MEW,151,English,2024-01-03,12.00,55.75
Gardevoir ex,Scarlet & Violet,SV1,086,German,2024-01-04,8.00,6.10
Eevee,151,MEW,133,English,2024-01-05,0.50,0.30
";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
pub fn card(
    name: &str,
    set_name: &str,
    set_code: &str,
    number: &str,
    language: &str,
    bought: NaiveDate,
    price: &str,
    avg: &str,
) -> CardRecord {
    CardRecord {
        card_name: name.to_string(),
        set_name: set_name.to_string(),
        set_code: set_code.to_string(),
        card_number: number.to_string(),
        language: language.to_string(),
        date_bought: bought,
        price_bought: dec(price),
        avg_market_value: dec(avg),
    }
}

/// The same five cards as [`SAMPLE_CSV`], already typed.
pub fn sample_records() -> Vec<CardRecord> {
    vec![
        card("Pikachu", "Scarlet & Violet", "SV1", "025", "English", date(2024, 1, 1), "2.50", "5.00"),
        card("Charizard ex", "Obsidian Flames", "OBF", "125", "Japanese", date(2024, 1, 2), "40.00", "55.75"),
        card("Mew ex", "151", "MEW", "151", "English", date(2024, 1, 3), "12.00", "55.75"),
        card("Gardevoir ex", "Scarlet & Violet", "SV1", "086", "German", date(2024, 1, 4), "8.00", "6.10"),
        card("Eevee", "151", "MEW", "133", "English", date(2024, 1, 5), "0.50", "0.30"),
    ]
}

pub fn sample_dataset() -> Dataset {
    Dataset::from_records(sample_records())
}

/// Write `contents` to `name` inside a fresh temp directory.
///
/// Returns `(path, TempDir)`. The caller must keep the `TempDir` alive for
/// as long as the file is needed.
pub fn write_source(name: &str, contents: &str) -> (PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (path, tmp_dir)
}

/// A cell written into a test workbook.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// Serial day number shown with a date format, as spreadsheets store dates.
    Date(f64),
    Empty,
}

/// Write a workbook with one worksheet per `(name, rows)` entry, rows
/// starting at the first line of the sheet.
pub fn write_workbook(
    file_name: &str,
    sheets: &[(&str, Vec<Vec<Cell>>)],
) -> (PathBuf, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join(file_name);
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Date(n) => {
                        worksheet.write_number_with_format(r, c, *n, &date_format).unwrap();
                    }
                    Cell::Empty => {}
                }
            }
        }
    }
    workbook.save(&path).unwrap();
    (path, tmp_dir)
}

/// The header row every collection sheet starts with.
pub fn header_row() -> Vec<Cell<'static>> {
    [
        "Card Name",
        "Set Name",
        "Set Code",
        "Card Number",
        "Language",
        "Date Bought",
        "Price Bought",
        "AVG",
    ]
    .into_iter()
    .map(Cell::Text)
    .collect()
}

pub fn names(records: &[CardRecord]) -> Vec<&str> {
    records.iter().map(|r| r.card_name.as_str()).collect()
}
