//! Workbook reader for `.xlsx`, `.xlsm`, `.xls` and `.ods` sources.
//!
//! Cells are turned into the same text the delimited path projects out of
//! DuckDB, so both formats share one typing step in the loader. Date cells
//! come back as serial day numbers.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{LoadError, Result};

/// One worksheet as text: the header row and every row below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRows {
    pub header: Vec<String>,
    /// Data rows paired with their 1-based line in the sheet.
    pub rows: Vec<(usize, Vec<Option<String>>)>,
}

/// Read `sheet` (or the first worksheet) from the workbook at `path`.
///
/// The header is the first non-empty row of the sheet. Rows below it are
/// returned as they are, blank ones included.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<SheetRows> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| LoadError::MissingSheet(wanted.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| LoadError::MissingSheet(format!("{} has no sheets", path.display())))?,
    };

    let range = workbook.worksheet_range(&name)?;
    eprintln!("Opened sheet: {} -> {}", name, path.display());

    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut lines = range.rows();
    let header = lines
        .next()
        .map(|cells| cells.iter().map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();
    let rows = lines
        .enumerate()
        .map(|(i, cells)| (first_line + 1 + i, cells.iter().map(cell_text).collect()))
        .collect();

    Ok(SheetRows { header, rows })
}

/// Render a cell the way a text export would. Empty cells are `None`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("{e:?}")),
    }
}
