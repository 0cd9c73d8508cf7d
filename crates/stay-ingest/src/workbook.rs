//! Workbook reading: sheet discovery and per-sheet frames.

use std::collections::BTreeSet;
use std::io::{Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use chrono::NaiveTime;
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::frame::{ROW_COLUMN, SHEET_COLUMN, format_numeric, sheet_frame};
use crate::validate::validate_workbook_path;

/// One non-empty worksheet loaded into a frame.
#[derive(Debug, Clone)]
pub struct SheetFrame {
    pub name: String,
    /// Cleaned, de-duplicated headers in sheet order; the frame's data columns.
    pub headers: Vec<String>,
    pub data: DataFrame,
}

impl SheetFrame {
    pub fn height(&self) -> usize {
        self.data.height()
    }
}

/// Lists worksheet names in workbook order.
///
/// With `numeric_only`, only sheets whose trimmed name is all digits are
/// returned, sorted by their numeric value.
pub fn list_sheets(path: &Path, numeric_only: bool) -> Result<Vec<String>> {
    validate_workbook_path(path)?;
    let workbook = open(path)?;
    let names = workbook.sheet_names();
    if !numeric_only {
        return Ok(names);
    }

    let mut numeric: Vec<(u64, String)> = names
        .into_iter()
        .filter_map(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
                return None;
            }
            trimmed.parse::<u64>().ok().map(|value| (value, name))
        })
        .collect();
    numeric.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(numeric.into_iter().map(|(_, name)| name).collect())
}

/// Reads the selected sheets (all sheets when `selection` is empty).
///
/// Sheets without data rows are skipped. Selected names that do not exist
/// in the workbook are logged and ignored.
pub fn read_workbook(path: &Path, selection: &[String]) -> Result<Vec<SheetFrame>> {
    validate_workbook_path(path)?;
    let mut workbook = open(path)?;
    let available = workbook.sheet_names();

    for wanted in selection {
        if !available.contains(wanted) {
            warn!(sheet = %wanted, path = %path.display(), "selected sheet not found in workbook");
        }
    }

    let mut frames = Vec::new();
    for name in available {
        if !selection.is_empty() && !selection.contains(&name) {
            continue;
        }
        if let Some(frame) = read_sheet(&mut workbook, path, &name)? {
            frames.push(frame);
        }
    }

    info!(
        path = %path.display(),
        sheets = frames.len(),
        rows = frames.iter().map(SheetFrame::height).sum::<usize>(),
        "workbook read"
    );
    Ok(frames)
}

fn open(path: &Path) -> Result<Sheets<std::io::BufReader<std::fs::File>>> {
    open_workbook_auto(path).map_err(|e| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    path: &Path,
    name: &str,
) -> Result<Option<SheetFrame>> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| IngestError::SheetRead {
            path: path.to_path_buf(),
            sheet: name.to_string(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        debug!(sheet = name, "sheet is empty");
        return Ok(None);
    };
    let headers = dedupe_headers(header_row.iter().map(cell_to_string).collect());

    let mut data_rows: Vec<(u32, Vec<Option<String>>)> = Vec::new();
    let mut blank = 0usize;
    for (offset, row) in rows.enumerate() {
        let cells: Vec<Option<String>> = row.iter().map(cell_to_string).collect();
        if cells.iter().all(Option::is_none) {
            blank += 1;
            continue;
        }
        let row_number = u32::try_from(offset + 2).unwrap_or(u32::MAX);
        data_rows.push((row_number, cells));
    }

    if data_rows.is_empty() {
        debug!(sheet = name, blank, "sheet has no data rows");
        return Ok(None);
    }

    debug!(
        sheet = name,
        columns = headers.len(),
        rows = data_rows.len(),
        blank,
        "sheet loaded"
    );
    let data = sheet_frame(name, &headers, &data_rows)?;
    Ok(Some(SheetFrame {
        name: name.to_string(),
        headers,
        data,
    }))
}

/// Converts a cell to trimmed text; empty cells and cell errors are `None`.
pub fn cell_to_string(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_numeric(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.time() == NaiveTime::MIN => {
                value.date().format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Cleans a header for use as a column name: trimmed, lowercased, and
/// whitespace runs joined with `_`.
pub fn clean_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Cleans headers and makes them unique column names.
///
/// Blank headers become `column_N` (1-based position); repeats get `_2`,
/// `_3`, ... suffixes. Origin column names are reserved.
fn dedupe_headers(raw: Vec<Option<String>>) -> Vec<String> {
    let mut seen: BTreeSet<String> = [ROW_COLUMN, SHEET_COLUMN]
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut headers = Vec::with_capacity(raw.len());
    for (index, header) in raw.into_iter().enumerate() {
        let base = match header.as_deref().map(clean_header) {
            Some(cleaned) if !cleaned.is_empty() => cleaned,
            _ => format!("column_{}", index + 1),
        };
        let mut candidate = base.clone();
        let mut suffix = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}
