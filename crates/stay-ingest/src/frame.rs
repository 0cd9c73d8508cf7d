//! Polars helpers for sheet frames.
//!
//! Every sheet frame holds one `String` column per cleaned header plus two
//! origin columns: [`ROW_COLUMN`] (row number, header = 1) and
//! [`SHEET_COLUMN`] (worksheet name).

use polars::prelude::*;

use crate::error::Result;

/// Row number within the sheet, counting the header row as 1.
pub const ROW_COLUMN: &str = "_row";
/// Name of the worksheet a row came from.
pub const SHEET_COLUMN: &str = "_sheet";

/// True for the origin columns every sheet frame carries.
pub fn is_origin_column(name: &str) -> bool {
    name == ROW_COLUMN || name == SHEET_COLUMN
}

/// Converts a Polars `AnyValue` to a `String`; `Null` becomes empty.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a float without trailing zeros, so `35123456.0` becomes
/// `"35123456"` and `1.50` becomes `"1.5"`.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Get a string value from a DataFrame column at the given row index.
///
/// Missing columns and nulls both read as an empty string.
pub fn column_value_string(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(column) => any_to_string(column.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

/// Data column names of a frame, origin columns excluded.
pub fn data_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .filter(|name| !is_origin_column(name))
        .collect()
}

/// Builds a sheet frame from cleaned headers and row-major cell values.
///
/// `rows` holds `(row number, cells)`; short rows are padded with nulls.
pub fn sheet_frame(
    sheet: &str,
    headers: &[String],
    rows: &[(u32, Vec<Option<String>>)],
) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len() + 2);
    for (index, header) in headers.iter().enumerate() {
        let values: Vec<Option<String>> = rows
            .iter()
            .map(|(_, cells)| cells.get(index).cloned().flatten())
            .collect();
        columns.push(Column::new(header.as_str().into(), values));
    }
    let row_numbers: Vec<u32> = rows.iter().map(|(row, _)| *row).collect();
    columns.push(Column::new(ROW_COLUMN.into(), row_numbers));
    columns.push(Column::new(SHEET_COLUMN.into(), vec![sheet; rows.len()]));
    Ok(DataFrame::new(columns)?)
}

/// Renames columns in place. Pairs whose source column is absent are skipped.
pub fn rename_columns(df: &mut DataFrame, renames: &[(String, String)]) -> Result<()> {
    for (from, to) in renames {
        if from == to || df.column(from).is_err() {
            continue;
        }
        df.rename(from, to.as_str().into())?;
    }
    Ok(())
}

/// Stacks frames vertically, aligning columns by name.
///
/// Columns are ordered by first appearance; a column a frame lacks is
/// filled with nulls for that frame's rows.
pub fn combine_frames(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    for frame in &frames {
        for name in frame.get_column_names() {
            if !names.iter().any(|known| known == name.as_str()) {
                names.push(name.to_string());
            }
        }
    }

    let mut combined: Option<DataFrame> = None;
    for mut frame in frames {
        let height = frame.height();
        for name in &names {
            if frame.column(name).is_err() {
                frame.with_column(Column::full_null(
                    name.as_str().into(),
                    height,
                    &DataType::String,
                ))?;
            }
        }
        let aligned = frame.select(names.iter().map(String::as_str))?;
        match combined.as_mut() {
            Some(existing) => {
                existing.vstack_mut(&aligned)?;
            }
            None => combined = Some(aligned),
        }
    }

    Ok(combined.unwrap_or_else(DataFrame::empty))
}
