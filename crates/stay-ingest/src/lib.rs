//! Guest workbook ingestion.
//!
//! This crate opens `.xlsx` / `.xls` workbooks with calamine and loads each
//! non-empty worksheet into a Polars DataFrame of text columns tagged with
//! its sheet name and row number.
//!
//! # Features
//!
//! - **Validation**: existence and extension checks before opening a file
//! - **Sheet Listing**: workbook sheet names, optionally numeric sheets only
//! - **Sheet Frames**: cleaned headers, blank rows dropped, origin columns
//! - **Consolidation**: stacking sheets whose columns differ
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use stay_ingest::{combine_frames, read_workbook};
//!
//! let sheets = read_workbook(Path::new("registro.xlsx"), &[])?;
//! let combined = combine_frames(sheets.into_iter().map(|s| s.data).collect())?;
//! ```

#![deny(unsafe_code)]

mod error;
mod frame;
mod validate;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Validation ===
pub use validate::{SUPPORTED_EXTENSIONS, validate_workbook_path};

// === Workbook Reading ===
pub use workbook::{SheetFrame, cell_to_string, clean_header, list_sheets, read_workbook};

// === Frame Helpers ===
pub use frame::{
    ROW_COLUMN, SHEET_COLUMN, any_to_string, column_value_string, combine_frames, data_columns,
    format_numeric, is_origin_column, rename_columns, sheet_frame,
};
