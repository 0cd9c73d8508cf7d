//! Guest import pipeline.
//!
//! [`Importer`] reads a workbook, maps each sheet's headers, checks that
//! the required columns are present, consolidates the sheets, normalizes
//! every row, and separates valid records, row errors, duplicates and
//! skipped rows into an [`stay_model::ImportResult`]. [`commit`] hands the
//! valid records to a [`GuestStore`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use stay_core::{ImportOptions, Importer, MemoryStore, commit};
//!
//! let importer = Importer::with_default_aliases(ImportOptions::default())?;
//! let result = importer.run(Path::new("registro.xlsx"))?;
//! let summary = commit(&result, &mut MemoryStore::new(), |_| {});
//! ```

#![deny(unsafe_code)]

pub mod dedupe;
pub mod error;
pub mod importer;
pub mod options;
pub mod preview;
pub mod progress;
pub mod store;

pub use dedupe::DuplicateDetector;
pub use error::{ImportError, Result};
pub use importer::Importer;
pub use options::{ImportOptions, MAX_IMPORT_ROWS, PREVIEW_ROWS};
pub use preview::{display_header, preview_rows};
pub use progress::ImportProgress;
pub use store::{CommitSummary, GuestStore, MemoryStore, MemoryStoreError, PersonId, commit};
