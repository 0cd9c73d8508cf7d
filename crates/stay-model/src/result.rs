//! Import outcome types handed to the preview surface and persistence layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::mapping::{RequiredGroup, SheetMapping};
use crate::record::{ImportRecord, RowOrigin};

/// A row that looked like a guest but could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    pub origin: RowOrigin,
    pub message: String,
}

/// A record whose document was already accepted earlier in the same batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    pub key: String,
    /// Origin of the accepted record sharing the key.
    pub first_seen: RowOrigin,
    pub record: ImportRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewCell {
    pub header: String,
    pub value: String,
}

/// Raw row shown to an operator before committing an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    pub origin: RowOrigin,
    pub cells: Vec<PreviewCell>,
}

impl PreviewRow {
    pub fn value(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.header == header)
            .map(|cell| cell.value.as_str())
    }
}

/// Everything produced by one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Data rows read across all processed sheets, before truncation.
    pub total_rows: usize,
    /// Rows actually normalized (after the row cap).
    pub processed_rows: usize,
    pub valid: Vec<ImportRecord>,
    pub errors: Vec<RowFailure>,
    pub duplicates: Vec<DuplicateRecord>,
    /// Blank or partial rows skipped without an error.
    pub skipped: usize,
    pub mappings: Vec<SheetMapping>,
    pub sheet_names: Vec<String>,
    pub preview: Vec<PreviewRow>,
    pub warnings: Vec<String>,
}

impl ImportResult {
    pub fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Header-to-field bindings of every sheet merged; later sheets win on
    /// identical headers.
    pub fn consolidated_mapping(&self) -> BTreeMap<String, Field> {
        consolidate(&self.mappings)
    }
}

/// Mapping and sample produced without normalizing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPreview {
    pub sheet_names: Vec<String>,
    pub mappings: Vec<SheetMapping>,
    /// Required groups no sheet maps. Empty when the file can be imported.
    pub missing: Vec<RequiredGroup>,
    pub preview: Vec<PreviewRow>,
    pub total_rows: usize,
}

impl ImportPreview {
    pub fn consolidated_mapping(&self) -> BTreeMap<String, Field> {
        consolidate(&self.mappings)
    }

    pub fn is_importable(&self) -> bool {
        self.missing.is_empty() && self.total_rows > 0
    }
}

fn consolidate(mappings: &[SheetMapping]) -> BTreeMap<String, Field> {
    let mut merged = BTreeMap::new();
    for sheet in mappings {
        for binding in &sheet.mapping.bindings {
            merged.insert(binding.header.clone(), binding.field);
        }
    }
    merged
}
