//! Import configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stay_model::Field;
use stay_transform::NormalizationOptions;

/// Rows processed per import before truncation.
pub const MAX_IMPORT_ROWS: usize = 10_000;
/// Raw rows kept for the operator preview.
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Sheet names to import, matched exactly. Empty means every sheet.
    pub sheets: Vec<String>,
    /// Input beyond this many rows is dropped with a warning.
    pub max_rows: usize,
    pub preview_rows: usize,
    /// Explicit header -> field bindings applied before alias matching.
    pub overrides: BTreeMap<String, Field>,
    pub normalization: NormalizationOptions,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            sheets: Vec::new(),
            max_rows: MAX_IMPORT_ROWS,
            preview_rows: PREVIEW_ROWS,
            overrides: BTreeMap::new(),
            normalization: NormalizationOptions::default(),
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(mut self, sheets: Vec<String>) -> Self {
        self.sheets = sheets;
        self
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_preview_rows(mut self, preview_rows: usize) -> Self {
        self.preview_rows = preview_rows;
        self
    }

    pub fn with_override(mut self, header: impl Into<String>, field: Field) -> Self {
        self.overrides.insert(header.into(), field);
        self
    }

    pub fn with_normalization(mut self, normalization: NormalizationOptions) -> Self {
        self.normalization = normalization;
        self
    }
}
