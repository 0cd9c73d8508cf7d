//! The import pipeline: workbook -> mapped sheets -> combined frame ->
//! normalized records.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use polars::prelude::DataFrame;
use stay_ingest::{
    ROW_COLUMN, SHEET_COLUMN, SheetFrame, column_value_string, combine_frames, data_columns,
    read_workbook, rename_columns,
};
use stay_map::{AliasDictionary, ColumnMapper, missing_groups};
use stay_model::{
    ColumnBinding, ColumnMapping, DuplicateRecord, Field, ImportPreview, ImportResult,
    RowFailure, RowOrigin, SheetMapping,
};
use stay_transform::{RawRow, RowNormalizer};
use tracing::{debug, info, info_span, warn};

use crate::dedupe::DuplicateDetector;
use crate::error::{ImportError, Result};
use crate::options::ImportOptions;
use crate::preview::preview_rows;
use crate::progress::ImportProgress;

/// Runs imports with a fixed alias dictionary and options.
///
/// Holds no per-import state, so one importer can serve any number of
/// files, including from several threads at once.
#[derive(Debug, Clone)]
pub struct Importer {
    mapper: ColumnMapper,
    normalizer: RowNormalizer,
    options: ImportOptions,
}

/// Sheets read and mapped, ready for preview or row processing.
struct MappedWorkbook {
    sheets: Vec<SheetFrame>,
    mappings: Vec<SheetMapping>,
    fields: BTreeSet<Field>,
}

impl Importer {
    pub fn new(dictionary: &AliasDictionary, options: ImportOptions) -> Self {
        Self {
            mapper: ColumnMapper::new(dictionary),
            normalizer: RowNormalizer::new(options.normalization.clone()),
            options,
        }
    }

    /// Importer using the built-in alias dictionary.
    pub fn with_default_aliases(options: ImportOptions) -> Result<Self> {
        Ok(Self::new(&AliasDictionary::embedded()?, options))
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Reads and maps the workbook without normalizing rows.
    ///
    /// Missing required columns are reported in the preview rather than
    /// raised.
    pub fn preview(&self, path: &Path) -> Result<ImportPreview> {
        let _span = info_span!("preview", path = %path.display()).entered();
        let mapped = self.read_and_map(path)?;
        Ok(ImportPreview {
            sheet_names: mapped.sheets.iter().map(|s| s.name.clone()).collect(),
            missing: missing_groups(&mapped.fields),
            preview: preview_rows(&mapped.sheets, &self.mapper, self.options.preview_rows),
            total_rows: mapped.sheets.iter().map(SheetFrame::height).sum(),
            mappings: mapped.mappings,
        })
    }

    pub fn run(&self, path: &Path) -> Result<ImportResult> {
        self.run_with_progress(path, |_| {})
    }

    /// Imports the workbook, reporting progress through `progress`.
    pub fn run_with_progress<F>(&self, path: &Path, mut progress: F) -> Result<ImportResult>
    where
        F: FnMut(&ImportProgress),
    {
        let _span = info_span!("import", path = %path.display()).entered();

        progress(&ImportProgress::new(0, 0, "reading workbook"));
        let mapped = self.read_and_map(path)?;
        if mapped.sheets.is_empty() {
            return Err(ImportError::NoData {
                path: path.to_path_buf(),
            });
        }

        progress(&ImportProgress::new(0, 0, "checking columns"));
        let missing = missing_groups(&mapped.fields);
        if !missing.is_empty() {
            warn!(?missing, "required columns not mapped");
            return Err(ImportError::MissingColumns { missing });
        }

        let mut result = ImportResult {
            sheet_names: mapped.sheets.iter().map(|s| s.name.clone()).collect(),
            preview: preview_rows(&mapped.sheets, &self.mapper, self.options.preview_rows),
            ..ImportResult::default()
        };

        let mut combined = consolidate(mapped.sheets, &mapped.mappings)?;
        result.total_rows = combined.height();
        if combined.height() > self.options.max_rows {
            let message = format!(
                "input has {} rows; only the first {} were processed",
                combined.height(),
                self.options.max_rows
            );
            warn!("{message}");
            result.warnings.push(message);
            combined = combined.head(Some(self.options.max_rows));
        }
        result.processed_rows = combined.height();

        let mapping = canonical_mapping(&mapped.mappings);
        result.mappings = mapped.mappings;
        self.process_rows(&combined, &mapping, &mut result, &mut progress);

        progress(&ImportProgress::new(
            result.processed_rows,
            result.processed_rows,
            "done",
        ));
        info!(
            total = result.total_rows,
            valid = result.valid.len(),
            errors = result.errors.len(),
            duplicates = result.duplicates.len(),
            skipped = result.skipped,
            "import finished"
        );
        Ok(result)
    }

    fn read_and_map(&self, path: &Path) -> Result<MappedWorkbook> {
        let sheets = read_workbook(path, &self.options.sheets)?;
        let mut mappings = Vec::with_capacity(sheets.len());
        let mut fields = BTreeSet::new();
        for sheet in &sheets {
            let mapping = self
                .mapper
                .map_with_overrides(&sheet.headers, &self.options.overrides);
            debug!(
                sheet = %sheet.name,
                mapped = mapping.len(),
                unmapped = mapping.unmapped.len(),
                ignored = mapping.ignored.len(),
                "sheet mapped"
            );
            fields.extend(mapping.fields());
            mappings.push(SheetMapping {
                sheet: sheet.name.clone(),
                mapping,
            });
        }
        Ok(MappedWorkbook {
            sheets,
            mappings,
            fields,
        })
    }

    fn process_rows<F>(
        &self,
        frame: &DataFrame,
        mapping: &ColumnMapping,
        result: &mut ImportResult,
        progress: &mut F,
    ) where
        F: FnMut(&ImportProgress),
    {
        let columns = data_columns(frame);
        let total = frame.height();
        let mut detector = DuplicateDetector::new();

        for idx in 0..total {
            progress(&ImportProgress::new(
                idx + 1,
                total,
                format!("processing row {} of {total}", idx + 1),
            ));

            let origin = RowOrigin::new(
                column_value_string(frame, SHEET_COLUMN, idx),
                column_value_string(frame, ROW_COLUMN, idx)
                    .parse()
                    .unwrap_or_default(),
            );
            let mut row = RawRow::new(origin);
            for column in &columns {
                row.push(column.as_str(), column_value_string(frame, column, idx));
            }

            match self.normalizer.process(&row, mapping) {
                Ok(Some(record)) => {
                    if detector.observe(&record) {
                        result.valid.push(record);
                    } else {
                        let key = DuplicateDetector::key(&record)
                            .unwrap_or_default()
                            .to_string();
                        let first_seen = detector
                            .first_seen(&key)
                            .cloned()
                            .unwrap_or_else(|| record.source.clone());
                        debug!(origin = %record.source, first = %first_seen, "duplicate document");
                        result.duplicates.push(DuplicateRecord {
                            key,
                            first_seen,
                            record,
                        });
                    }
                }
                Ok(None) => result.skipped += 1,
                Err(error) => {
                    warn!(origin = %row.origin, %error, "row rejected");
                    result.errors.push(RowFailure {
                        origin: row.origin,
                        message: error.to_string(),
                    });
                }
            }
        }
    }
}

/// Renames mapped columns to their field names and stacks all sheets.
///
/// Unmapped columns whose cleaned header collides with a field name are
/// renamed to `<header>_raw` first.
fn consolidate(sheets: Vec<SheetFrame>, mappings: &[SheetMapping]) -> Result<DataFrame> {
    let mut frames = Vec::with_capacity(sheets.len());
    for (mut sheet, sheet_mapping) in sheets.into_iter().zip(mappings) {
        let mapping = &sheet_mapping.mapping;
        let mut renames: Vec<(String, String)> = sheet
            .headers
            .iter()
            .filter(|header| {
                mapping.field_for(header).is_none()
                    && Field::ALL.iter().any(|field| field.as_str() == header.as_str())
            })
            .map(|header| (header.clone(), format!("{header}_raw")))
            .collect();
        renames.extend(
            mapping
                .bindings
                .iter()
                .map(|binding| (binding.header.clone(), binding.field.as_str().to_string())),
        );
        rename_columns(&mut sheet.data, &renames)?;
        frames.push(sheet.data);
    }
    Ok(combine_frames(frames)?)
}

/// Mapping over the combined frame, where every bound column carries its
/// field name. Each field keeps the match kind of the first sheet binding it.
fn canonical_mapping(mappings: &[SheetMapping]) -> ColumnMapping {
    let mut bindings: BTreeMap<Field, ColumnBinding> = BTreeMap::new();
    for sheet in mappings {
        for binding in &sheet.mapping.bindings {
            bindings.entry(binding.field).or_insert_with(|| ColumnBinding {
                header: binding.field.as_str().to_string(),
                field: binding.field,
                kind: binding.kind,
            });
        }
    }
    ColumnMapping {
        bindings: bindings.into_values().collect(),
        ..ColumnMapping::default()
    }
}
