use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use stay_cli::logging::redact_value;
use stay_cli::summary::{
    counts_table, duplicate_table, failure_table, fields_table, mapping_table,
    missing_columns_line, preview_table, sheets_table,
};
use stay_core::{ImportOptions, ImportProgress, Importer};
use stay_ingest::list_sheets;
use stay_map::AliasDictionary;
use stay_model::{ImportPreview, ImportResult};
use stay_transform::NormalizationOptions;

use crate::cli::{FieldsArgs, ImportArgs, MappingArgs, PreviewArgs, SheetsArgs};

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let names = list_sheets(&args.file, args.numeric_only)
        .with_context(|| format!("list sheets of {}", args.file.display()))?;
    if names.is_empty() {
        println!("No sheets found.");
    } else {
        println!("{}", sheets_table(&names));
    }
    Ok(())
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let dictionary = load_dictionary(args.aliases.as_deref())?;
    println!("{}", fields_table(&dictionary));
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<ImportPreview> {
    let options = import_options(&args.mapping);
    let importer = build_importer(&args.mapping, options)?;
    let preview = importer
        .preview(&args.mapping.file)
        .with_context(|| format!("preview {}", args.mapping.file.display()))?;

    println!("File: {}", args.mapping.file.display());
    println!("Sheets: {}", preview.sheet_names.join(", "));
    println!("Rows: {}", preview.total_rows);
    println!("{}", mapping_table(&preview.mappings));
    if !preview.preview.is_empty() {
        println!();
        println!("Sample:");
        println!("{}", preview_table(&preview.preview));
    }
    if !preview.missing.is_empty() {
        eprintln!("error: {}", missing_columns_line(&preview.missing));
    }
    Ok(preview)
}

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let path = &args.mapping.file;
    let span = info_span!("import", path = %path.display());
    let _guard = span.enter();

    let options = import_options(&args.mapping)
        .with_max_rows(args.max_rows)
        .with_normalization(
            NormalizationOptions::default().with_default_nationality(&args.default_nationality),
        );
    let importer = build_importer(&args.mapping, options)?;

    let bar = progress_bar()?;
    let outcome = importer.run_with_progress(path, |progress| update_bar(&bar, progress));
    bar.finish_and_clear();
    let result = outcome.with_context(|| format!("import {}", path.display()))?;

    for duplicate in &result.duplicates {
        warn!(
            key = redact_value(&duplicate.key),
            origin = %duplicate.record.source,
            first_seen = %duplicate.first_seen,
            "document repeated in batch"
        );
    }
    if let Some(output) = &args.output {
        write_result(output, &result)?;
        info!(output = %output.display(), "result written");
    }

    print_import_summary(path, &result);
    Ok(result)
}

fn print_import_summary(path: &Path, result: &ImportResult) {
    println!("File: {}", path.display());
    println!("Sheets: {}", result.sheet_names.join(", "));
    println!("{}", mapping_table(&result.mappings));
    println!("{}", counts_table(result));
    if !result.errors.is_empty() {
        println!();
        println!("Errors:");
        println!("{}", failure_table(&result.errors));
    }
    if !result.duplicates.is_empty() {
        println!();
        println!("Duplicates:");
        println!("{}", duplicate_table(&result.duplicates));
    }
    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }
}

fn import_options(args: &MappingArgs) -> ImportOptions {
    let mut options = ImportOptions::default()
        .with_sheets(args.sheets.clone())
        .with_preview_rows(args.preview_rows);
    for (header, field) in &args.overrides {
        options = options.with_override(header.as_str(), *field);
    }
    options
}

fn build_importer(args: &MappingArgs, options: ImportOptions) -> Result<Importer> {
    let dictionary = load_dictionary(args.aliases.as_deref())?;
    Ok(Importer::new(&dictionary, options))
}

fn load_dictionary(path: Option<&Path>) -> Result<AliasDictionary> {
    match path {
        Some(path) => AliasDictionary::from_path(path)
            .with_context(|| format!("load aliases from {}", path.display())),
        None => AliasDictionary::embedded().context("load built-in aliases"),
    }
}

fn progress_bar() -> Result<ProgressBar> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

fn update_bar(bar: &ProgressBar, progress: &ImportProgress) {
    if progress.total > 0 {
        bar.set_length(progress.total as u64);
        bar.set_position(progress.current as u64);
    }
    bar.set_message(progress.message.clone());
}

fn write_result(path: &Path, result: &ImportResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
