//! Tables printed after `sheets`, `fields`, `preview` and `import`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use stay_map::AliasDictionary;
use stay_model::{
    DuplicateRecord, ImportResult, MatchKind, PreviewRow, RequiredGroup, RowFailure, SheetMapping,
};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn sheets_table(names: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Sheet")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, name) in names.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(name)]);
    }
    table
}

pub fn fields_table(dictionary: &AliasDictionary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Aliases")]);
    apply_table_style(&mut table);
    for entry in &dictionary.fields {
        table.add_row(vec![field_cell(entry.field.as_str()), Cell::new(entry.aliases.join(", "))]);
    }
    if !dictionary.ignore.is_empty() {
        table.add_row(vec![
            dim_cell("(ignored)"),
            dim_cell(dictionary.ignore.join(", ")),
        ]);
    }
    table
}

/// One line per header: bound, unmapped, or ignored.
pub fn mapping_table(mappings: &[SheetMapping]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Header"),
        header_cell("Field"),
        header_cell("Match"),
    ]);
    apply_summary_table_style(&mut table);
    for sheet in mappings {
        for binding in &sheet.mapping.bindings {
            table.add_row(vec![
                Cell::new(&sheet.sheet),
                Cell::new(&binding.header),
                field_cell(binding.field.as_str()),
                match_cell(binding.kind),
            ]);
        }
        for header in &sheet.mapping.unmapped {
            table.add_row(vec![
                Cell::new(&sheet.sheet),
                Cell::new(header),
                dim_cell("-"),
                Cell::new("unmapped").fg(Color::Yellow),
            ]);
        }
        for header in &sheet.mapping.ignored {
            table.add_row(vec![
                Cell::new(&sheet.sheet),
                Cell::new(header),
                dim_cell("-"),
                dim_cell("ignored"),
            ]);
        }
    }
    table
}

pub fn counts_table(result: &ImportResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheets"),
        header_cell("Rows"),
        header_cell("Processed"),
        header_cell("Valid"),
        header_cell("Errors"),
        header_cell("Duplicates"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.sheet_count()),
        Cell::new(result.total_rows),
        Cell::new(result.processed_rows),
        count_cell(result.valid.len(), Color::Green),
        count_cell(result.errors.len(), Color::Red),
        count_cell(result.duplicates.len(), Color::Yellow),
        dim_cell(result.skipped),
    ]);
    table
}

pub fn failure_table(failures: &[RowFailure]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Row"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for failure in failures {
        table.add_row(vec![
            Cell::new(&failure.origin.sheet),
            Cell::new(failure.origin.row),
            Cell::new(&failure.message).fg(Color::Red),
        ]);
    }
    table
}

pub fn duplicate_table(duplicates: &[DuplicateRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Row"),
        header_cell("Document"),
        header_cell("First seen"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for duplicate in duplicates {
        table.add_row(vec![
            Cell::new(&duplicate.record.source.sheet),
            Cell::new(duplicate.record.source.row),
            Cell::new(&duplicate.key).fg(Color::Yellow),
            Cell::new(duplicate.first_seen.to_string()),
        ]);
    }
    table
}

/// Raw sample rows, one line per cell.
pub fn preview_table(rows: &[PreviewRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        for cell in &row.cells {
            let value = if cell.value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(&cell.value)
            };
            table.add_row(vec![
                Cell::new(&row.origin.sheet),
                Cell::new(row.origin.row),
                Cell::new(&cell.header),
                value,
            ]);
        }
    }
    table
}

pub fn missing_columns_line(missing: &[RequiredGroup]) -> String {
    let groups: Vec<String> = missing.iter().map(ToString::to_string).collect();
    format!("missing required columns: {}", groups.join("; "))
}

fn match_cell(kind: MatchKind) -> Cell {
    match kind {
        MatchKind::Override => Cell::new("override")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        MatchKind::Exact => Cell::new("exact").fg(Color::Green),
        MatchKind::Partial => Cell::new("partial").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn field_cell(field: &str) -> Cell {
    Cell::new(field).fg(Color::Blue)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
