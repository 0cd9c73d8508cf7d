//! Raw preview sample shown to an operator before an import is committed.

use stay_ingest::{ROW_COLUMN, SheetFrame, column_value_string};
use stay_map::ColumnMapper;
use stay_model::{PreviewCell, PreviewRow, RowOrigin};

/// Turns a cleaned header into a display label: `apellido_y_nombre` becomes
/// `Apellido Y Nombre`.
pub fn display_header(header: &str) -> String {
    header
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Takes the first row of each sheet with a value outside counter columns,
/// stopping at `limit` rows.
pub fn preview_rows(sheets: &[SheetFrame], mapper: &ColumnMapper, limit: usize) -> Vec<PreviewRow> {
    let mut preview = Vec::new();
    for sheet in sheets {
        if preview.len() >= limit {
            break;
        }
        let columns: Vec<&String> = sheet
            .headers
            .iter()
            .filter(|header| !mapper.is_ignorable(header))
            .collect();

        for idx in 0..sheet.height() {
            let cells: Vec<PreviewCell> = columns
                .iter()
                .map(|header| PreviewCell {
                    header: display_header(header),
                    value: column_value_string(&sheet.data, header, idx),
                })
                .collect();
            if cells.iter().all(|cell| cell.value.trim().is_empty()) {
                continue;
            }
            let row = column_value_string(&sheet.data, ROW_COLUMN, idx)
                .parse()
                .unwrap_or_default();
            preview.push(PreviewRow {
                origin: RowOrigin::new(sheet.name.as_str(), row),
                cells,
            });
            break;
        }
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_headers() {
        assert_eq!(display_header("apellido_y_nombre"), "Apellido Y Nombre");
        assert_eq!(display_header("d.n.i."), "D.n.i.");
        assert_eq!(display_header("habitación"), "Habitación");
        assert_eq!(display_header("_fecha__entrada_"), "Fecha Entrada");
    }
}
