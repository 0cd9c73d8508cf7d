//! Raw row representation handed to the normalizer.

use stay_model::RowOrigin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub column: String,
    pub value: String,
}

/// One spreadsheet row: cell text by column name, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub origin: RowOrigin,
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(origin: RowOrigin) -> Self {
        Self {
            origin,
            cells: Vec::new(),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.push(RawCell {
            column: column.into(),
            value: value.into(),
        });
    }

    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(column, value);
        self
    }

    /// Trimmed cell text; blank and absent cells are `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|cell| cell.column == column)
            .map(|cell| cell.value.trim())
            .filter(|value| !value.is_empty())
    }
}
