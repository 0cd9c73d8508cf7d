//! Header-to-field mapping types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// How a header was bound to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Supplied explicitly by the caller.
    Override,
    /// Normalized header equals a normalized alias.
    Exact,
    /// Normalized header contains an alias, or the reverse.
    Partial,
}

/// A single header bound to a canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub header: String,
    pub field: Field,
    pub kind: MatchKind,
}

/// Resolved mapping for one sheet.
///
/// Each header binds to at most one field and each field to at most one
/// header. Headers that matched nothing are kept in `unmapped`; counter
/// columns dropped by the stoplist are kept in `ignored`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Bindings in header order.
    pub bindings: Vec<ColumnBinding>,
    pub unmapped: Vec<String>,
    pub ignored: Vec<String>,
}

impl ColumnMapping {
    pub fn field_for(&self, header: &str) -> Option<Field> {
        self.bindings
            .iter()
            .find(|binding| binding.header == header)
            .map(|binding| binding.field)
    }

    pub fn header_for(&self, field: Field) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| binding.field == field)
            .map(|binding| binding.header.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.bindings.iter().any(|binding| binding.field == field)
    }

    pub fn fields(&self) -> BTreeSet<Field> {
        self.bindings.iter().map(|binding| binding.field).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Mapping resolved for a named sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMapping {
    pub sheet: String,
    pub mapping: ColumnMapping,
}

/// A group of canonical fields of which at least one shape must be mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredGroup {
    /// A combined name column, or both surname and given name.
    Name,
    /// A national id or passport column.
    Document,
    CheckInDate,
}

impl fmt::Display for RequiredGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "full_name (or surname + given_name)"),
            Self::Document => write!(f, "national_id or passport"),
            Self::CheckInDate => write!(f, "check_in_date"),
        }
    }
}
