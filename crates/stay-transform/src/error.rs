//! Per-row validation errors.

use stay_model::Field;
use thiserror::Error;

/// A row that looks like a real guest but cannot become a record.
///
/// These never abort an import; the caller collects them with the row origin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing document (national id or passport)")]
    MissingDocument,

    #[error("missing check-in date")]
    MissingCheckInDate,

    #[error("invalid check-in date '{value}'")]
    InvalidCheckInDate { value: String },

    #[error("required field '{field}' is empty")]
    EmptyNamePart { field: Field },
}

pub type Result<T> = std::result::Result<T, RowError>;
