//! Error types for alias dictionaries and header mapping.

use std::path::PathBuf;

use stay_model::Field;
use thiserror::Error;

/// Errors raised while loading or validating an alias dictionary.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read alias dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid alias dictionary {origin}: {source}")]
    Parse {
        /// File path, or `<embedded>` for the built-in dictionary.
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("field '{0}' is listed more than once in the alias dictionary")]
    DuplicateField(Field),

    #[error("alias dictionary defines no fields")]
    Empty,
}

pub type Result<T> = std::result::Result<T, MapError>;
