#![deny(unsafe_code)]

pub mod error;
pub mod field;
pub mod mapping;
pub mod record;
pub mod result;

pub use error::{ModelError, Result};
pub use field::Field;
pub use mapping::{ColumnBinding, ColumnMapping, MatchKind, RequiredGroup, SheetMapping};
pub use record::{ImportRecord, PersonRecord, RowOrigin, StayRecord};
pub use result::{
    DuplicateRecord, ImportPreview, ImportResult, PreviewCell, PreviewRow, RowFailure,
};
