//! Row normalization for guest imports.
//!
//! This crate turns one mapped spreadsheet row into an
//! [`stay_model::ImportRecord`]:
//!
//! - **name**: splitting of combined "surname, given name" values
//! - **document**: national id / passport cleaning and classification
//! - **datetime**: day-first multi-format date parsing
//! - **age**: explicit or birth-date derived age
//! - **normalizer**: the per-row pipeline with defaults and sanitization

#![deny(unsafe_code)]

pub mod age;
pub mod datetime;
pub mod document;
pub mod error;
pub mod name;
pub mod normalizer;
pub mod options;
pub mod row;
pub mod text;

pub use datetime::parse_date;
pub use document::{Document, classify_document, clean_document};
pub use error::{Result, RowError};
pub use name::split_full_name;
pub use normalizer::RowNormalizer;
pub use options::{DEFAULT_NATIONALITY, NO_ROOM, NormalizationOptions, UNSPECIFIED_ORIGIN};
pub use row::{RawCell, RawRow};
pub use text::sanitize_text;
