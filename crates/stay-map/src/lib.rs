//! Header normalization and alias-based column mapping.
//!
//! [`normalize`] produces comparable header keys, [`AliasDictionary`] holds
//! the configurable alias lists and stoplist, [`ColumnMapper`] resolves one
//! sheet's headers into a [`stay_model::ColumnMapping`], and
//! [`missing_groups`] reports which required field groups are unmapped.

#![deny(unsafe_code)]

pub mod dictionary;
pub mod error;
pub mod mapper;
pub mod normalize;
pub mod required;

pub use dictionary::{AliasDictionary, FieldAliases};
pub use error::{MapError, Result};
pub use mapper::{ColumnMapper, MIN_PARTIAL_LEN};
pub use normalize::{is_numeric_key, normalize};
pub use required::missing_groups;
