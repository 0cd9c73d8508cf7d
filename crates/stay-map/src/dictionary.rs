//! Alias dictionary: canonical fields and the header spellings that map to them.
//!
//! The built-in dictionary is embedded at compile time. A deployment can
//! replace it with its own JSON file of the same shape:
//!
//! ```json
//! {
//!   "ignore": ["nro", "#"],
//!   "fields": [{ "field": "national_id", "aliases": ["dni", "documento"] }]
//! }
//! ```
//!
//! Field order breaks ties: when two fields match the same header exactly,
//! or partially through equally long aliases, the one listed first wins. A
//! longer partial alias always beats a shorter one, so `"nombre_del_hotel"`
//! outranks the given-name alias `"nombre"`.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stay_model::Field;

use crate::error::{MapError, Result};

const EMBEDDED_ALIASES: &str = include_str!("../data/aliases.json");

/// Aliases registered for a single canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    pub field: Field,
    pub aliases: Vec<String>,
}

/// Ordered alias lists plus the stoplist of counter-column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDictionary {
    #[serde(default)]
    pub ignore: Vec<String>,
    pub fields: Vec<FieldAliases>,
}

impl AliasDictionary {
    /// The dictionary shipped with the crate.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_ALIASES, "<embedded>")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse(json, "<inline>")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json, &path.display().to_string())
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        let dictionary: Self = serde_json::from_str(json).map_err(|source| MapError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        dictionary.validate()?;
        Ok(dictionary)
    }

    fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(MapError::Empty);
        }
        let mut seen = BTreeSet::new();
        for entry in &self.fields {
            if !seen.insert(entry.field) {
                return Err(MapError::DuplicateField(entry.field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dictionary_covers_every_field() {
        let dictionary = AliasDictionary::embedded().unwrap();
        for field in Field::ALL {
            assert!(
                dictionary
                    .fields
                    .iter()
                    .any(|entry| entry.field == field && !entry.aliases.is_empty()),
                "no aliases for {field}"
            );
        }
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let json = r#"{"fields": [
            {"field": "passport", "aliases": ["pasaporte"]},
            {"field": "passport", "aliases": ["passport"]}
        ]}"#;
        let err = AliasDictionary::from_json_str(json).unwrap_err();
        assert!(matches!(err, MapError::DuplicateField(Field::Passport)));
    }

    #[test]
    fn unknown_field_names_fail_to_parse() {
        let json = r#"{"fields": [{"field": "shoe_size", "aliases": ["talle"]}]}"#;
        let err = AliasDictionary::from_json_str(json).unwrap_err();
        assert!(matches!(err, MapError::Parse { .. }));
    }

    #[test]
    fn empty_dictionary_is_rejected() {
        let err = AliasDictionary::from_json_str(r#"{"fields": []}"#).unwrap_err();
        assert!(matches!(err, MapError::Empty));
    }
}
