//! Defaults applied while normalizing rows.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NATIONALITY: &str = "Argentina";
pub const UNSPECIFIED_ORIGIN: &str = "Sin especificar";
pub const NO_ROOM: &str = "S/N";

/// Values substituted for optional columns that are absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    pub default_nationality: String,
    /// Origin sentinel used when the row names no origin.
    pub unspecified_origin: String,
    /// Room sentinel used when the row names no room.
    pub no_room: String,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            default_nationality: DEFAULT_NATIONALITY.to_string(),
            unspecified_origin: UNSPECIFIED_ORIGIN.to_string(),
            no_room: NO_ROOM.to_string(),
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.default_nationality = nationality.into();
        self
    }

    pub fn with_unspecified_origin(mut self, origin: impl Into<String>) -> Self {
        self.unspecified_origin = origin.into();
        self
    }

    pub fn with_no_room(mut self, room: impl Into<String>) -> Self {
        self.no_room = room.into();
        self
    }
}
