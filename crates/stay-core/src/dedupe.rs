//! Intra-batch duplicate detection by identity document.

use std::collections::BTreeMap;

use stay_model::{ImportRecord, RowOrigin};

/// Tracks documents accepted so far in one import batch.
///
/// Knows nothing about previously stored guests.
#[derive(Debug, Clone, Default)]
pub struct DuplicateDetector {
    seen: BTreeMap<String, RowOrigin>,
}

impl DuplicateDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// National id when present, otherwise passport.
    pub fn key(record: &ImportRecord) -> Option<&str> {
        record.document_key()
    }

    /// Records the document and returns true on its first occurrence.
    ///
    /// Records without a document are never treated as duplicates.
    pub fn observe(&mut self, record: &ImportRecord) -> bool {
        let Some(key) = Self::key(record) else {
            return true;
        };
        if self.seen.contains_key(key) {
            return false;
        }
        self.seen.insert(key.to_string(), record.source.clone());
        true
    }

    /// Origin of the record that first used `key`.
    pub fn first_seen(&self, key: &str) -> Option<&RowOrigin> {
        self.seen.get(key)
    }
}
