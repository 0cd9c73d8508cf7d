//! Fatal import errors: anything that stops an import before rows are processed.

use std::path::PathBuf;

use stay_ingest::IngestError;
use stay_map::MapError;
use stay_model::RequiredGroup;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Aliases(#[from] MapError),

    /// No selected sheet has a data row.
    #[error("no data rows found in {path}")]
    NoData { path: PathBuf },

    /// Required field groups are not mapped by any sheet.
    #[error("missing required columns: {}", join_groups(.missing))]
    MissingColumns { missing: Vec<RequiredGroup> },
}

fn join_groups(groups: &[RequiredGroup]) -> String {
    groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<polars::prelude::PolarsError> for ImportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::Ingest(err.into())
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_group() {
        let err = ImportError::MissingColumns {
            missing: vec![RequiredGroup::Name, RequiredGroup::Document],
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"missing required columns: full_name (or surname + given_name); national_id or passport"
        );
    }
}
