//! Up-front checks on the workbook path.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Lowercase extensions accepted by the reader.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Checks that `path` is an existing regular file with a supported extension.
pub fn validate_workbook_path(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if !metadata.is_file() {
        return Err(IngestError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();
        let err = validate_workbook_path(&dir.path().join("registro.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempdir().unwrap();
        let err = validate_workbook_path(dir.path()).unwrap_err();
        assert!(matches!(err, IngestError::NotAFile { .. }));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let upper = dir.path().join("REGISTRO.XLSX");
        fs::write(&upper, b"").unwrap();
        assert!(validate_workbook_path(&upper).is_ok());

        let csv = dir.path().join("registro.csv");
        fs::write(&csv, b"a,b").unwrap();
        let err = validate_workbook_path(&csv).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedExtension { ref extension, .. } if extension == "csv"
        ));
    }
}
