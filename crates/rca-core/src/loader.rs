//! Incident log loading

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::RcaError;
use crate::Result;

/// Read the whole log file into memory.
///
/// A missing file is reported as [`RcaError::InputNotFound`] so callers can
/// stop before any inference call is made.
pub fn load_log(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), bytes = content.len(), "loaded incident log");
            Ok(content)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Err(RcaError::InputNotFound {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(RcaError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_log_reads_full_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("incident.log");
        std::fs::write(&path, "line one\nERROR: connection timeout after 30s\n").unwrap();

        let content = load_log(&path).unwrap();
        assert_eq!(content, "line one\nERROR: connection timeout after 30s\n");
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.log");

        match load_log(&path) {
            Err(RcaError::InputNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_log(dir.path()).unwrap_err();
        assert!(matches!(err, RcaError::Io(_)));
    }
}
