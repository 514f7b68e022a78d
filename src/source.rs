//! Loading PDF bytes from the file system
//!
//! Any failure here surfaces as [`Error::Access`] before PDF validation is
//! attempted.

use crate::error::{Error, Result};
use std::path::Path;

/// Read the whole file at `path`.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::Access {
            path: path.display().to_string(),
            reason: "no such file".to_string(),
        });
    }

    std::fs::read(path).map_err(|e| Error::Access {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_path_not_found() {
        let result = load_path("/nonexistent/path/file.pdf");
        assert!(matches!(result, Err(Error::Access { .. })));
    }

    #[test]
    fn test_load_path_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 stub").unwrap();

        let data = load_path(file.path()).unwrap();
        assert_eq!(data, b"%PDF-1.4 stub");
    }

    #[test]
    fn test_load_path_directory_is_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_path(dir.path());
        assert!(matches!(result, Err(Error::Access { .. })));
    }
}
