//! File system storage backend
//!
//! Writes export artifacts below a base directory, normally the configured
//! output directory. Relative paths are confined to that directory: any path
//! with a `..` component is refused, and an existing target must canonicalize
//! to a location inside the base (so a symlink cannot redirect a write).

use super::{StorageBackend, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// File system storage backend
pub struct FileSystemStorageBackend {
    base_path: PathBuf,
}

impl FileSystemStorageBackend {
    /// Create a backend rooted at `base_path`; the directory may not exist yet
    ///
    /// # Example
    ///
    /// ```rust
    /// use dtd_export::storage::FileSystemStorageBackend;
    ///
    /// let backend = FileSystemStorageBackend::new("/tmp");
    /// assert_eq!(backend.base_path(), std::path::Path::new("/tmp"));
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(StorageError::PermissionDenied(format!(
                "{path}: parent directory references are not allowed"
            )));
        }

        let full = self.base_path.join(relative);
        if !full.exists() {
            return Ok(full);
        }

        let target = full
            .canonicalize()
            .map_err(|e| io_error("resolve", path, e))?;
        let base = self
            .base_path
            .canonicalize()
            .unwrap_or_else(|_| self.base_path.clone());
        if !target.starts_with(&base) {
            return Err(StorageError::PermissionDenied(format!(
                "{path}: resolves outside {}",
                self.base_path.display()
            )));
        }
        Ok(target)
    }

    fn metadata(&self, path: &str) -> Result<Option<fs::Metadata>, StorageError> {
        match fs::metadata(self.resolve_path(path)?) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("inspect", path, e)),
        }
    }
}

fn io_error(action: &str, path: &str, err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::PermissionDenied => StorageError::PermissionDenied(format!("{path}: {err}")),
        ErrorKind::NotFound => StorageError::DirectoryNotFound(format!("{path}: {err}")),
        _ => StorageError::IoError(format!("Failed to {action} {path}: {err}")),
    }
}

impl StorageBackend for FileSystemStorageBackend {
    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve_path(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create directory for", path, e))?;
        }
        fs::write(&target, content).map_err(|e| io_error("write", path, e))
    }

    fn file_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.metadata(path)?.is_some_and(|m| m.is_file()))
    }

    fn create_dir(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve_path(path)?;
        fs::create_dir_all(target).map_err(|e| io_error("create directory", path, e))
    }

    fn dir_exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.metadata(path)?.is_some_and(|m| m.is_dir()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parent_references_refused() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        for path in ["../hr_export.xml", "/out/../../etc/passwd"] {
            assert!(matches!(
                backend.write_file(path, b"x"),
                Err(StorageError::PermissionDenied(_))
            ));
        }
        assert!(backend.resolve_path("nested/hr_export.xml").is_ok());
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path().join("exports"));

        assert!(!backend.dir_exists("").unwrap());
        backend
            .write_file("hr_export.dtd", b"<!ELEMENT a (#PCDATA)>\n")
            .unwrap();

        assert!(backend.file_exists("hr_export.dtd").unwrap());
        assert_eq!(
            fs::read(temp.path().join("exports/hr_export.dtd")).unwrap(),
            b"<!ELEMENT a (#PCDATA)>\n"
        );
    }

    #[test]
    fn test_overwrites_existing_artifact() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());

        backend.write_file("hr_export.xml", b"old").unwrap();
        backend.write_file("hr_export.xml", b"new").unwrap();
        assert_eq!(fs::read(temp.path().join("hr_export.xml")).unwrap(), b"new");
    }

    #[test]
    fn test_create_dir() {
        let temp = TempDir::new().unwrap();
        let backend = FileSystemStorageBackend::new(temp.path());
        backend.create_dir("nested/out").unwrap();
        assert!(backend.dir_exists("nested/out").unwrap());
        assert!(!backend.file_exists("nested/out").unwrap());
    }
}
