//! Storage backend abstraction for export artifacts
//!
//! Defines the StorageBackend trait used to persist the XML and DTD files.
//! The pipeline only ever writes; the remaining operations let callers
//! prepare and inspect the output location.

pub mod filesystem;

pub use filesystem::FileSystemStorageBackend;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Trait for storage backends
///
/// Paths are relative to the backend's root.
pub trait StorageBackend {
    /// Write a file, creating parent directories as needed
    fn write_file(&self, path: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Check if a file exists
    fn file_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Create a directory
    fn create_dir(&self, path: &str) -> Result<(), StorageError>;

    /// Check if a directory exists
    fn dir_exists(&self, path: &str) -> Result<bool, StorageError>;
}
