//! Error types for export operations

use thiserror::Error;

/// Errors that abort an export run
///
/// Every pipeline stage returns this type; nothing is retried. The CLI turns
/// the terminal error into a single message via [`ExportError::user_message`].
#[derive(Error, Debug)]
pub enum ExportError {
    /// Data source unreachable or authentication failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Missing primary key, missing columns, or unusable column names
    #[error("Schema error: {0}")]
    Schema(String),

    /// The sample query returned no rows
    #[error("Data error: {0}")]
    Data(String),

    /// An artifact could not be persisted
    #[error("Write error: {0}")]
    Write(String),

    /// A metadata or row query failed after connecting
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid or incomplete configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// XML rendering failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ExportError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Connection(msg) => {
                format!(
                    "Cannot connect to the data source: {msg}\n\n\
                    Hint: Check host, database name and credentials."
                )
            }
            ExportError::Schema(msg) => {
                format!(
                    "Cannot describe the table: {msg}\n\n\
                    Hint: The table must exist and declare a primary key."
                )
            }
            ExportError::Data(msg) => {
                format!("Nothing to export: {msg}\n\nHint: The table has no rows.")
            }
            ExportError::Write(msg) => {
                format!(
                    "Cannot write export files: {msg}\n\n\
                    Hint: Check that the output directory is writable."
                )
            }
            ExportError::Config(msg) => {
                format!("Invalid configuration: {msg}\n\nHint: Check your export configuration.")
            }
            _ => self.to_string(),
        }
    }
}

impl From<crate::storage::StorageError> for ExportError {
    fn from(err: crate::storage::StorageError) -> Self {
        ExportError::Write(err.to_string())
    }
}

#[cfg(feature = "duckdb-backend")]
impl From<duckdb::Error> for ExportError {
    fn from(err: duckdb::Error) -> Self {
        ExportError::Query(err.to_string())
    }
}

#[cfg(feature = "postgres-backend")]
impl From<tokio_postgres::Error> for ExportError {
    fn from(err: tokio_postgres::Error) -> Self {
        ExportError::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_kind() {
        let err = ExportError::Schema("no primary key".to_string());
        assert_eq!(err.to_string(), "Schema error: no primary key");
    }

    #[test]
    fn test_user_message_adds_hint() {
        let err = ExportError::Data("no rows".to_string());
        let msg = err.user_message();
        assert!(msg.starts_with("Nothing to export: no rows"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_storage_error_maps_to_write() {
        let err: ExportError =
            crate::storage::StorageError::PermissionDenied("escape".to_string()).into();
        assert!(matches!(err, ExportError::Write(_)));
    }
}
