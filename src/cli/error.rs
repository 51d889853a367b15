//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ExportError;

/// Errors reported by the dtd-export binary
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),
}

impl CliError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CliError::Export(err) => err.user_message(),
            CliError::FileReadError(path, reason) => {
                format!(
                    "Failed to read file {}: {}\n\nHint: Check that the file exists and is readable.",
                    path.display(),
                    reason
                )
            }
            CliError::InvalidArgument(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_passes_hint_through() {
        let err = CliError::from(ExportError::Data("no rows".to_string()));
        assert_eq!(err.to_string(), "Data error: no rows");
        assert!(err.user_message().contains("Hint: The table has no rows."));
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = CliError::InvalidArgument("Unknown backend: oracle".to_string());
        assert_eq!(err.user_message(), "Invalid argument: Unknown backend: oracle");
    }
}
