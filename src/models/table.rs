//! Table schema discovered for an export

use crate::error::ExportError;

/// Primary key and ordered columns of the exported table
///
/// Columns keep the source's ordinal-position order; that order drives both
/// the DTD `row` content model and the child order of every `row` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    primary_key_column: String,
    columns: Vec<String>,
}

impl TableSchema {
    /// Build a schema, enforcing unique columns and `primary_key_column ∈ columns`
    pub fn new(primary_key_column: String, columns: Vec<String>) -> Result<Self, ExportError> {
        if columns.is_empty() {
            return Err(ExportError::Schema("no columns".to_string()));
        }

        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].contains(column) {
                return Err(ExportError::Schema(format!("duplicate column: {column}")));
            }
        }

        if !columns.contains(&primary_key_column) {
            return Err(ExportError::Schema(format!(
                "primary key column {primary_key_column} is not among the table columns"
            )));
        }

        Ok(Self {
            primary_key_column,
            columns,
        })
    }

    pub fn primary_key_column(&self) -> &str {
        &self.primary_key_column
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
