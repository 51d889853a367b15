//! Schema introspection
//!
//! Discovers the primary-key column and the ordered column list of the
//! exported table from the data source's metadata.

use crate::error::ExportError;
use crate::models::TableSchema;
use crate::source::DataSource;
use crate::validation::validate_element_name;

/// Reads table metadata from a [`DataSource`]
pub struct SchemaIntrospector<'a> {
    source: &'a dyn DataSource,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// Discover the table schema
    ///
    /// Fails with `Schema("no primary key")` when the table has no primary
    /// key and `Schema("no columns")` when the column lookup is empty. Every
    /// column name must be a valid XML element name.
    pub fn introspect(&self, schema: &str, table: &str) -> Result<TableSchema, ExportError> {
        let primary_key = self.primary_key(schema, table)?;

        let columns = self.source.column_names(schema, table)?;
        if columns.is_empty() {
            return Err(ExportError::Schema("no columns".to_string()));
        }

        for column in &columns {
            validate_element_name(column)
                .map_err(|e| ExportError::Schema(format!("column {column}: {e}")))?;
        }

        tracing::info!(
            "Table {}.{}: primary key {}, {} columns",
            schema,
            table,
            primary_key,
            columns.len()
        );

        TableSchema::new(primary_key, columns)
    }

    fn primary_key(&self, schema: &str, table: &str) -> Result<String, ExportError> {
        let mut keys = self.source.primary_key_columns(schema, table)?;
        if keys.len() > 1 {
            tracing::warn!(
                "Table {}.{} has a composite primary key ({}); ordering by {} only",
                schema,
                table,
                keys.join(", "),
                keys[0]
            );
        }
        keys.truncate(1);
        match keys.pop() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ExportError::Schema("no primary key".to_string())),
        }
    }
}
