//! In-process data source
//!
//! Holds whole tables in memory. Used by tests and by the `fixture` backend,
//! which loads tables from a JSON document of the form:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "employees",
//!       "primaryKey": ["id"],
//!       "columns": ["id", "name"],
//!       "rows": [{ "id": 1, "name": "Ann" }]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::DataSource;
use crate::error::ExportError;
use crate::models::{CellValue, Row};

/// A table held in memory
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryTable {
    /// Owning schema; `None` matches any schema
    #[serde(default)]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default)]
    pub primary_key: Vec<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_rows")]
    pub rows: Vec<Row>,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    fn matches(&self, schema: &str, table: &str) -> bool {
        self.name == table && self.schema.as_deref().is_none_or(|s| s == schema)
    }
}

fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<Row>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<serde_json::Map<String, serde_json::Value>> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|obj| {
            obj.into_iter()
                .map(|(column, value)| (column, CellValue::from(value)))
                .collect()
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct Fixture {
    tables: Vec<MemoryTable>,
}

/// Data source over in-memory tables
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: Vec<MemoryTable>,
}

impl MemorySource {
    pub fn new(tables: Vec<MemoryTable>) -> Self {
        Self { tables }
    }

    /// Parse a JSON fixture document
    pub fn from_fixture_str(content: &str) -> Result<Self, ExportError> {
        let fixture: Fixture = serde_json::from_str(content)
            .map_err(|e| ExportError::Connection(format!("Invalid fixture: {}", e)))?;
        Ok(Self::new(fixture.tables))
    }

    /// Load a JSON fixture file
    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Connection(format!("Failed to open fixture {}: {}", path.display(), e))
        })?;
        Self::from_fixture_str(&content)
    }

    fn table(&self, schema: &str, table: &str) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.matches(schema, table))
    }
}

impl DataSource for MemorySource {
    fn primary_key_columns(&self, schema: &str, table: &str) -> Result<Vec<String>, ExportError> {
        Ok(self
            .table(schema, table)
            .map(|t| t.primary_key.clone())
            .unwrap_or_default())
    }

    fn column_names(&self, schema: &str, table: &str) -> Result<Vec<String>, ExportError> {
        Ok(self
            .table(schema, table)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    fn select_ordered(
        &self,
        schema: &str,
        table: &str,
        order_by: &str,
        limit: usize,
    ) -> Result<Vec<Row>, ExportError> {
        let table = self.table(schema, table).ok_or_else(|| {
            ExportError::Query(format!("Table {schema}.{table} does not exist"))
        })?;

        if !table.columns.iter().any(|c| c == order_by) {
            return Err(ExportError::Query(format!(
                "Unknown column {order_by} in table {}",
                table.name
            )));
        }

        let mut rows = table.rows.clone();
        rows.sort_by(|a, b| a.value(order_by).sql_cmp(b.value(order_by)));
        rows.truncate(limit);

        // SELECT * yields every table column, NULL where the row has no value
        Ok(rows
            .into_iter()
            .map(|row| {
                table
                    .columns
                    .iter()
                    .map(|c| (c.clone(), row.value(c).clone()))
                    .collect()
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!("in-memory source ({} tables)", self.tables.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employees() -> MemorySource {
        MemorySource::new(vec![
            MemoryTable::new("employees", &["id", "name"])
                .with_primary_key(&["id"])
                .with_row(
                    Row::new()
                        .with("id", CellValue::Integer(3))
                        .with("name", CellValue::Text("Cy".to_string())),
                )
                .with_row(
                    Row::new()
                        .with("id", CellValue::Integer(1))
                        .with("name", CellValue::Text("Ann".to_string())),
                )
                .with_row(Row::new().with("id", CellValue::Integer(2))),
        ])
    }

    #[test]
    fn test_select_ordered_sorts_and_limits() {
        let source = employees();
        let rows = source.select_ordered("hr", "employees", "id", 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value("id"), &CellValue::Integer(1));
        assert_eq!(rows[1].value("id"), &CellValue::Integer(2));
        assert_eq!(rows[1].len(), 2);
        assert!(rows[1].value("name").is_null());
    }

    #[test]
    fn test_unknown_table_has_no_metadata() {
        let source = employees();
        assert!(source.primary_key_columns("hr", "jobs").unwrap().is_empty());
        assert!(source.column_names("hr", "jobs").unwrap().is_empty());
        assert!(matches!(
            source.select_ordered("hr", "jobs", "id", 10),
            Err(ExportError::Query(_))
        ));
    }

    #[test]
    fn test_schema_filter() {
        let source = MemorySource::new(vec![
            MemoryTable::new("employees", &["id"])
                .with_schema("hr")
                .with_primary_key(&["id"]),
        ]);
        assert_eq!(source.column_names("hr", "employees").unwrap(), vec!["id"]);
        assert!(source.column_names("sales", "employees").unwrap().is_empty());
    }

    #[test]
    fn test_from_fixture_str() {
        let source = MemorySource::from_fixture_str(
            r#"{
                "tables": [{
                    "name": "employees",
                    "primaryKey": ["id"],
                    "columns": ["id", "name", "salary"],
                    "rows": [
                        {"id": 2, "name": "Bo", "salary": null},
                        {"id": 1, "name": "Ann", "salary": 1200.5}
                    ]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(
            source.primary_key_columns("hr", "employees").unwrap(),
            vec!["id"]
        );
        let rows = source.select_ordered("hr", "employees", "id", 10).unwrap();
        assert_eq!(rows[0].value("name"), &CellValue::Text("Ann".to_string()));
        assert_eq!(rows[0].value("salary"), &CellValue::Float(1200.5));
        assert!(rows[1].value("salary").is_null());
    }

    #[test]
    fn test_invalid_fixture() {
        assert!(matches!(
            MemorySource::from_fixture_str("{\"tables\": 3}"),
            Err(ExportError::Connection(_))
        ));
    }
}
