//! Row sampling

use crate::error::ExportError;
use crate::models::{RowSet, SAMPLE_SIZE};
use crate::source::DataSource;

/// Fetches the first [`SAMPLE_SIZE`] rows of a table ordered by its primary key
pub struct RowSampler<'a> {
    source: &'a dyn DataSource,
}

impl<'a> RowSampler<'a> {
    pub fn new(source: &'a dyn DataSource) -> Self {
        Self { source }
    }

    /// Read-only `SELECT *` ordered ascending by `primary_key`, at most ten rows
    pub fn sample(
        &self,
        schema: &str,
        table: &str,
        primary_key: &str,
    ) -> Result<RowSet, ExportError> {
        let rows = self
            .source
            .select_ordered(schema, table, primary_key, SAMPLE_SIZE)?;
        tracing::info!("Sampled {} rows from {}.{}", rows.len(), schema, table);
        RowSet::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellValue, Row};
    use crate::source::{MemorySource, MemoryTable};

    fn table_with(count: i64) -> MemorySource {
        let mut table = MemoryTable::new("employees", &["id"]).with_primary_key(&["id"]);
        for id in (1..=count).rev() {
            table = table.with_row(Row::new().with("id", CellValue::Integer(id)));
        }
        MemorySource::new(vec![table])
    }

    #[test]
    fn test_sample_limits_to_ten_in_key_order() {
        let source = table_with(25);
        let rows = RowSampler::new(&source)
            .sample("hr", "employees", "id")
            .unwrap();
        assert_eq!(rows.len(), 10);
        let ids: Vec<_> = rows.iter().map(|r| r.value("id").clone()).collect();
        assert_eq!(ids.first(), Some(&CellValue::Integer(1)));
        assert_eq!(ids.last(), Some(&CellValue::Integer(10)));
    }

    #[test]
    fn test_sample_small_table() {
        let source = table_with(3);
        let rows = RowSampler::new(&source)
            .sample("hr", "employees", "id")
            .unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_empty_table_is_data_error() {
        let source = table_with(0);
        let err = RowSampler::new(&source)
            .sample("hr", "employees", "id")
            .unwrap_err();
        assert!(matches!(err, ExportError::Data(_)));
        assert_eq!(err.to_string(), "Data error: no rows");
    }
}
