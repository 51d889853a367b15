//! Sampled rows and their cell values

use std::cmp::Ordering;

use crate::error::ExportError;

/// Maximum number of rows taken from the top of the ordered table
pub const SAMPLE_SIZE: usize = 10;

/// A nullable scalar cell value as returned by the data source
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

static NULL_CELL: CellValue = CellValue::Null;

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form of the value, `None` for SQL NULL
    ///
    /// Everything downstream (checksum, min/max, XML text) works on this form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Integer(n) => Some(n.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    /// Ordering used for `ORDER BY ... ASC` on in-process tables
    ///
    /// NULL sorts first, numbers compare numerically, text compares by code
    /// point, and numbers sort before text.
    pub fn sql_cmp(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Integer(i64::from(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                None => n
                    .as_f64()
                    .map(CellValue::Float)
                    .unwrap_or_else(|| CellValue::Text(n.to_string())),
            },
            serde_json::Value::String(s) => CellValue::Text(s),
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One sampled row: column name to cell value, in result-set order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell, replacing an existing cell of the same column
    pub fn with(mut self, column: impl Into<String>, value: CellValue) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        let column = column.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Value of a column; a column missing from the row reads as NULL
    pub fn value(&self, column: &str) -> &CellValue {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .unwrap_or(&NULL_CELL)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// Ordered, non-empty sample of at most [`SAMPLE_SIZE`] rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    /// Wrap sampled rows; an empty sample is a terminal data error
    pub fn new(mut rows: Vec<Row>) -> Result<Self, ExportError> {
        if rows.is_empty() {
            return Err(ExportError::Data("no rows".to_string()));
        }
        if rows.len() > SAMPLE_SIZE {
            tracing::warn!(
                "Data source returned {} rows, keeping the first {}",
                rows.len(),
                SAMPLE_SIZE
            );
            rows.truncate(SAMPLE_SIZE);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_as_null() {
        let row = Row::new().with("id", CellValue::Integer(1));
        assert!(row.value("name").is_null());
        assert_eq!(row.value("id"), &CellValue::Integer(1));
    }

    #[test]
    fn test_insert_replaces_existing_cell() {
        let mut row = Row::new().with("name", CellValue::Text("Ann".to_string()));
        row.insert("name", CellValue::Null);
        assert_eq!(row.len(), 1);
        assert!(row.value("name").is_null());
    }

    #[test]
    fn test_as_text_forms() {
        assert_eq!(CellValue::Integer(-7).as_text().as_deref(), Some("-7"));
        assert_eq!(CellValue::Float(1.5).as_text().as_deref(), Some("1.5"));
        assert_eq!(CellValue::Float(2.0).as_text().as_deref(), Some("2"));
        assert_eq!(CellValue::Null.as_text(), None);
    }

    #[test]
    fn test_sql_cmp_nulls_first() {
        let mut values = vec![
            CellValue::Text("b".to_string()),
            CellValue::Integer(10),
            CellValue::Null,
            CellValue::Float(2.5),
        ];
        values.sort_by(|a, b| a.sql_cmp(b));
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Float(2.5),
                CellValue::Integer(10),
                CellValue::Text("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(CellValue::from(serde_json::json!(3)), CellValue::Integer(3));
        assert_eq!(CellValue::from(serde_json::json!(0.25)), CellValue::Float(0.25));
        assert_eq!(CellValue::from(serde_json::json!(true)), CellValue::Integer(1));
        assert_eq!(CellValue::from(serde_json::json!(null)), CellValue::Null);
        assert_eq!(
            CellValue::from(serde_json::json!("x")),
            CellValue::Text("x".to_string())
        );
    }

    #[test]
    fn test_rowset_rejects_empty() {
        let err = RowSet::new(Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Data error: no rows");
    }

    #[test]
    fn test_rowset_truncates_to_sample_size() {
        let rows = (0..15)
            .map(|i| Row::new().with("id", CellValue::Integer(i)))
            .collect();
        let set = RowSet::new(rows).unwrap();
        assert_eq!(set.len(), SAMPLE_SIZE);
        assert_eq!(set.rows()[9].value("id"), &CellValue::Integer(9));
    }
}
