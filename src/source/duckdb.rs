//! DuckDB data source

use ::duckdb::types::{TimeUnit, Value};
use ::duckdb::{AccessMode, Config, Connection};
use chrono::{DateTime, NaiveDate};

use super::{DataSource, sample_query};
use crate::error::ExportError;
use crate::models::{CellValue, Row};

const PRIMARY_KEY_SQL: &str = "
    SELECT kcu.column_name
    FROM information_schema.key_column_usage kcu
    JOIN information_schema.table_constraints tc
      ON tc.constraint_schema = kcu.constraint_schema
     AND tc.constraint_name = kcu.constraint_name
     AND tc.table_name = kcu.table_name
    WHERE tc.constraint_type = 'PRIMARY KEY'
      AND kcu.table_schema = ?1
      AND kcu.table_name = ?2
    ORDER BY kcu.ordinal_position";

const COLUMNS_SQL: &str = "
    SELECT column_name
    FROM information_schema.columns
    WHERE table_schema = ?1
      AND table_name = ?2
    ORDER BY ordinal_position";

/// Data source backed by a DuckDB database
pub struct DuckDbSource {
    conn: Connection,
    path: Option<String>,
}

impl DuckDbSource {
    /// Open an existing database file read-only
    pub fn open(path: &str) -> Result<Self, ExportError> {
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| ExportError::Connection(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| ExportError::Connection(format!("{}: {}", path, e)))?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Wrap an already open connection (e.g. an in-memory database)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn, path: None }
    }

    fn query_names(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<String>, ExportError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([schema, table], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }
}

impl DataSource for DuckDbSource {
    fn primary_key_columns(&self, schema: &str, table: &str) -> Result<Vec<String>, ExportError> {
        self.query_names(PRIMARY_KEY_SQL, schema, table)
    }

    fn column_names(&self, schema: &str, table: &str) -> Result<Vec<String>, ExportError> {
        self.query_names(COLUMNS_SQL, schema, table)
    }

    fn select_ordered(
        &self,
        schema: &str,
        table: &str,
        order_by: &str,
        limit: usize,
    ) -> Result<Vec<Row>, ExportError> {
        let sql = sample_query(schema, table, order_by, limit);
        tracing::debug!("DuckDB sample query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        // Column names are only available once the query has executed
        let column_count = rows.as_ref().map(|r| r.column_count()).unwrap_or(0);
        let column_names: Vec<String> = (0..column_count)
            .map(|i| {
                rows.as_ref()
                    .and_then(|r| r.column_name(i).ok())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("col{}", i))
            })
            .collect();

        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let mut out = Row::new();
            for (i, name) in column_names.iter().enumerate() {
                let value: Value = row.get(i)?;
                out.insert(name.clone(), cell_from_duckdb(value));
            }
            results.push(out);
        }

        Ok(results)
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("duckdb:{}", path),
            None => "duckdb:memory".to_string(),
        }
    }
}

fn micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

/// Convert a DuckDB value into the scalar form used by the export
///
/// Dates, times and timestamps are rendered the way MySQL returns them as
/// text. Intervals and nested values use DuckDB's own text form.
fn cell_from_duckdb(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Boolean(b) => CellValue::Integer(i64::from(b)),
        Value::TinyInt(n) => CellValue::Integer(n.into()),
        Value::SmallInt(n) => CellValue::Integer(n.into()),
        Value::Int(n) => CellValue::Integer(n.into()),
        Value::BigInt(n) => CellValue::Integer(n),
        Value::UTinyInt(n) => CellValue::Integer(n.into()),
        Value::USmallInt(n) => CellValue::Integer(n.into()),
        Value::UInt(n) => CellValue::Integer(n.into()),
        Value::UBigInt(n) => i64::try_from(n)
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::Text(n.to_string())),
        Value::HugeInt(n) => i64::try_from(n)
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::Text(n.to_string())),
        Value::Float(f) => CellValue::Float(f.into()),
        Value::Double(f) => CellValue::Float(f),
        Value::Decimal(d) => CellValue::Text(d.to_string()),
        Value::Text(s) => CellValue::Text(s),
        Value::Enum(s) => CellValue::Text(s),
        Value::Blob(bytes) => CellValue::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Date32(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(days.into())))
            .map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or_else(|| CellValue::Text(days.to_string())),
        Value::Timestamp(unit, v) => DateTime::from_timestamp_micros(micros(unit, v))
            .map(|ts| CellValue::Text(ts.naive_utc().format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or_else(|| CellValue::Text(v.to_string())),
        Value::Time64(unit, v) => CellValue::Text(format_clock(micros(unit, v))),
        Value::Interval {
            months,
            days,
            nanos,
        } => CellValue::Text(format_interval(months, days, nanos)),
        Value::UHugeInt(n) => i64::try_from(n)
            .map(CellValue::Integer)
            .unwrap_or_else(|_| CellValue::Text(n.to_string())),
        Value::List(items) | Value::Array(items) => {
            let items: Vec<String> = items.into_iter().map(nested_text).collect();
            CellValue::Text(format!("[{}]", items.join(", ")))
        }
        Value::Struct(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(name, value)| format!("'{}': {}", name, nested_text(value.clone())))
                .collect();
            CellValue::Text(format!("{{{}}}", fields.join(", ")))
        }
        Value::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", nested_text(key.clone()), nested_text(value.clone()))
                })
                .collect();
            CellValue::Text(format!("{{{}}}", entries.join(", ")))
        }
        Value::Union(inner) => cell_from_duckdb(*inner),
        other => {
            tracing::warn!("Unsupported DuckDB value exported in debug form: {:?}", other);
            CellValue::Text(format!("{:?}", other))
        }
    }
}

/// Text of a value nested in a LIST, STRUCT or MAP; NULL is spelled out
fn nested_text(value: Value) -> String {
    cell_from_duckdb(value)
        .as_text()
        .unwrap_or_else(|| "NULL".to_string())
}

/// `HH:MM:SS` for a time of day or the clock part of an interval
fn format_clock(micros: i64) -> String {
    let sign = if micros < 0 { "-" } else { "" };
    let secs = micros.unsigned_abs() / 1_000_000;
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        secs / 3600,
        secs / 60 % 60,
        secs % 60
    )
}

/// DuckDB's interval text, e.g. `1 year 2 months 3 days 04:05:06`
fn format_interval(months: i32, days: i32, nanos: i64) -> String {
    let mut parts = Vec::new();
    for (count, unit) in [
        (i64::from(months / 12), "year"),
        (i64::from(months % 12), "month"),
        (i64::from(days), "day"),
    ] {
        if count != 0 {
            let plural = if count.abs() == 1 { "" } else { "s" };
            parts.push(format!("{count} {unit}{plural}"));
        }
    }
    if nanos != 0 || parts.is_empty() {
        parts.push(format_clock(nanos / 1_000));
    }
    parts.join(" ")
}
