//! Data source abstraction
//!
//! The export pipeline needs exactly three capabilities from a relational
//! store: primary-key metadata, ordered column metadata, and an ordered,
//! limited `SELECT *`. Implementations:
//! - MemorySource: in-process tables, optionally loaded from a JSON fixture
//! - DuckDbSource: DuckDB database file (feature `duckdb-backend`)
//! - PostgresSource: PostgreSQL server (feature `postgres-backend`)

pub mod memory;

#[cfg(feature = "duckdb-backend")]
pub mod duckdb;

#[cfg(feature = "postgres-backend")]
pub mod postgres;

pub use memory::{MemorySource, MemoryTable};

#[cfg(feature = "duckdb-backend")]
pub use self::duckdb::DuckDbSource;
#[cfg(feature = "postgres-backend")]
pub use self::postgres::PostgresSource;

use crate::config::{Backend, ConnectionConfig};
use crate::error::ExportError;
use crate::models::Row;

/// Minimal query interface required by the export pipeline
///
/// Every call is a single blocking attempt; errors are not retried.
pub trait DataSource {
    /// Columns bound to the table's primary key, in constraint-column order
    fn primary_key_columns(&self, schema: &str, table: &str) -> Result<Vec<String>, ExportError>;

    /// All column names of the table, in ordinal-position order
    fn column_names(&self, schema: &str, table: &str) -> Result<Vec<String>, ExportError>;

    /// `SELECT * FROM table ORDER BY order_by ASC LIMIT limit`
    fn select_ordered(
        &self,
        schema: &str,
        table: &str,
        order_by: &str,
        limit: usize,
    ) -> Result<Vec<Row>, ExportError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Open the data source selected by the connection configuration
///
/// The returned value owns the connection; dropping it closes the connection.
pub fn connect(config: &ConnectionConfig) -> Result<Box<dyn DataSource>, ExportError> {
    match config.backend {
        Backend::Fixture => {
            let path = config.fixture.as_ref().ok_or_else(|| {
                ExportError::Config("fixture backend requires a fixture file".to_string())
            })?;
            Ok(Box::new(MemorySource::from_fixture_file(path)?))
        }
        Backend::Duckdb => {
            #[cfg(feature = "duckdb-backend")]
            {
                Ok(Box::new(DuckDbSource::open(&config.database)?))
            }
            #[cfg(not(feature = "duckdb-backend"))]
            {
                Err(ExportError::Config(
                    "DuckDB support not enabled. Build with --features duckdb-backend".to_string(),
                ))
            }
        }
        Backend::Postgres => {
            #[cfg(feature = "postgres-backend")]
            {
                Ok(Box::new(PostgresSource::connect(config)?))
            }
            #[cfg(not(feature = "postgres-backend"))]
            {
                Err(ExportError::Config(
                    "PostgreSQL support not enabled. Build with --features postgres-backend"
                        .to_string(),
                ))
            }
        }
    }
}

/// Quote an identifier with double quotes, doubling any internal quote.
///
/// DuckDB and PostgreSQL both use standard SQL quoting.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Build the sample query for a schema-qualified table
pub fn sample_query(schema: &str, table: &str, order_by: &str, limit: usize) -> String {
    format!(
        "SELECT * FROM {}.{} ORDER BY {} ASC LIMIT {}",
        quote_identifier(schema),
        quote_identifier(table),
        quote_identifier(order_by),
        limit
    )
}
