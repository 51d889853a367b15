//! PostgreSQL data source
//!
//! Uses the async `tokio-postgres` client on a private current-thread
//! runtime. Every call blocks until the query completes, so callers see a
//! plain synchronous source. Rows are fetched over the simple query protocol,
//! which returns every value in its text form (NULL stays NULL).

use tokio::runtime::Runtime;
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};

use super::{DataSource, sample_query};
use crate::config::ConnectionConfig;
use crate::error::ExportError;
use crate::models::{CellValue, Row};

const PRIMARY_KEY_SQL: &str = "
    SELECT kcu.column_name::text
    FROM information_schema.key_column_usage kcu
    JOIN information_schema.table_constraints tc
      ON tc.constraint_schema = kcu.constraint_schema
     AND tc.constraint_name = kcu.constraint_name
    WHERE tc.constraint_type = 'PRIMARY KEY'
      AND kcu.table_schema = $1
      AND kcu.table_name = $2
    ORDER BY kcu.ordinal_position";

const COLUMNS_SQL: &str = "
    SELECT column_name::text
    FROM information_schema.columns
    WHERE table_schema = $1
      AND table_name = $2
    ORDER BY ordinal_position";

/// Data source backed by a PostgreSQL server
pub struct PostgresSource {
    // Declared before the runtime so the client is dropped first
    client: Client,
    runtime: Runtime,
    label: String,
}

impl PostgresSource {
    /// Connect with the configured host, port, database and credentials
    pub fn connect(config: &ConnectionConfig) -> Result<Self, ExportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ExportError::Connection(format!("Failed to start runtime: {}", e)))?;

        let mut pg = tokio_postgres::Config::new();
        pg.host(&config.host)
            .dbname(&config.database)
            .user(&config.user)
            .password(&config.password);
        if let Some(port) = config.port {
            pg.port(port);
        }

        let (client, connection) = runtime
            .block_on(pg.connect(NoTls))
            .map_err(|e| ExportError::Connection(e.to_string()))?;

        // The connection task is driven whenever the runtime blocks on a query
        runtime.spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!("PostgreSQL connection closed with error: {}", e);
            }
        });

        let label = format!(
            "postgres://{}@{}:{}/{}",
            config.user,
            config.host,
            config.port.unwrap_or(5432),
            config.database
        );
        tracing::info!("Connected to {}", label);

        Ok(Self {
            client,
            runtime,
            label,
        })
    }

    fn query_names(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<String>, ExportError> {
        let rows = self
            .runtime
            .block_on(self.client.query(sql, &[&schema, &table]))?;
        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            names.push(row.try_get::<_, String>(0)?);
        }
        Ok(names)
    }
}

impl DataSource for PostgresSource {
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
        tracing::debug!("PostgreSQL sample query: {}", sql);

        let messages = self.runtime.block_on(self.client.simple_query(&sql))?;

        let mut results = Vec::new();
        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                let mut out = Row::new();
                for (i, column) in row.columns().iter().enumerate() {
                    let value = match row.try_get(i)? {
                        Some(text) => CellValue::Text(text.to_string()),
                        None => CellValue::Null,
                    };
                    out.insert(column.name(), value);
                }
                results.push(out);
            }
        }

        Ok(results)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
