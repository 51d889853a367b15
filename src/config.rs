//! Configuration types for an export run
//!
//! The whole run is driven by one [`ExportConfig`] value built by the caller
//! (CLI, tests) and passed into the pipeline. Defaults reproduce the
//! historical HR export: `employees` from the `hr` database into `/tmp`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ExportError;

/// Data source backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-process tables loaded from a JSON fixture file
    #[default]
    Fixture,
    /// DuckDB database file
    Duckdb,
    /// PostgreSQL server
    Postgres,
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixture" | "json" => Ok(Backend::Fixture),
            "duckdb" => Ok(Backend::Duckdb),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            _ => Err(format!(
                "Unknown backend: {s}. Valid options: fixture, duckdb, postgres"
            )),
        }
    }
}

/// Connection parameters for the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub backend: Backend,
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Database name; for DuckDB the database file path
    pub database: String,
    /// JSON fixture file read by the fixture backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
    /// Schema used for metadata lookups (see [`ConnectionConfig::metadata_schema`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            host: "127.0.0.1".to_string(),
            port: None,
            database: "hr".to_string(),
            fixture: None,
            schema: None,
            user: "root".to_string(),
            password: String::new(),
        }
    }
}

impl ConnectionConfig {
    /// Schema name to use in metadata queries
    ///
    /// An explicit `schema` wins. Otherwise DuckDB uses `main`, PostgreSQL
    /// uses `public` and the fixture backend treats the database name as
    /// the schema, as MySQL does.
    pub fn metadata_schema(&self) -> &str {
        if let Some(schema) = self.schema.as_deref() {
            return schema;
        }
        match self.backend {
            Backend::Duckdb => "main",
            Backend::Postgres => "public",
            Backend::Fixture => &self.database,
        }
    }
}

/// Configuration for a single export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub connection: ConnectionConfig,
    /// Table to export
    pub table: String,
    /// Directory receiving the XML and DTD files
    pub output_directory: PathBuf,
    /// File name stem shared by both artifacts
    pub basename: String,
    /// Name of the XML root element (also the DOCTYPE name)
    pub root_element: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            table: "employees".to_string(),
            output_directory: PathBuf::from("/tmp"),
            basename: "hr_export".to_string(),
            root_element: "hrExport".to_string(),
        }
    }
}

impl ExportConfig {
    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self, ExportError> {
        toml::from_str(content).map_err(|e| ExportError::Config(e.to_string()))
    }

    /// Check the values the pipeline relies on
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.table.trim().is_empty() {
            return Err(ExportError::Config("table name is empty".to_string()));
        }
        if self.basename.trim().is_empty() {
            return Err(ExportError::Config("basename is empty".to_string()));
        }
        if self.basename.contains(['/', '\\']) || self.basename.contains("..") {
            return Err(ExportError::Config(format!(
                "basename must be a bare file name: {}",
                self.basename
            )));
        }
        crate::validation::validate_element_name(&self.root_element)
            .map_err(|e| ExportError::Config(format!("root element: {e}")))?;
        Ok(())
    }

    /// File name of the DTD artifact
    pub fn dtd_file_name(&self) -> String {
        format!("{}.dtd", self.basename)
    }

    /// File name of the XML artifact
    pub fn xml_file_name(&self) -> String {
        format!("{}.xml", self.basename)
    }

    /// Full path of the DTD artifact
    pub fn dtd_path(&self) -> PathBuf {
        self.output_directory.join(self.dtd_file_name())
    }

    /// Full path of the XML artifact
    pub fn xml_path(&self) -> PathBuf {
        self.output_directory.join(self.xml_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hr_export() {
        let config = ExportConfig::default();
        assert_eq!(config.table, "employees");
        assert_eq!(config.connection.database, "hr");
        assert_eq!(config.connection.user, "root");
        assert_eq!(config.xml_path(), PathBuf::from("/tmp/hr_export.xml"));
        assert_eq!(config.dtd_path(), PathBuf::from("/tmp/hr_export.dtd"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ExportConfig::from_toml_str(
            r#"
table = "departments"
outputDirectory = "/var/exports"

[connection]
backend = "postgres"
host = "db.internal"
port = 5433
user = "reader"
"#,
        )
        .unwrap();

        assert_eq!(config.table, "departments");
        assert_eq!(config.output_directory, PathBuf::from("/var/exports"));
        assert_eq!(config.connection.backend, Backend::Postgres);
        assert_eq!(config.connection.port, Some(5433));
        assert_eq!(config.connection.database, "hr");
        assert_eq!(config.basename, "hr_export");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ExportConfig::from_toml_str("table = ").unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_metadata_schema_per_backend() {
        let mut conn = ConnectionConfig::default();
        assert_eq!(conn.metadata_schema(), "hr");
        conn.backend = Backend::Duckdb;
        assert_eq!(conn.metadata_schema(), "main");
        conn.backend = Backend::Postgres;
        assert_eq!(conn.metadata_schema(), "public");
        conn.schema = Some("staff".to_string());
        assert_eq!(conn.metadata_schema(), "staff");
    }

    #[test]
    fn test_validate_rejects_bad_basename() {
        let config = ExportConfig {
            basename: "../escape".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ExportError::Config(_))));

        let config = ExportConfig {
            table: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ExportError::Config(_))));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("DuckDB".parse::<Backend>().unwrap(), Backend::Duckdb);
        assert_eq!("postgresql".parse::<Backend>().unwrap(), Backend::Postgres);
        assert_eq!("json".parse::<Backend>().unwrap(), Backend::Fixture);
        assert!("oracle".parse::<Backend>().is_err());
    }
}
