//! Export command implementation

use clap::Args;
use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::config::{Backend, ExportConfig};
use crate::pipeline::{ExportOutcome, export_table};

/// Options of the export command
///
/// Values given on the command line override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Data source backend (fixture, duckdb, postgres)
    #[arg(long)]
    pub backend: Option<String>,

    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database port
    #[arg(long)]
    pub port: Option<u16>,

    /// Database name (DuckDB: database file path)
    #[arg(long)]
    pub database: Option<String>,

    /// Schema used for metadata lookups
    #[arg(long)]
    pub schema: Option<String>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database password
    #[arg(long)]
    pub password: Option<String>,

    /// Table to export
    #[arg(long)]
    pub table: Option<String>,

    /// Directory receiving the XML and DTD files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// File name stem of both artifacts
    #[arg(long)]
    pub basename: Option<String>,

    /// Name of the XML root element
    #[arg(long)]
    pub root_element: Option<String>,

    /// JSON fixture file (selects the fixture backend)
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

/// Build the effective configuration: file (or defaults), then flags
pub fn resolve_config(args: &ExportArgs) -> Result<ExportConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))?;
            ExportConfig::from_toml_str(&content)?
        }
        None => ExportConfig::default(),
    };

    let conn = &mut config.connection;
    if let Some(backend) = &args.backend {
        conn.backend = backend
            .parse::<Backend>()
            .map_err(CliError::InvalidArgument)?;
    }
    if let Some(host) = &args.host {
        conn.host = host.clone();
    }
    if let Some(port) = args.port {
        conn.port = Some(port);
    }
    if let Some(database) = &args.database {
        conn.database = database.clone();
    }
    if let Some(schema) = &args.schema {
        conn.schema = Some(schema.clone());
    }
    if let Some(user) = &args.user {
        conn.user = user.clone();
    }
    if let Some(password) = &args.password {
        conn.password = password.clone();
    }
    if let Some(fixture) = &args.fixture {
        conn.backend = Backend::Fixture;
        conn.fixture = Some(fixture.clone());
    }

    if let Some(table) = &args.table {
        config.table = table.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_directory = dir.clone();
    }
    if let Some(basename) = &args.basename {
        config.basename = basename.clone();
    }
    if let Some(root) = &args.root_element {
        config.root_element = root.clone();
    }

    Ok(config)
}

/// Handle the export command
pub fn handle_export(args: &ExportArgs) -> Result<ExportOutcome, CliError> {
    let config = resolve_config(args)?;
    tracing::debug!(
        backend = ?config.connection.backend,
        table = %config.table,
        "Resolved configuration"
    );
    Ok(export_table(&config)?)
}
