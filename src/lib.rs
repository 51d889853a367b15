//! DTD Export - sample a relational table into a self-describing XML document
//!
//! Provides:
//! - Schema introspection (primary key and ordered columns)
//! - Row sampling (first ten rows ordered by the primary key)
//! - Control block calculation (counts, key range, checksum)
//! - DTD and XML rendering, written through a storage backend
//! - Data sources: in-memory/JSON fixture, DuckDB, PostgreSQL

pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod export;
pub mod introspect;
pub mod models;
pub mod pipeline;
pub mod sample;
pub mod source;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use config::{Backend, ConnectionConfig, ExportConfig};
pub use control::ControlBlock;
pub use error::ExportError;
pub use export::{DTDExporter, ExportResult, XMLExporter};
pub use introspect::SchemaIntrospector;
pub use models::{CellValue, Row, RowSet, SAMPLE_SIZE, TableSchema};
pub use pipeline::{ExportOutcome, export_table, run_export};
pub use sample::RowSampler;
pub use source::{DataSource, MemorySource, MemoryTable};
pub use storage::{FileSystemStorageBackend, StorageBackend, StorageError};

#[cfg(feature = "duckdb-backend")]
pub use source::DuckDbSource;
#[cfg(feature = "postgres-backend")]
pub use source::PostgresSource;
