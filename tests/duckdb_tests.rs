//! Export tests against a DuckDB database file
#![cfg(feature = "duckdb-backend")]

use duckdb::Connection;
use dtd_export::config::{Backend, ExportConfig};
use dtd_export::error::ExportError;
use dtd_export::pipeline::export_table;
use tempfile::TempDir;

fn create_database(dir: &TempDir, sql: &str) -> String {
    let path = dir.path().join("hr.duckdb");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    drop(conn);
    path.to_string_lossy().into_owned()
}

fn config(database: String, dir: &TempDir) -> ExportConfig {
    let mut config = ExportConfig {
        output_directory: dir.path().join("out"),
        ..Default::default()
    };
    config.connection.backend = Backend::Duckdb;
    config.connection.database = database;
    config
}

#[test]
fn test_export_from_duckdb_file() {
    let dir = TempDir::new().unwrap();
    let database = create_database(
        &dir,
        "CREATE TABLE employees (id INTEGER PRIMARY KEY, name VARCHAR, email VARCHAR);
         INSERT INTO employees VALUES (2, 'Bo', NULL), (1, 'Ann', 'ann@example.com');",
    );

    let outcome = export_table(&config(database, &dir)).unwrap();

    assert_eq!(outcome.primary_key, "id");
    assert_eq!(outcome.control.row_count, 2);
    assert_eq!(outcome.control.column_count, 3);
    // keys 1 + 2, "Ann" 3, "Bo" 2, "ann@example.com" 15
    assert_eq!(outcome.control.checksum, 23);

    let xml = std::fs::read_to_string(&outcome.xml_path).unwrap();
    assert!(xml.contains("<email/>"));
    let dtd = std::fs::read_to_string(&outcome.dtd_path).unwrap();
    assert!(dtd.contains("<!ELEMENT row (id, name, email)>\n"));
}

#[test]
fn test_duckdb_table_without_primary_key() {
    let dir = TempDir::new().unwrap();
    let database = create_database(
        &dir,
        "CREATE TABLE employees (id INTEGER, name VARCHAR);
         INSERT INTO employees VALUES (1, 'Ann');",
    );

    let err = export_table(&config(database, &dir)).unwrap_err();
    assert!(matches!(err, ExportError::Schema(_)));
}

#[test]
fn test_duckdb_empty_table() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir, "CREATE TABLE employees (id INTEGER PRIMARY KEY);");

    let err = export_table(&config(database, &dir)).unwrap_err();
    assert!(matches!(err, ExportError::Data(_)));
}
