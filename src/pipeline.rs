//! Export pipeline
//!
//! Runs one export end to end: introspection, sampling, control block, DTD
//! render, XML render, then both writes (DTD first). Stages run strictly in
//! that order and the first error aborts the run. A DTD already written when
//! the XML write fails is left in place.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local};

use crate::config::ExportConfig;
use crate::control::ControlBlock;
use crate::error::ExportError;
use crate::export::xml::XmlExportInput;
use crate::export::{DTDExporter, XMLExporter};
use crate::introspect::SchemaIntrospector;
use crate::sample::RowSampler;
use crate::source::{self, DataSource};
use crate::storage::{FileSystemStorageBackend, StorageBackend};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Primary-key column the sample was ordered by
    pub primary_key: String,
    pub output_directory: PathBuf,
    pub xml_path: PathBuf,
    pub dtd_path: PathBuf,
    pub control: ControlBlock,
}

impl ExportOutcome {
    /// Human-readable report of the run
    ///
    /// ```text
    /// OK
    /// PK detected: id
    /// Saved to: /tmp
    /// XML: /tmp/hr_export.xml
    /// DTD: /tmp/hr_export.dtd
    /// rowCount=2, columnCount=2, minId=1, maxId=2, checksum=8
    /// ```
    pub fn summary(&self) -> String {
        let c = &self.control;
        let mut out = String::new();
        let _ = writeln!(out, "OK");
        let _ = writeln!(out, "PK detected: {}", self.primary_key);
        let _ = writeln!(out, "Saved to: {}", self.output_directory.display());
        let _ = writeln!(out, "XML: {}", self.xml_path.display());
        let _ = writeln!(out, "DTD: {}", self.dtd_path.display());
        let _ = write!(
            out,
            "rowCount={}, columnCount={}, minId={}, maxId={}, checksum={}",
            c.row_count, c.column_count, c.min_id, c.max_id, c.checksum
        );
        out
    }
}

/// Run the export against an open data source
///
/// `storage` must be rooted at `config.output_directory`; artifacts are
/// written under their bare file names.
pub fn run_export(
    source: &dyn DataSource,
    config: &ExportConfig,
    storage: &dyn StorageBackend,
    exported_at: DateTime<FixedOffset>,
) -> Result<ExportOutcome, ExportError> {
    config.validate()?;
    let schema_name = config.connection.metadata_schema();
    tracing::info!(
        "Exporting {}.{} from {}",
        schema_name,
        config.table,
        source.describe()
    );

    let schema = SchemaIntrospector::new(source).introspect(schema_name, &config.table)?;
    let rows = RowSampler::new(source).sample(
        schema_name,
        &config.table,
        schema.primary_key_column(),
    )?;
    let control = ControlBlock::compute(&schema, &rows);
    tracing::debug!(?control, "Control block computed");

    let dtd_file_name = config.dtd_file_name();
    let dtd = DTDExporter.export(&schema, &config.root_element)?;
    let xml = XMLExporter.export(&XmlExportInput {
        schema: &schema,
        rows: &rows,
        control: &control,
        table: &config.table,
        exported_at,
        root_element: &config.root_element,
        dtd_file_name: &dtd_file_name,
    })?;

    storage.write_file(&dtd_file_name, dtd.content.as_bytes())?;
    tracing::info!("Wrote {}", config.dtd_path().display());
    storage.write_file(&config.xml_file_name(), xml.content.as_bytes())?;
    tracing::info!("Wrote {}", config.xml_path().display());

    Ok(ExportOutcome {
        primary_key: schema.primary_key_column().to_string(),
        output_directory: config.output_directory.clone(),
        xml_path: config.xml_path(),
        dtd_path: config.dtd_path(),
        control,
    })
}

/// Connect, export to the configured output directory, and disconnect
pub fn export_table(config: &ExportConfig) -> Result<ExportOutcome, ExportError> {
    config.validate()?;
    let source = source::connect(&config.connection)?;
    let storage = FileSystemStorageBackend::new(&config.output_directory);
    run_export(source.as_ref(), config, &storage, Local::now().fixed_offset())
}
