//! Export functionality
//!
//! Provides the two artifact renderers of an export run:
//! - DTD (structure derived from the column list)
//! - XML (rows and control block, referencing the DTD)
//!
//! Both share the element names defined here, which keeps the document and
//! its DTD in exact structural correspondence.

pub mod dtd;
pub mod tree;
pub mod xml;

use crate::error::ExportError;
use crate::models::TableSchema;

/// Container of all sampled rows
pub const ROWS_ELEMENT: &str = "rows";
/// One sampled row
pub const ROW_ELEMENT: &str = "row";
/// Control block container
pub const CONTROL_ELEMENT: &str = "control";
/// Control block fields, in document order
pub const CONTROL_FIELDS: [&str; 5] = ["rowCount", "columnCount", "minId", "maxId", "checksum"];
/// Required root attributes, in document order
pub const ROOT_ATTRIBUTES: [&str; 2] = ["table", "exportedAt"];

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Reject columns whose names collide with the structural elements
///
/// A collision would declare the same element twice in the DTD.
pub(crate) fn check_structural_names(
    schema: &TableSchema,
    root_element: &str,
) -> Result<(), ExportError> {
    for column in schema.columns() {
        let reserved = column == root_element
            || column == ROWS_ELEMENT
            || column == ROW_ELEMENT
            || column == CONTROL_ELEMENT
            || CONTROL_FIELDS.contains(&column.as_str());
        if reserved {
            return Err(ExportError::Schema(format!(
                "column {column} collides with a structural element of the export"
            )));
        }
    }
    Ok(())
}

pub use dtd::DTDExporter;
pub use tree::{XmlDocument, XmlNode};
pub use xml::XMLExporter;
