//! XML exporter for the sampled rows and their control block.

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::control::ControlBlock;
use crate::error::ExportError;
use crate::export::tree::{XmlDocument, XmlNode};
use crate::export::{
    CONTROL_ELEMENT, CONTROL_FIELDS, ExportResult, ROOT_ATTRIBUTES, ROW_ELEMENT, ROWS_ELEMENT,
    check_structural_names,
};
use crate::models::{RowSet, TableSchema};

/// Everything the XML document is built from
pub struct XmlExportInput<'a> {
    pub schema: &'a TableSchema,
    pub rows: &'a RowSet,
    pub control: &'a ControlBlock,
    pub table: &'a str,
    pub exported_at: DateTime<FixedOffset>,
    /// Root element name, also used as the DOCTYPE name
    pub root_element: &'a str,
    /// Bare file name of the DTD referenced by the DOCTYPE
    pub dtd_file_name: &'a str,
}

/// Exporter for the XML export document.
pub struct XMLExporter;

impl XMLExporter {
    /// Build the document tree.
    ///
    /// Each `row` holds one element per schema column, in schema order. A
    /// NULL cell becomes an empty element.
    pub fn build(input: &XmlExportInput<'_>) -> XmlDocument {
        let [table_attr, exported_at_attr] = ROOT_ATTRIBUTES;

        let mut rows = XmlNode::new(ROWS_ELEMENT);
        for row in input.rows {
            let mut row_node = XmlNode::new(ROW_ELEMENT);
            for column in input.schema.columns() {
                let cell = match row.value(column).as_text() {
                    Some(text) => XmlNode::with_text(column.as_str(), text),
                    None => XmlNode::new(column.as_str()),
                };
                row_node.push(cell);
            }
            rows.push(row_node);
        }

        let root = XmlNode::new(input.root_element)
            .attribute(table_attr, input.table)
            .attribute(exported_at_attr, format_timestamp(&input.exported_at))
            .child(rows)
            .child(control_node(input.control));

        XmlDocument::new(root).with_doctype(input.dtd_file_name)
    }

    /// Export the XML document (SDK interface).
    pub fn export(&self, input: &XmlExportInput<'_>) -> Result<ExportResult, ExportError> {
        check_structural_names(input.schema, input.root_element)?;
        Ok(ExportResult {
            content: Self::build(input).render()?,
            format: "xml".to_string(),
        })
    }
}

fn control_node(control: &ControlBlock) -> XmlNode {
    let values = [
        control.row_count.to_string(),
        control.column_count.to_string(),
        control.min_id.clone(),
        control.max_id.clone(),
        control.checksum.to_string(),
    ];
    CONTROL_FIELDS
        .iter()
        .zip(values)
        .fold(XmlNode::new(CONTROL_ELEMENT), |node, (field, value)| {
            node.child(XmlNode::with_text(*field, value))
        })
}

/// ISO-8601 with seconds precision and a numeric offset, e.g.
/// `2024-03-01T09:30:00+02:00`
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}
