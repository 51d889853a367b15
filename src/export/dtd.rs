//! DTD exporter for the structure of an export document.

use crate::error::ExportError;
use crate::export::{
    CONTROL_ELEMENT, CONTROL_FIELDS, ExportResult, ROOT_ATTRIBUTES, ROW_ELEMENT, ROWS_ELEMENT,
    check_structural_names,
};
use crate::models::TableSchema;

/// Exporter for the DTD describing an export document.
pub struct DTDExporter;

impl DTDExporter {
    /// Render the DTD for a table schema.
    ///
    /// The `row` content model lists the columns in schema order and every
    /// column is declared as `#PCDATA`. The control block fields follow in
    /// their fixed order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dtd_export::export::DTDExporter;
    /// use dtd_export::models::TableSchema;
    ///
    /// let schema = TableSchema::new("id".to_string(), vec!["id".to_string()]).unwrap();
    /// let dtd = DTDExporter::export_schema(&schema, "hrExport");
    /// assert!(dtd.contains("<!ELEMENT row (id)>"));
    /// ```
    pub fn export_schema(schema: &TableSchema, root_element: &str) -> String {
        let mut lines = Vec::with_capacity(schema.column_count() + 10);

        lines.push(format!(
            "<!ELEMENT {} ({}, {})>",
            root_element, ROWS_ELEMENT, CONTROL_ELEMENT
        ));
        let attributes: Vec<String> = ROOT_ATTRIBUTES
            .iter()
            .map(|a| format!("{a} CDATA #REQUIRED"))
            .collect();
        lines.push(format!("<!ATTLIST {} {}>", root_element, attributes.join(" ")));
        lines.push(format!("<!ELEMENT {} ({}+)>", ROWS_ELEMENT, ROW_ELEMENT));
        lines.push(format!(
            "<!ELEMENT {} ({})>",
            ROW_ELEMENT,
            schema.columns().join(", ")
        ));
        for column in schema.columns() {
            lines.push(format!("<!ELEMENT {column} (#PCDATA)>"));
        }
        lines.push(format!(
            "<!ELEMENT {} ({})>",
            CONTROL_ELEMENT,
            CONTROL_FIELDS.join(", ")
        ));
        for field in CONTROL_FIELDS {
            lines.push(format!("<!ELEMENT {field} (#PCDATA)>"));
        }

        let mut dtd = lines.join("\n");
        dtd.push('\n');
        dtd
    }

    /// Export the DTD (SDK interface), rejecting structural name collisions.
    pub fn export(
        &self,
        schema: &TableSchema,
        root_element: &str,
    ) -> Result<ExportResult, ExportError> {
        check_structural_names(schema, root_element)?;
        Ok(ExportResult {
            content: Self::export_schema(schema, root_element),
            format: "dtd".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employees_dtd() {
        let schema = TableSchema::new(
            "id".to_string(),
            vec!["id".to_string(), "name".to_string(), "salary".to_string()],
        )
        .unwrap();

        let result = DTDExporter.export(&schema, "hrExport").unwrap();
        assert_eq!(result.format, "dtd");
        assert_eq!(
            result.content,
            "<!ELEMENT hrExport (rows, control)>\n\
             <!ATTLIST hrExport table CDATA #REQUIRED exportedAt CDATA #REQUIRED>\n\
             <!ELEMENT rows (row+)>\n\
             <!ELEMENT row (id, name, salary)>\n\
             <!ELEMENT id (#PCDATA)>\n\
             <!ELEMENT name (#PCDATA)>\n\
             <!ELEMENT salary (#PCDATA)>\n\
             <!ELEMENT control (rowCount, columnCount, minId, maxId, checksum)>\n\
             <!ELEMENT rowCount (#PCDATA)>\n\
             <!ELEMENT columnCount (#PCDATA)>\n\
             <!ELEMENT minId (#PCDATA)>\n\
             <!ELEMENT maxId (#PCDATA)>\n\
             <!ELEMENT checksum (#PCDATA)>\n"
        );
    }

    #[test]
    fn test_custom_root_element() {
        let schema = TableSchema::new("code".to_string(), vec!["code".to_string()]).unwrap();
        let dtd = DTDExporter::export_schema(&schema, "deptExport");
        assert!(dtd.starts_with("<!ELEMENT deptExport (rows, control)>\n<!ATTLIST deptExport "));
    }

    #[test]
    fn test_collision_is_schema_error() {
        let schema =
            TableSchema::new("id".to_string(), vec!["id".to_string(), "row".to_string()]).unwrap();
        assert!(matches!(
            DTDExporter.export(&schema, "hrExport"),
            Err(ExportError::Schema(_))
        ));
    }
}
