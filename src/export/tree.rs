//! In-memory XML tree and its serializer
//!
//! Documents are assembled as a tree of [`XmlNode`]s first and rendered
//! afterwards by [`XmlDocument::render`], so building the structure never
//! deals with escaping or indentation.

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::ExportError;

/// An element with attributes and either text content or child elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Element holding character data
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut node = Self::new(name);
        node.text = Some(text.into());
        node
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), ExportError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() && self.text.is_none() {
            return write_event(writer, Event::Empty(start));
        }

        write_event(writer, Event::Start(start))?;
        if let Some(text) = &self.text {
            // Markup characters, plus CR so parsers do not fold it into LF
            let escaped = partial_escape(text.as_str()).replace('\r', "&#13;");
            write_event(writer, Event::Text(BytesText::from_escaped(escaped)))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        write_event(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

/// A complete document: XML declaration, optional DOCTYPE, root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    /// System identifier of the external DTD
    system_id: Option<String>,
    root: XmlNode,
}

impl XmlDocument {
    pub fn new(root: XmlNode) -> Self {
        Self {
            system_id: None,
            root,
        }
    }

    /// Reference an external DTD: `<!DOCTYPE root SYSTEM "system_id">`
    pub fn with_doctype(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    /// Render as UTF-8 text indented by two spaces, with a trailing newline
    pub fn render(&self) -> Result<String, ExportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write_event(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;

        if let Some(system_id) = &self.system_id {
            let doctype = format!(
                "{} SYSTEM \"{}\"",
                self.root.name,
                system_id.replace('"', "&quot;")
            );
            write_event(&mut writer, Event::DocType(BytesText::from_escaped(doctype)))?;
        }

        self.root.write(&mut writer)?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| ExportError::Serialization(e.to_string()))
    }
}

fn write_event<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), ExportError> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::Serialization(e.to_string()))
}
