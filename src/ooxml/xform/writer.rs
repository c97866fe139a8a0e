//! Output sinks for the write path.
use crate::common::xml::escape_xml;
use tracing::trace;

/// Receiver of serialized elements.
///
/// Calls follow document order: `open_node`, then any number of
/// `add_attribute`, then children and text, then `close_node`.
pub trait XmlSink {
    /// Start an element.
    fn open_node(&mut self, name: &str);
    /// Add an attribute to the element most recently opened.
    fn add_attribute(&mut self, name: &str, value: &str);
    /// Append character data to the current element.
    fn add_text(&mut self, text: &str);
    /// Close the current element.
    fn close_node(&mut self);
}

/// XML declaration written by [`XmlStreamWriter::with_declaration`].
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// An [`XmlSink`] that renders into a `String`.
///
/// Elements without children or text are written self-closing.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::xform::{XmlSink, XmlStreamWriter};
///
/// let mut writer = XmlStreamWriter::new();
/// writer.open_node("color");
/// writer.add_attribute("theme", "1");
/// writer.close_node();
/// assert_eq!(writer.as_str(), r#"<color theme="1"/>"#);
/// ```
#[derive(Debug, Default)]
pub struct XmlStreamWriter {
    xml: String,
    stack: Vec<String>,
    /// The last start tag is still waiting for its `>`.
    tag_open: bool,
}

impl XmlStreamWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that starts with the standard XML declaration.
    pub fn with_declaration() -> Self {
        let mut xml = String::with_capacity(256);
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        Self {
            xml,
            ..Self::default()
        }
    }

    /// Number of elements currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The XML written so far.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.xml
    }

    /// Close any elements still open and return the XML.
    pub fn into_string(mut self) -> String {
        while !self.stack.is_empty() {
            self.close_node();
        }
        self.xml
    }

    fn finish_start_tag(&mut self) {
        if self.tag_open {
            self.xml.push('>');
            self.tag_open = false;
        }
    }
}

impl XmlSink for XmlStreamWriter {
    fn open_node(&mut self, name: &str) {
        self.finish_start_tag();
        self.xml.push('<');
        self.xml.push_str(name);
        self.stack.push(name.to_string());
        self.tag_open = true;
    }

    fn add_attribute(&mut self, name: &str, value: &str) {
        if !self.tag_open {
            trace!(attribute = name, "attribute outside of a start tag dropped");
            return;
        }
        self.xml.push(' ');
        self.xml.push_str(name);
        self.xml.push_str("=\"");
        self.xml.push_str(&escape_xml(value));
        self.xml.push('"');
    }

    fn add_text(&mut self, text: &str) {
        self.finish_start_tag();
        self.xml.push_str(&escape_xml(text));
    }

    fn close_node(&mut self) {
        let Some(name) = self.stack.pop() else {
            trace!("close_node without an open element ignored");
            return;
        };
        if self.tag_open {
            self.xml.push_str("/>");
            self.tag_open = false;
        } else {
            self.xml.push_str("</");
            self.xml.push_str(&name);
            self.xml.push('>');
        }
    }
}
