//! Raw XML document handling
//!
//! This module provides the untyped XML node tree the loader consumes and
//! the serializer re-emits foreign fragments from. Attribute order and the
//! interleaving of text and child elements are preserved; namespace
//! declarations are kept as ordinary attributes so an unrecognized subtree
//! survives a round trip byte-for-byte.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// One node of raw element content, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A child element
    Element(XmlElement),
    /// A run of character data
    Text(String),
}

/// An element of the raw document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Element name as written, prefix included
    pub name: String,
    /// Attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Interleaved text and child-element content
    pub nodes: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            nodes: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Append a content node
    pub fn push_node(&mut self, node: XmlNode) {
        self.nodes.push(node);
    }

    /// Child elements in document order
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.nodes.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Concatenated text content of this element
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            if let XmlNode::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }

    /// Write this subtree into a quick-xml writer
    ///
    /// Used by the serializer to reproduce foreign fragments verbatim.
    pub fn write_into<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if self.nodes.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| Error::Xml(format!("failed to write <{}/>: {}", self.name, e)))?;
            return Ok(());
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::Xml(format!("failed to write <{}>: {}", self.name, e)))?;
        for node in &self.nodes {
            match node {
                XmlNode::Element(child) => child.write_into(writer)?,
                XmlNode::Text(text) => {
                    writer
                        .write_event(Event::Text(BytesText::new(text)))
                        .map_err(|e| Error::Xml(format!("failed to write text: {}", e)))?;
                }
            }
        }
        writer
            .write_event(Event::End(BytesStart::new(self.name.as_str()).to_end()))
            .map_err(|e| Error::Xml(format!("failed to write </{}>: {}", self.name, e)))?;
        Ok(())
    }
}

/// A parsed raw document
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// The document root element
    pub root: XmlElement,
}

impl XmlDocument {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes
    ///
    /// Only gross malformation is fatal here; schema-level problems are
    /// the loader's business.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut root: Option<XmlElement> = None;
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    stack.push(Self::element_from_start(&e)?);
                }
                Ok(Event::End(_)) => {
                    if let Some(finished) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.push_node(XmlNode::Element(finished)),
                            None => root = Some(finished),
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::element_from_start(&e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_node(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::Xml(format!("failed to unescape text: {}", e)))?
                        .to_string();
                    if !text.is_empty() {
                        if let Some(current) = stack.last_mut() {
                            current.push_node(XmlNode::Text(text));
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8(e.to_vec())
                        .map_err(|e| Error::Xml(format!("invalid CDATA: {}", e)))?;
                    if let Some(current) = stack.last_mut() {
                        current.push_node(XmlNode::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // comments, processing instructions, declarations
            }
            buf.clear();
        }

        match root {
            Some(root) => Ok(Self { root }),
            None => Err(Error::Xml("document has no root element".to_string())),
        }
    }

    fn element_from_start(start: &BytesStart) -> Result<XmlElement> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| Error::Xml(format!("invalid element name: {}", e)))?
            .to_string();

        let mut element = XmlElement::new(name);
        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| Error::Xml(format!("failed to parse attribute: {}", e)))?;
            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("invalid attribute name: {}", e)))?
                .to_string();
            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("failed to unescape attribute value: {}", e)))?
                .to_string();
            element.attributes.insert(attr_name, attr_value);
        }
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string(element: &XmlElement) -> String {
        let mut writer = Writer::new(Vec::new());
        element.write_into(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_parse_simple_document() {
        let doc = XmlDocument::from_string(r#"<root><child>text</child></root>"#).unwrap();

        assert_eq!(doc.root.name, "root");
        let children: Vec<&XmlElement> = doc.root.children().collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "child");
        assert_eq!(children[0].text(), "text");
    }

    #[test]
    fn test_parse_preserves_attribute_order() {
        let doc =
            XmlDocument::from_string(r#"<root zebra="1" alpha="2" mike="3"/>"#).unwrap();

        let names: Vec<&String> = doc.root.attributes.keys().collect();
        assert_eq!(names, vec!["zebra", "alpha", "mike"]);
        assert_eq!(doc.root.attribute("alpha"), Some("2"));
    }

    #[test]
    fn test_parse_preserves_interleaving() {
        let doc = XmlDocument::from_string(r#"<root>before<child/>after</root>"#).unwrap();

        assert_eq!(doc.root.nodes.len(), 3);
        assert!(matches!(doc.root.nodes[0], XmlNode::Text(ref t) if t == "before"));
        assert!(matches!(doc.root.nodes[1], XmlNode::Element(_)));
        assert!(matches!(doc.root.nodes[2], XmlNode::Text(ref t) if t == "after"));
    }

    #[test]
    fn test_xmlns_kept_as_plain_attribute() {
        let doc = XmlDocument::from_string(
            r#"<root xmlns="http://example.com" xmlns:x="http://example.com/x"/>"#,
        )
        .unwrap();

        assert_eq!(doc.root.attribute("xmlns"), Some("http://example.com"));
        assert_eq!(doc.root.attribute("xmlns:x"), Some("http://example.com/x"));
    }

    #[test]
    fn test_malformed_input_is_fatal() {
        assert!(XmlDocument::from_string("<root><unclosed></root>").is_err());
        assert!(XmlDocument::from_string("").is_err());
    }

    #[test]
    fn test_write_round_trip() {
        let xml = r#"<stack name="x"><item value="1"/>text<item value="2"/></stack>"#;
        let doc = XmlDocument::from_string(xml).unwrap();
        assert_eq!(write_to_string(&doc.root), xml);
    }

    #[test]
    fn test_write_escapes_text() {
        let mut element = XmlElement::new("note");
        element.push_node(XmlNode::Text("a < b & c".to_string()));
        assert_eq!(write_to_string(&element), "<note>a &lt; b &amp; c</note>");
    }
}
