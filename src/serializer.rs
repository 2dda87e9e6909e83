//! Configuration document serializer
//!
//! The inverse of the loader: declared attributes are emitted in shape
//! declaration order (only the explicitly set ones), preserved foreign
//! attributes follow, and the content bucket is replayed in recorded
//! order so typed children, foreign fragments and text come out exactly
//! where they went in. Serialization does not re-validate; callers
//! needing strict guarantees run [`crate::loader::validate`] first.

use crate::error::{Error, Result};
use crate::model::{ConfigElement, ContentNode, DocumentRoot};
use crate::namespaces::XSI_NAMESPACE;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Serialize a document back to XML bytes
pub fn serialize(root: &DocumentRoot) -> Result<Vec<u8>> {
    let configuration = root
        .configuration()
        .ok_or_else(|| Error::Xml("document has no configuration element".to_string()))?;

    let mut writer = Writer::new(Vec::new());
    write_element(configuration, Some(root), &mut writer)?;
    Ok(writer.into_inner())
}

/// Serialize a document to a string
pub fn serialize_to_string(root: &DocumentRoot) -> Result<String> {
    let bytes = serialize(root)?;
    String::from_utf8(bytes).map_err(|e| Error::Xml(format!("non-UTF8 output: {}", e)))
}

fn write_element<W: Write>(
    element: &ConfigElement,
    root_decls: Option<&DocumentRoot>,
    writer: &mut Writer<W>,
) -> Result<()> {
    let tag = element.tag();
    let mut start = BytesStart::new(tag);

    if let Some(root) = root_decls {
        for (prefix, uri) in root.namespaces.iter() {
            if prefix.is_empty() {
                start.push_attribute(("xmlns", uri));
            } else {
                start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri));
            }
        }
        if !root.schema_locations.is_empty() {
            let name = format!("{}:schemaLocation", xsi_prefix(root));
            start.push_attribute((
                name.as_str(),
                root.schema_locations.to_attribute_value().as_str(),
            ));
        }
    }

    for spec in element.shape().attrs {
        if let Some(value) = element.attr(spec.name) {
            start.push_attribute((spec.name, value.to_xml().as_str()));
        }
    }
    for (name, value) in element.foreign_attrs() {
        start.push_attribute((name, value));
    }

    if element.content().is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::Xml(format!("failed to write <{}/>: {}", tag, e)))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| Error::Xml(format!("failed to write <{}>: {}", tag, e)))?;

    for node in element.content() {
        match node {
            ContentNode::Child(child) => write_element(child, None, writer)?,
            ContentNode::Foreign(fragment) => fragment.write_into(writer)?,
            ContentNode::Text(text) => {
                writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(|e| Error::Xml(format!("failed to write text: {}", e)))?;
            }
        }
    }

    writer
        .write_event(Event::End(BytesStart::new(tag).to_end()))
        .map_err(|e| Error::Xml(format!("failed to write </{}>: {}", tag, e)))?;
    Ok(())
}

/// The prefix bound to the XMLSchema-instance namespace, `xsi` when the
/// document never declared one
fn xsi_prefix(root: &DocumentRoot) -> &str {
    root.namespaces
        .iter()
        .find(|(_, uri)| *uri == XSI_NAMESPACE)
        .map(|(prefix, _)| prefix)
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or("xsi")
}
