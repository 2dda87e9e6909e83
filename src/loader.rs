//! Configuration document loader
//!
//! Walks a raw XML tree under the direction of the shape table and builds
//! the typed model, accumulating every validation problem it can find
//! instead of stopping at the first. Only gross malformation (not
//! well-formed XML, wrong root element) aborts a parse; everything else
//! leaves the affected field unset and lands in the [`ValidationReport`].

use crate::documents::{XmlDocument, XmlElement, XmlNode};
use crate::error::{Error, Result, ValidationError, ValidationErrorKind, ValidationReport};
use crate::model::{AttrValue, ConfigElement, ContentNode, DocumentRoot};
use crate::namespaces::{NamespaceMap, SchemaLocationMap, XSI_NAMESPACE};
use crate::shapes::{shape_for, AttrSpec, Cardinality, ElementShape, ValueKind, ROOT_TAG};
use std::collections::HashMap;

/// Parse a configuration document
///
/// Returns the best-effort typed model together with the validation
/// report; the report is empty exactly when the document is valid.
pub fn parse(xml: &[u8]) -> Result<(DocumentRoot, ValidationReport)> {
    let doc = XmlDocument::parse(xml)?;
    if doc.root.name != ROOT_TAG {
        return Err(Error::UnexpectedRoot {
            expected: ROOT_TAG.to_string(),
            found: doc.root.name.clone(),
        });
    }

    let mut root = DocumentRoot::new();
    let stripped = split_root_declarations(
        &doc.root,
        &mut root.namespaces,
        &mut root.schema_locations,
    );

    let shape = match shape_for(ROOT_TAG) {
        Some(shape) => shape,
        None => return Err(Error::UnknownShape(ROOT_TAG.to_string())),
    };

    let mut report = ValidationReport::new();
    let path = format!("/{}", ROOT_TAG);
    root.configuration = Some(load_element(&stripped, shape, &path, &mut report));
    Ok((root, report))
}

/// Parse a configuration document from a string
pub fn parse_str(xml: &str) -> Result<(DocumentRoot, ValidationReport)> {
    parse(xml.as_bytes())
}

/// Capture xmlns and xsi:schemaLocation declarations off the root element,
/// returning a copy with those attributes removed
fn split_root_declarations(
    raw: &XmlElement,
    namespaces: &mut NamespaceMap,
    schema_locations: &mut SchemaLocationMap,
) -> XmlElement {
    for (name, value) in &raw.attributes {
        if name == "xmlns" {
            namespaces.declare_default(value);
        } else if let Some(prefix) = name.strip_prefix("xmlns:") {
            namespaces.declare(prefix, value);
        }
    }

    let mut stripped = XmlElement::new(raw.name.clone());
    stripped.nodes = raw.nodes.clone();
    for (name, value) in &raw.attributes {
        if name == "xmlns" || name.starts_with("xmlns:") {
            continue;
        }
        if let Some((prefix, local)) = name.split_once(':') {
            let is_xsi = namespaces.get(prefix) == Some(XSI_NAMESPACE) || prefix == "xsi";
            if is_xsi && local == "schemaLocation" {
                *schema_locations = SchemaLocationMap::parse(value);
                continue;
            }
        }
        stripped.attributes.insert(name.clone(), value.clone());
    }
    stripped
}

/// Build one typed element from its raw counterpart
fn load_element(
    raw: &XmlElement,
    shape: &'static ElementShape,
    path: &str,
    report: &mut ValidationReport,
) -> ConfigElement {
    let mut element = ConfigElement::with_shape(shape);

    for (name, value) in &raw.attributes {
        match shape.attr(name) {
            Some(spec) => {
                if let Some(coerced) = coerce_attr(spec, value, path, report) {
                    element.insert_attr(spec.name, coerced);
                }
            }
            None => element.insert_foreign_attr(name.clone(), value.clone()),
        }
    }

    for spec in shape.attrs {
        if spec.required && raw.attribute(spec.name).is_none() {
            report.add(ValidationError::new(
                ValidationErrorKind::MissingRequiredAttribute,
                path,
                spec.name,
            ));
        }
    }

    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    for node in &raw.nodes {
        match node {
            XmlNode::Text(text) => element.add_text(text.clone()),
            XmlNode::Element(child_raw) => match shape.child_slot(&child_raw.name) {
                Some(slot) => {
                    let count = seen.entry(slot.tag).or_insert(0);
                    *count += 1;
                    if *count == 2 && slot.cardinality != Cardinality::List {
                        report.add(
                            ValidationError::new(
                                ValidationErrorKind::DuplicateSingleChild,
                                path,
                                slot.tag,
                            )
                            .with_detail("the slot admits at most one occurrence"),
                        );
                    }
                    // Registry invariant: every declared child tag has a shape
                    match shape_for(slot.tag) {
                        Some(child_shape) => {
                            let child_path = child_path(path, slot, *count);
                            element.add_child(load_element(
                                child_raw,
                                child_shape,
                                &child_path,
                                report,
                            ));
                        }
                        None => element.add_foreign(child_raw.clone()),
                    }
                }
                None => element.add_foreign(child_raw.clone()),
            },
        }
    }

    for slot in shape.children {
        if slot.cardinality == Cardinality::RequiredSingle && !seen.contains_key(slot.tag) {
            report.add(ValidationError::new(
                ValidationErrorKind::MissingRequiredChild,
                path,
                slot.tag,
            ));
        }
    }

    element
}

fn coerce_attr(
    spec: &AttrSpec,
    value: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<AttrValue> {
    match spec.kind {
        ValueKind::Str => Some(AttrValue::Str(value.to_string())),
        ValueKind::Bool => match value {
            "true" => Some(AttrValue::Bool(true)),
            "false" => Some(AttrValue::Bool(false)),
            other => {
                report.add(
                    ValidationError::new(
                        ValidationErrorKind::MalformedBooleanLiteral,
                        path,
                        spec.name,
                    )
                    .with_detail(format!("'{}' is not \"true\" or \"false\"", other)),
                );
                None
            }
        },
        ValueKind::Enum(kind) => match crate::enums::lookup_by_name(kind, value) {
            Some(literal) => Some(AttrValue::Enum(literal)),
            None => {
                report.add(
                    ValidationError::new(
                        ValidationErrorKind::UnknownEnumLiteral,
                        path,
                        spec.name,
                    )
                    .with_detail(format!("'{}' is not a literal of {:?}", value, kind)),
                );
                None
            }
        },
    }
}

fn child_path(parent: &str, slot: &crate::shapes::ChildSpec, occurrence: usize) -> String {
    match slot.cardinality {
        Cardinality::List => format!("{}/{}[{}]", parent, slot.tag, occurrence),
        _ => format!("{}/{}", parent, slot.tag),
    }
}

/// Re-run the loader's required/cardinality checks against an in-memory
/// tree
///
/// Serialization does not validate; callers that build a model
/// programmatically run this before serializing when they need strict
/// guarantees.
pub fn validate(root: &DocumentRoot) -> ValidationReport {
    let mut report = ValidationReport::new();
    if let Some(configuration) = root.configuration() {
        let path = format!("/{}", configuration.tag());
        validate_element(configuration, &path, &mut report);
    }
    report
}

fn validate_element(element: &ConfigElement, path: &str, report: &mut ValidationReport) {
    let shape = element.shape();

    for spec in shape.attrs {
        if spec.required && !element.is_set(spec.name) {
            report.add(ValidationError::new(
                ValidationErrorKind::MissingRequiredAttribute,
                path,
                spec.name,
            ));
        }
    }

    let mut seen: HashMap<&'static str, usize> = HashMap::new();
    for node in element.content() {
        if let ContentNode::Child(child) = node {
            // Children are well-tagged by construction; count per slot
            if let Some(slot) = shape.child_slot(child.tag()) {
                let count = seen.entry(slot.tag).or_insert(0);
                *count += 1;
                if *count == 2 && slot.cardinality != Cardinality::List {
                    report.add(
                        ValidationError::new(
                            ValidationErrorKind::DuplicateSingleChild,
                            path,
                            slot.tag,
                        )
                        .with_detail("the slot admits at most one occurrence"),
                    );
                }
                let child_path = child_path(path, slot, *count);
                validate_element(child, &child_path, report);
            }
        }
    }

    for slot in shape.children {
        if slot.cardinality == Cardinality::RequiredSingle && !seen.contains_key(slot.tag) {
            report.add(ValidationError::new(
                ValidationErrorKind::MissingRequiredChild,
                path,
                slot.tag,
            ));
        }
    }
}
