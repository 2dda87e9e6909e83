//! Typed configuration document model
//!
//! A [`ConfigElement`] is one generic, shape-driven record standing in for
//! the class-per-element model a code generator would emit. Attributes
//! track "explicitly set" separately from "equals the default", so a
//! serializer can omit what the author never wrote; all element content
//! (typed children, foreign elements, text) lives in one ordered bucket so
//! the original interleaving survives a round trip.

use crate::documents::XmlElement;
use crate::enums::EnumLiteral;
use crate::error::{Error, Result};
use crate::namespaces::{NamespaceMap, SchemaLocationMap};
use crate::shapes::{shape_for, ElementShape, ValueKind};
use indexmap::IndexMap;

/// A typed attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Free-form string
    Str(String),
    /// Boolean
    Bool(bool),
    /// Closed-set literal
    Enum(EnumLiteral),
}

impl AttrValue {
    /// The serialized literal form of this value
    pub fn to_xml(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Bool(true) => "true".to_string(),
            Self::Bool(false) => "false".to_string(),
            Self::Enum(literal) => literal.name().to_string(),
        }
    }
}

/// One entry of an element's ordered content
#[derive(Debug, Clone)]
pub enum ContentNode {
    /// A typed, shape-declared child element
    Child(ConfigElement),
    /// An unrecognized element, preserved verbatim for forward
    /// compatibility
    Foreign(XmlElement),
    /// A run of character data
    Text(String),
}

/// A node of the typed configuration tree
#[derive(Debug, Clone)]
pub struct ConfigElement {
    shape: &'static ElementShape,
    /// Explicitly set declared attributes; absence means "defaulted"
    attrs: IndexMap<&'static str, AttrValue>,
    /// Attributes the shape table does not declare, preserved verbatim
    foreign_attrs: IndexMap<String, String>,
    /// Ordered mixed content
    content: Vec<ContentNode>,
}

impl ConfigElement {
    /// Create an empty element for a registered tag
    pub fn new(tag: &str) -> Result<Self> {
        match shape_for(tag) {
            Some(shape) => Ok(Self::with_shape(shape)),
            None => Err(Error::UnknownShape(tag.to_string())),
        }
    }

    pub(crate) fn with_shape(shape: &'static ElementShape) -> Self {
        Self {
            shape,
            attrs: IndexMap::new(),
            foreign_attrs: IndexMap::new(),
            content: Vec::new(),
        }
    }

    /// Element tag
    pub fn tag(&self) -> &'static str {
        self.shape.tag
    }

    /// The declared shape of this element
    pub fn shape(&self) -> &'static ElementShape {
        self.shape
    }

    // --- attributes ---------------------------------------------------

    /// The explicitly set value of a declared attribute
    ///
    /// Returns `None` for attributes that were never set, even when the
    /// shape declares a default; use [`ConfigElement::effective_attr`]
    /// for defaulted reads.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// Whether the attribute was explicitly set (as opposed to defaulted)
    pub fn is_set(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// The effective value: explicit when set, otherwise the shape's
    /// default coerced to the declared kind
    pub fn effective_attr(&self, name: &str) -> Option<AttrValue> {
        if let Some(value) = self.attrs.get(name) {
            return Some(value.clone());
        }
        let spec = self.shape.attr(name)?;
        let default = spec.default?;
        match spec.kind {
            ValueKind::Str => Some(AttrValue::Str(default.to_string())),
            ValueKind::Bool => Some(AttrValue::Bool(default == "true")),
            ValueKind::Enum(kind) => {
                crate::enums::lookup_by_name(kind, default).map(AttrValue::Enum)
            }
        }
    }

    /// Effective string value of a string attribute
    pub fn string_attr(&self, name: &str) -> Option<String> {
        match self.effective_attr(name)? {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Effective value of a boolean attribute
    pub fn bool_attr(&self, name: &str) -> Option<bool> {
        match self.effective_attr(name)? {
            AttrValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Effective value of an enumerated attribute
    pub fn enum_attr(&self, name: &str) -> Option<EnumLiteral> {
        match self.effective_attr(name)? {
            AttrValue::Enum(literal) => Some(literal),
            _ => None,
        }
    }

    /// Set a declared string attribute
    ///
    /// Returns `false` without storing anything when the shape does not
    /// declare `name` as a string.
    pub fn set_string(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.set_checked(name, AttrValue::Str(value.into()))
    }

    /// Set a declared boolean attribute
    pub fn set_bool(&mut self, name: &str, value: bool) -> bool {
        self.set_checked(name, AttrValue::Bool(value))
    }

    /// Set a declared enumerated attribute
    ///
    /// The literal's kind must match the attribute's declared enum kind.
    pub fn set_enum(&mut self, name: &str, literal: EnumLiteral) -> bool {
        self.set_checked(name, AttrValue::Enum(literal))
    }

    fn set_checked(&mut self, name: &str, value: AttrValue) -> bool {
        let Some(spec) = self.shape.attr(name) else {
            return false;
        };
        let matches = match (&value, spec.kind) {
            (AttrValue::Str(_), ValueKind::Str) => true,
            (AttrValue::Bool(_), ValueKind::Bool) => true,
            (AttrValue::Enum(literal), ValueKind::Enum(kind)) => literal.kind == kind,
            _ => false,
        };
        if matches {
            self.attrs.insert(spec.name, value);
        }
        matches
    }

    pub(crate) fn insert_attr(&mut self, name: &'static str, value: AttrValue) {
        self.attrs.insert(name, value);
    }

    /// Clear an attribute back to the unset state
    pub fn unset(&mut self, name: &str) {
        self.attrs.shift_remove(name);
    }

    /// Explicitly set attributes, in the order they were set
    pub fn set_attrs(&self) -> impl Iterator<Item = (&'static str, &AttrValue)> {
        self.attrs.iter().map(|(name, value)| (*name, value))
    }

    /// Undeclared attributes preserved from the source document
    pub fn foreign_attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.foreign_attrs
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub(crate) fn insert_foreign_attr(&mut self, name: String, value: String) {
        self.foreign_attrs.insert(name, value);
    }

    // --- content ------------------------------------------------------

    /// The ordered content sequence
    pub fn content(&self) -> &[ContentNode] {
        &self.content
    }

    /// First typed child with the given tag
    pub fn child(&self, tag: &str) -> Option<&ConfigElement> {
        self.children(tag).next()
    }

    /// Typed children with the given tag, in document order
    pub fn children<'a, 'b>(
        &'a self,
        tag: &'b str,
    ) -> impl Iterator<Item = &'a ConfigElement> + use<'a, 'b> {
        self.content.iter().filter_map(move |node| match node {
            ContentNode::Child(child) if child.tag() == tag => Some(child),
            _ => None,
        })
    }

    /// All typed children in document order
    pub fn typed_children(&self) -> impl Iterator<Item = &ConfigElement> {
        self.content.iter().filter_map(|node| match node {
            ContentNode::Child(child) => Some(child),
            _ => None,
        })
    }

    /// Append a typed child
    pub fn add_child(&mut self, child: ConfigElement) {
        self.content.push(ContentNode::Child(child));
    }

    /// Append a run of text content
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(ContentNode::Text(text.into()));
    }

    /// Append a foreign element preserved verbatim
    pub fn add_foreign(&mut self, element: XmlElement) {
        self.content.push(ContentNode::Foreign(element));
    }

    /// Concatenated text content
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.content {
            if let ContentNode::Text(text) = node {
                out.push_str(text);
            }
        }
        out
    }
}

/// The top-level wrapper of a parsed configuration document
///
/// Holds the root element's namespace-prefix and schema-location
/// declarations and the one meaningful configuration element. The tree is
/// exclusively owned by the caller; share across threads only as an
/// immutable value.
#[derive(Debug, Clone, Default)]
pub struct DocumentRoot {
    /// Namespace prefix declarations from the root element
    pub namespaces: NamespaceMap,
    /// `xsi:schemaLocation` declarations from the root element
    pub schema_locations: SchemaLocationMap,
    /// The top-level configuration element
    pub configuration: Option<ConfigElement>,
}

impl DocumentRoot {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration element, if present
    pub fn configuration(&self) -> Option<&ConfigElement> {
        self.configuration.as_ref()
    }
}
