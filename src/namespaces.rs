//! Namespace and schema-location declarations
//!
//! The document root carries two string-keyed mappings: namespace prefix
//! declarations (`xmlns`, `xmlns:p`) and `xsi:schemaLocation` pairs. Keys
//! are unique; a duplicate declaration overwrites the earlier one
//! (last-wins, ordinary map-assignment semantics). Insertion order is
//! preserved so a round trip re-emits declarations where they were.

use indexmap::IndexMap;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix; the empty string denotes the default namespace
pub type Prefix = String;

/// The XMLSchema-instance namespace, carrier of `schemaLocation`
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Ordered prefix -> URI mapping declared on the document root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    prefixes: IndexMap<Prefix, NamespaceUri>,
}

impl NamespaceMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a prefix; an existing declaration for the same prefix is
    /// overwritten in place
    pub fn declare(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), uri.into());
    }

    /// Declare the default namespace (empty prefix)
    pub fn declare_default(&mut self, uri: impl Into<String>) {
        self.declare("", uri);
    }

    /// Resolve a prefix to its URI
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// The default namespace, if declared
    pub fn default_namespace(&self) -> Option<&str> {
        self.get("")
    }

    /// Iterate declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Whether nothing is declared
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }
}

/// Ordered namespace URI -> schema location mapping from
/// `xsi:schemaLocation`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaLocationMap {
    locations: IndexMap<NamespaceUri, String>,
}

impl SchemaLocationMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the whitespace-separated URI/location pairs of an
    /// `xsi:schemaLocation` attribute value
    ///
    /// A trailing URI without a location is ignored; duplicate URIs are
    /// last-wins.
    pub fn parse(value: &str) -> Self {
        let mut map = Self::new();
        let mut tokens = value.split_whitespace();
        while let Some(uri) = tokens.next() {
            if let Some(location) = tokens.next() {
                map.set(uri, location);
            }
        }
        map
    }

    /// Associate a schema location with a namespace URI
    pub fn set(&mut self, uri: impl Into<String>, location: impl Into<String>) {
        self.locations.insert(uri.into(), location.into());
    }

    /// Look up the location for a namespace URI
    pub fn get(&self, uri: &str) -> Option<&str> {
        self.locations.get(uri).map(|s| s.as_str())
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.locations.iter().map(|(u, l)| (u.as_str(), l.as_str()))
    }

    /// Whether nothing is declared
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Render back to the attribute value form
    pub fn to_attribute_value(&self) -> String {
        let mut out = String::new();
        for (uri, location) in self.iter() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(uri);
            out.push(' ');
            out.push_str(location);
        }
        out
    }
}
