//! Error types for esbconfig
//!
//! Fatal problems (malformed XML, wrong root element) abort a parse and are
//! reported through [`Error`]. Everything the schema can say about a
//! well-formed document is recoverable and accumulates as
//! [`ValidationError`] entries in a [`ValidationReport`].

use std::fmt;
use thiserror::Error;

/// Result type alias using esbconfig Error
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal error type for esbconfig operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not well-formed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// The document root is not the configuration element
    #[error("unexpected root element '{found}', expected '{expected}'")]
    UnexpectedRoot {
        /// Tag the schema requires at the root
        expected: String,
        /// Tag actually found
        found: String,
    },

    /// A programmatically built element names a tag the shape table
    /// does not declare
    #[error("unknown element shape: '{0}'")]
    UnknownShape(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classification of a recoverable validation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Attribute value is not in the enumeration's closed literal set
    UnknownEnumLiteral,
    /// A required attribute is absent
    MissingRequiredAttribute,
    /// A required child element is absent
    MissingRequiredChild,
    /// A single-occurrence child slot matched more than one element
    DuplicateSingleChild,
    /// A boolean attribute is neither `"true"` nor `"false"`
    MalformedBooleanLiteral,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnknownEnumLiteral => "unknown enum literal",
            Self::MissingRequiredAttribute => "missing required attribute",
            Self::MissingRequiredChild => "missing required child",
            Self::DuplicateSingleChild => "duplicate single child",
            Self::MalformedBooleanLiteral => "malformed boolean literal",
        };
        write!(f, "{}", name)
    }
}

/// A recoverable validation problem with document context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Problem classification
    pub kind: ValidationErrorKind,
    /// Path to the offending element, e.g. `/mule-configuration/model`
    pub path: String,
    /// Attribute or child name the problem refers to
    pub name: String,
    /// Human-readable detail
    pub detail: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        kind: ValidationErrorKind,
        path: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            name: name.into(),
            detail: None,
        }
    }

    /// Attach a detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}' at {}", self.kind, self.name, self.path)?;
        if let Some(ref detail) = self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a load or validation pass
///
/// Errors appear in document order; the engine never stops at the first
/// problem, so authoring tools can surface all of them at once.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Collected validation errors
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the document passed validation
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of collected errors
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Record an error
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Iterate over collected errors
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Errors of a given kind
    pub fn of_kind(&self, kind: ValidationErrorKind) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.kind == kind).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        writeln!(f, "{} validation error(s):", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(
            ValidationErrorKind::MissingRequiredAttribute,
            "/mule-configuration/connector",
            "name",
        )
        .with_detail("declared required by the connector shape");

        let msg = format!("{}", err);
        assert!(msg.contains("missing required attribute"));
        assert!(msg.contains("'name'"));
        assert!(msg.contains("/mule-configuration/connector"));
    }

    #[test]
    fn test_report_collects_in_order() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());

        report.add(ValidationError::new(
            ValidationErrorKind::UnknownEnumLiteral,
            "/mule-configuration/endpoint",
            "type",
        ));
        report.add(ValidationError::new(
            ValidationErrorKind::DuplicateSingleChild,
            "/mule-configuration/endpoint",
            "properties",
        ));

        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 2);
        assert_eq!(
            report.iter().next().unwrap().kind,
            ValidationErrorKind::UnknownEnumLiteral
        );
        assert_eq!(
            report
                .of_kind(ValidationErrorKind::DuplicateSingleChild)
                .len(),
            1
        );
    }

    #[test]
    fn test_report_display() {
        let mut report = ValidationReport::new();
        assert_eq!(format!("{}", report), "valid");

        report.add(ValidationError::new(
            ValidationErrorKind::MalformedBooleanLiteral,
            "/mule-configuration",
            "synchronous",
        ));
        let msg = format!("{}", report);
        assert!(msg.contains("1 validation error(s)"));
        assert!(msg.contains("malformed boolean literal"));
    }
}
