//! Validation behavior tests
//!
//! Loading never stops at the first problem: every recoverable error in a
//! well-formed document lands in the report, in document order, with a
//! slash-separated path to the offending element. Only malformed XML and a
//! wrong root element are fatal.

use esbconfig::{
    parse_str, validate, ConfigElement, DocumentRoot, Error, ValidationErrorKind, ROOT_TAG,
};
use pretty_assertions::assert_eq;

#[test]
fn malformed_xml_is_fatal() {
    assert!(matches!(
        parse_str("<mule-configuration version='1.0'"),
        Err(Error::Xml(_))
    ));
}

#[test]
fn wrong_root_element_is_fatal() {
    match parse_str(r#"<beans version="1.0"/>"#) {
        Err(Error::UnexpectedRoot { expected, found }) => {
            assert_eq!(expected, ROOT_TAG);
            assert_eq!(found, "beans");
        }
        other => panic!("expected UnexpectedRoot, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_version_on_root() {
    let (_, report) = parse_str("<mule-configuration/>").unwrap();
    let errors = report.of_kind(ValidationErrorKind::MissingRequiredAttribute);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "version");
    assert_eq!(errors[0].path, "/mule-configuration");
}

#[test]
fn errors_accumulate_across_the_whole_document() {
    let xml = concat!(
        // missing version on the root
        r#"<mule-configuration>"#,
        // missing name, and a bad enum further down
        r#"<connector className="org.example.TcpConnector"/>"#,
        r#"<global-endpoints>"#,
        r#"<endpoint address="tcp://localhost:1" createConnector="MAYBE_CREATE"/>"#,
        // malformed boolean AND missing address
        r#"<endpoint synchronous="yes"/>"#,
        r#"</global-endpoints>"#,
        r#"</mule-configuration>"#,
    );
    let (_, report) = parse_str(xml).unwrap();

    assert_eq!(report.error_count(), 5);
    let kinds: Vec<ValidationErrorKind> = report.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ValidationErrorKind::MissingRequiredAttribute,
            ValidationErrorKind::MissingRequiredAttribute,
            ValidationErrorKind::UnknownEnumLiteral,
            ValidationErrorKind::MalformedBooleanLiteral,
            ValidationErrorKind::MissingRequiredAttribute,
        ]
    );
}

#[test]
fn list_paths_carry_one_based_indices() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<connector className="a.A" name="a"/>"#,
        r#"<connector className="b.B"/>"#,
        r#"</mule-configuration>"#,
    );
    let (_, report) = parse_str(xml).unwrap();

    let errors = report.of_kind(ValidationErrorKind::MissingRequiredAttribute);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "/mule-configuration/connector[2]");
}

#[test]
fn unknown_enum_literal_reports_the_offending_value() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<model name="main" type="actor"/>"#,
        r#"</mule-configuration>"#,
    );
    let (root, report) = parse_str(xml).unwrap();

    let errors = report.of_kind(ValidationErrorKind::UnknownEnumLiteral);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "type");
    assert_eq!(errors[0].path, "/mule-configuration/model");
    assert!(errors[0].detail.as_deref().unwrap().contains("'actor'"));

    // The model stays usable; the getter answers with the schema default
    let model = root.configuration().unwrap().child("model").unwrap();
    assert!(!model.is_set("type"));
    assert_eq!(model.enum_attr("type").unwrap().name(), "seda");
}

#[test]
fn required_transaction_action_has_no_default_fallback() {
    let xml = concat!(
        r#"<mule-configuration version="1.0"><global-endpoints>"#,
        r#"<endpoint address="tcp://localhost:1"><transaction/></endpoint>"#,
        r#"</global-endpoints></mule-configuration>"#,
    );
    let (root, report) = parse_str(xml).unwrap();

    let errors = report.of_kind(ValidationErrorKind::MissingRequiredAttribute);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "action");

    let transaction = root
        .configuration()
        .unwrap()
        .child("global-endpoints")
        .unwrap()
        .child("endpoint")
        .unwrap()
        .child("transaction")
        .unwrap();
    assert!(transaction.enum_attr("action").is_none());
}

#[test]
fn duplicate_single_child_is_reported_but_both_survive() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<mule-environment-properties>"#,
        r#"<pooling-profile maxActive="8"/>"#,
        r#"<pooling-profile maxActive="16"/>"#,
        r#"</mule-environment-properties>"#,
        r#"</mule-configuration>"#,
    );
    let (root, report) = parse_str(xml).unwrap();

    let errors = report.of_kind(ValidationErrorKind::DuplicateSingleChild);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].name, "pooling-profile");
    assert_eq!(errors[0].path, "/mule-configuration/mule-environment-properties");

    let env = root
        .configuration()
        .unwrap()
        .child("mule-environment-properties")
        .unwrap();
    assert_eq!(env.children("pooling-profile").count(), 2);
    // The single-child accessor answers the first occupant
    assert_eq!(
        env.child("pooling-profile").unwrap().string_attr("maxActive"),
        Some("8".to_string())
    );
}

#[test]
fn repeated_list_children_are_never_duplicates() {
    let xml = concat!(
        r#"<mule-configuration version="1.0"><model name="main">"#,
        r#"<mule-descriptor implementation="a.A" name="one"/>"#,
        r#"<mule-descriptor implementation="b.B" name="two"/>"#,
        r#"<mule-descriptor implementation="c.C" name="three"/>"#,
        r#"</model></mule-configuration>"#,
    );
    let (_, report) = parse_str(xml).unwrap();
    assert!(report.is_valid(), "{}", report);
}

#[test]
fn boolean_literals_reject_java_style_spellings() {
    for bad in ["True", "FALSE", "yes", "1", ""] {
        let xml = format!(
            r#"<mule-configuration version="1.0"><mule-environment-properties synchronous="{}"/></mule-configuration>"#,
            bad
        );
        let (_, report) = parse_str(&xml).unwrap();
        let errors = report.of_kind(ValidationErrorKind::MalformedBooleanLiteral);
        assert_eq!(errors.len(), 1, "'{}' should not parse as a boolean", bad);
    }
}

#[test]
fn foreign_content_is_never_validated() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        // Same tag names the schema knows, but nested where it does not
        // declare them; they are preserved without shape checks.
        r#"<wiretap><connector/><endpoint synchronous="maybe"/></wiretap>"#,
        r#"</mule-configuration>"#,
    );
    let (_, report) = parse_str(xml).unwrap();
    assert!(report.is_valid(), "{}", report);
}

#[test]
fn validate_reruns_checks_on_a_programmatic_model() {
    let mut root = DocumentRoot::new();
    let mut configuration = ConfigElement::new(ROOT_TAG).unwrap();
    configuration.set_string("version", "1.0");

    let mut model = ConfigElement::new("model").unwrap();
    model.set_string("name", "main");
    let descriptor = ConfigElement::new("mule-descriptor").unwrap();
    model.add_child(descriptor);
    configuration.add_child(model);
    root.configuration = Some(configuration);

    let report = validate(&root);
    let errors = report.of_kind(ValidationErrorKind::MissingRequiredAttribute);
    let names: Vec<&str> = errors.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["implementation", "name"]);
    assert_eq!(errors[0].path, "/mule-configuration/model/mule-descriptor[1]");
}

#[test]
fn validate_passes_after_repair() {
    let (mut root, report) =
        parse_str(r#"<mule-configuration><model name="main"/></mule-configuration>"#).unwrap();
    assert_eq!(report.error_count(), 1);

    root.configuration
        .as_mut()
        .unwrap()
        .set_string("version", "1.0");
    assert!(validate(&root).is_valid());
}

#[test]
fn unknown_tag_for_a_programmatic_element_is_an_error() {
    assert!(matches!(
        ConfigElement::new("spring-bean"),
        Err(Error::UnknownShape(_))
    ));
}
