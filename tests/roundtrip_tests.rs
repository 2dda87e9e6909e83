//! Structural round-trip tests
//!
//! For documents written in canonical form (shape-table attribute order,
//! self-closed empty elements, no insignificant whitespace),
//! serialize(parse(x)) must reproduce x byte for byte — including foreign
//! content the schema does not declare.

use esbconfig::{parse_str, serialize_to_string};
use pretty_assertions::assert_eq;

fn round_trip(xml: &str) -> String {
    let (document, report) = parse_str(xml).expect("parse failed");
    assert!(report.is_valid(), "unexpected validation errors: {}", report);
    serialize_to_string(&document).expect("serialize failed")
}

#[test]
fn minimal_document() {
    let xml = r#"<mule-configuration version="1.0"/>"#;
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn root_with_namespace_declarations() {
    let xml = concat!(
        r#"<mule-configuration xmlns="http://example.com/mule" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
        r#"xsi:schemaLocation="http://example.com/mule mule.xsd" "#,
        r#"id="main" version="1.0"/>"#,
    );
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn full_configuration_survives() {
    let xml = concat!(
        r#"<mule-configuration id="server" version="1.0">"#,
        r#"<description>Order processing backbone</description>"#,
        r#"<mule-environment-properties synchronous="true" workingDirectory="/var/mule">"#,
        r#"<threading-profile doThreading="true" id="receiver" maxThreadsActive="16" poolExhaustedAction="WAIT"/>"#,
        r#"<threading-profile id="dispatcher" maxThreadsActive="8"/>"#,
        r#"<pooling-profile exhaustedAction="GROW" initialisationPolicy="INITIALISE_ALL" maxActive="32"/>"#,
        r#"<queue-profile maxOutstandingMessages="100" persistent="true"/>"#,
        r#"</mule-environment-properties>"#,
        r#"<security-manager>"#,
        r#"<security-provider className="org.example.JaasProvider" name="jaas">"#,
        r#"<properties><property name="realm" value="orders"/></properties>"#,
        r#"</security-provider>"#,
        r#"<encryption-strategy className="org.example.PgpStrategy" name="pgp"/>"#,
        r#"</security-manager>"#,
        r#"<transaction-manager factory="org.example.JotmFactory"/>"#,
        r#"<agents><agent className="org.example.JmxAgent" name="jmx"/></agents>"#,
        r#"<connector className="org.example.TcpConnector" name="tcp">"#,
        r#"<properties><property name="port" value="9001"/></properties>"#,
        r#"<threading-profile id="component" maxThreadsActive="4"/>"#,
        r#"</connector>"#,
        r#"<endpoint-identifiers>"#,
        r#"<endpoint-identifier name="orders" value="tcp://localhost:9001"/>"#,
        r#"</endpoint-identifiers>"#,
        r#"<transformers>"#,
        r#"<transformer className="org.example.XmlToOrder" name="XmlToOrder" returnClass="org.example.Order"/>"#,
        r#"</transformers>"#,
        r#"<global-endpoints>"#,
        r#"<endpoint address="tcp://localhost:9001" name="ordersIn" type="receiver"/>"#,
        r#"</global-endpoints>"#,
        r#"<interceptor-stack name="default">"#,
        r#"<interceptor className="org.example.LoggingInterceptor"/>"#,
        r#"</interceptor-stack>"#,
        r#"<model name="main" type="seda">"#,
        r#"<entry-point-resolver className="org.example.Resolver"/>"#,
        r#"<mule-descriptor implementation="org.example.OrderService" name="orders">"#,
        r#"<inbound-router matchAll="false">"#,
        r#"<endpoint address="tcp://localhost:9001"/>"#,
        r#"<router className="org.example.SelectiveConsumer" enableCorrelation="ALWAYS">"#,
        r#"<filter className="org.example.PayloadFilter" expectedType="org.example.Order"/>"#,
        r#"</router>"#,
        r#"</inbound-router>"#,
        r#"<outbound-router>"#,
        r#"<catch-all-strategy className="org.example.DeadLetter">"#,
        r#"<endpoint address="tcp://localhost:9002"/>"#,
        r#"</catch-all-strategy>"#,
        r#"<router className="org.example.FilteringRouter">"#,
        r#"<endpoint address="tcp://localhost:9003">"#,
        r#"<transaction action="BEGIN_OR_JOIN" timeout="30000"/>"#,
        r#"</endpoint>"#,
        r#"<reply-to address="tcp://localhost:9004"/>"#,
        r#"</router>"#,
        r#"</outbound-router>"#,
        r#"<properties>"#,
        r#"<property name="retries" value="3"/>"#,
        r#"<map name="thresholds"><property name="high" value="100"/></map>"#,
        r#"<list name="regions"><entry value="emea"/><entry value="apac"/></list>"#,
        r#"</properties>"#,
        r#"</mule-descriptor>"#,
        r#"</model>"#,
        r#"</mule-configuration>"#,
    );
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn unset_defaulted_attributes_stay_omitted() {
    // required on container-entry defaults to true; never set, never emitted
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<environment-properties>"#,
        r#"<list name="deps"><container-entry reference="dataSource"/></list>"#,
        r#"</environment-properties>"#,
        r#"</mule-configuration>"#,
    );
    let (document, report) = parse_str(xml).unwrap();
    assert!(report.is_valid(), "{}", report);

    let entry = document
        .configuration()
        .unwrap()
        .child("environment-properties")
        .unwrap()
        .child("list")
        .unwrap()
        .child("container-entry")
        .unwrap();
    assert!(!entry.is_set("required"));
    assert_eq!(entry.bool_attr("required"), Some(true));

    assert_eq!(serialize_to_string(&document).unwrap(), xml);
}

#[test]
fn explicitly_written_default_survives() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<environment-properties>"#,
        r#"<list name="deps"><container-entry reference="dataSource" required="true"/></list>"#,
        r#"</environment-properties>"#,
        r#"</mule-configuration>"#,
    );
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn foreign_elements_survive_in_position() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<connector className="org.example.A" name="a"/>"#,
        r#"<wiretap level="debug"><target ref="audit"/></wiretap>"#,
        r#"<connector className="org.example.B" name="b"/>"#,
        r#"</mule-configuration>"#,
    );
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn foreign_attributes_survive() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"<connector className="org.example.A" name="a" vendor:tuning="fast"/>"#,
        r#"</mule-configuration>"#,
    );
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn mixed_text_and_children_keep_interleaving() {
    let xml = concat!(
        r#"<mule-configuration version="1.0">"#,
        r#"leading note<description>Legacy backbone</description>trailing note"#,
        r#"</mule-configuration>"#,
    );
    assert_eq!(round_trip(xml), xml);
}

#[test]
fn text_property_body_round_trips() {
    let xml = concat!(
        r#"<mule-configuration version="1.0"><model name="main">"#,
        r#"<mule-descriptor implementation="x.Y" name="svc">"#,
        r#"<properties><text-property name="script">return payload;</text-property></properties>"#,
        r#"</mule-descriptor>"#,
        r#"</model></mule-configuration>"#,
    );
    assert_eq!(round_trip(xml), xml);
}
