//! Declarative shape table for the configuration schema family
//!
//! One static record per element type replaces the generated
//! class-per-element model: each [`ElementShape`] lists the typed
//! attributes (with required flags and schema defaults) and the child
//! slots (with per-slot cardinality) in declaration order. Both the
//! loader and the serializer are driven by this table, so the two can
//! never disagree about what an element looks like.
//!
//! Cardinality is a property of the slot, not the child type: a
//! `threading-profile` is a repeated list under
//! `mule-environment-properties` (one per pool id) but a single optional
//! child under `connector`.

use crate::enums::EnumKind;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Tag of the document root element
pub const ROOT_TAG: &str = "mule-configuration";

/// Value space of a declared attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Free-form string
    Str,
    /// `"true"` / `"false"`, case-sensitive
    Bool,
    /// Closed literal set resolved through the enum registry
    Enum(EnumKind),
}

/// A declared attribute of an element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    /// Attribute name as written in XML
    pub name: &'static str,
    /// Value space
    pub kind: ValueKind,
    /// Whether a document omitting this attribute is invalid
    pub required: bool,
    /// Schema default, in serialized literal form
    pub default: Option<&'static str>,
}

impl AttrSpec {
    /// Optional string attribute
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Str,
            required: false,
            default: None,
        }
    }

    /// Required string attribute
    pub const fn required_string(name: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Str,
            required: true,
            default: None,
        }
    }

    /// Optional string attribute with a schema default
    pub const fn string_with_default(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Str,
            required: false,
            default: Some(default),
        }
    }

    /// Boolean attribute with a schema default (`"true"` or `"false"`)
    pub const fn boolean(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: ValueKind::Bool,
            required: false,
            default: Some(default),
        }
    }

    /// Enumerated attribute with a schema default literal
    pub const fn enumerated(
        name: &'static str,
        kind: EnumKind,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ValueKind::Enum(kind),
            required: false,
            default: Some(default),
        }
    }

    /// Required enumerated attribute without a default
    pub const fn required_enum(name: &'static str, kind: EnumKind) -> Self {
        Self {
            name,
            kind: ValueKind::Enum(kind),
            required: true,
            default: None,
        }
    }
}

/// How many occupants a child slot admits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero or one; a second occurrence is a validation error
    OptionalSingle,
    /// Exactly one
    RequiredSingle,
    /// Zero or more, document order significant
    List,
}

/// A declared child slot of an element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSpec {
    /// Child element tag; also the key into the shape registry
    pub tag: &'static str,
    /// Slot cardinality
    pub cardinality: Cardinality,
}

impl ChildSpec {
    /// Optional single-occurrence slot
    pub const fn optional(tag: &'static str) -> Self {
        Self {
            tag,
            cardinality: Cardinality::OptionalSingle,
        }
    }

    /// Required single-occurrence slot
    pub const fn required(tag: &'static str) -> Self {
        Self {
            tag,
            cardinality: Cardinality::RequiredSingle,
        }
    }

    /// Repeated slot
    pub const fn list(tag: &'static str) -> Self {
        Self {
            tag,
            cardinality: Cardinality::List,
        }
    }
}

/// The complete declared shape of one element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementShape {
    /// Element tag
    pub tag: &'static str,
    /// Declared attributes, in canonical serialization order
    pub attrs: &'static [AttrSpec],
    /// Declared child slots, in schema declaration order
    pub children: &'static [ChildSpec],
}

impl ElementShape {
    /// Find the spec for a declared attribute
    pub fn attr(&self, name: &str) -> Option<&AttrSpec> {
        self.attrs.iter().find(|spec| spec.name == name)
    }

    /// Find the slot spec for a child tag
    pub fn child_slot(&self, tag: &str) -> Option<&ChildSpec> {
        self.children.iter().find(|spec| spec.tag == tag)
    }
}

/// Every element type of the schema family, transcribed from the owning
/// schema in declaration order
pub static SHAPES: &[ElementShape] = &[
    ElementShape {
        tag: "mule-configuration",
        attrs: &[
            AttrSpec::string("id"),
            AttrSpec::required_string("version"),
        ],
        children: &[
            ChildSpec::optional("description"),
            ChildSpec::optional("environment-properties"),
            ChildSpec::optional("mule-environment-properties"),
            ChildSpec::list("container-context"),
            ChildSpec::optional("security-manager"),
            ChildSpec::optional("transaction-manager"),
            ChildSpec::optional("agents"),
            ChildSpec::list("connector"),
            ChildSpec::optional("endpoint-identifiers"),
            ChildSpec::optional("transformers"),
            ChildSpec::optional("global-endpoints"),
            ChildSpec::list("interceptor-stack"),
            ChildSpec::optional("model"),
            ChildSpec::list("mule-descriptor"),
        ],
    },
    // Free text only; the content bucket carries the description body.
    ElementShape {
        tag: "description",
        attrs: &[],
        children: &[],
    },
    ElementShape {
        tag: "environment-properties",
        attrs: &[],
        children: &[
            ChildSpec::list("property"),
            ChildSpec::list("factory-property"),
            ChildSpec::list("system-property"),
            ChildSpec::list("map"),
            ChildSpec::list("list"),
            ChildSpec::list("file-properties"),
        ],
    },
    ElementShape {
        tag: "mule-environment-properties",
        attrs: &[
            AttrSpec::boolean("clientMode", "false"),
            AttrSpec::boolean("embedded", "false"),
            AttrSpec::boolean("enableMessageEvents", "false"),
            AttrSpec::string("encoding"),
            AttrSpec::string("model"),
            AttrSpec::boolean("recoverableMode", "false"),
            AttrSpec::boolean("remoteSync", "false"),
            AttrSpec::string("serverUrl"),
            AttrSpec::boolean("synchronous", "false"),
            AttrSpec::string("synchronousEventTimeout"),
            AttrSpec::string("transactionTimeout"),
            AttrSpec::string_with_default("workingDirectory", "./.mule"),
        ],
        children: &[
            ChildSpec::list("threading-profile"),
            ChildSpec::optional("pooling-profile"),
            ChildSpec::optional("queue-profile"),
            ChildSpec::optional("persistence-strategy"),
            ChildSpec::optional("connection-strategy"),
        ],
    },
    ElementShape {
        tag: "container-context",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::string("name"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "security-manager",
        attrs: &[AttrSpec::string("className"), AttrSpec::string("ref")],
        children: &[
            ChildSpec::list("security-provider"),
            ChildSpec::list("encryption-strategy"),
        ],
    },
    ElementShape {
        tag: "security-provider",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::required_string("name"),
            AttrSpec::string("ref"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "encryption-strategy",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::required_string("name"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "security-filter",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::boolean("useProviders", "true"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "transaction-manager",
        attrs: &[
            AttrSpec::required_string("factory"),
            AttrSpec::string("ref"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "agents",
        attrs: &[],
        children: &[ChildSpec::list("agent")],
    },
    ElementShape {
        tag: "agent",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::required_string("name"),
            AttrSpec::string("ref"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "connector",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::required_string("name"),
            AttrSpec::string("ref"),
        ],
        children: &[
            ChildSpec::optional("properties"),
            ChildSpec::optional("threading-profile"),
            ChildSpec::optional("exception-strategy"),
            ChildSpec::optional("connection-strategy"),
        ],
    },
    ElementShape {
        tag: "endpoint-identifiers",
        attrs: &[],
        children: &[ChildSpec::list("endpoint-identifier")],
    },
    ElementShape {
        tag: "endpoint-identifier",
        attrs: &[
            AttrSpec::required_string("name"),
            AttrSpec::required_string("value"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "transformers",
        attrs: &[],
        children: &[ChildSpec::list("transformer")],
    },
    ElementShape {
        tag: "transformer",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::boolean("ignoreBadInput", "false"),
            AttrSpec::required_string("name"),
            AttrSpec::string("ref"),
            AttrSpec::string("returnClass"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "global-endpoints",
        attrs: &[],
        children: &[ChildSpec::list("endpoint")],
    },
    ElementShape {
        tag: "endpoint",
        attrs: &[
            AttrSpec::required_string("address"),
            AttrSpec::string("connector"),
            AttrSpec::enumerated(
                "createConnector",
                EnumKind::CreateConnector,
                "GET_OR_CREATE",
            ),
            AttrSpec::string("name"),
            AttrSpec::string("ref"),
            AttrSpec::boolean("remoteSync", "false"),
            AttrSpec::string("remoteSyncTimeout"),
            AttrSpec::string("responseTransformers"),
            AttrSpec::boolean("synchronous", "false"),
            AttrSpec::string("transformers"),
            AttrSpec::enumerated("type", EnumKind::EndpointDirection, "senderAndReceiver"),
        ],
        children: &[
            ChildSpec::optional("transaction"),
            ChildSpec::optional("filter"),
            ChildSpec::optional("security-filter"),
            ChildSpec::optional("properties"),
        ],
    },
    ElementShape {
        tag: "global-endpoint",
        attrs: &[
            AttrSpec::string("address"),
            AttrSpec::required_string("name"),
            AttrSpec::boolean("remoteSync", "false"),
            AttrSpec::string("remoteSyncTimeout"),
            AttrSpec::string("responseTransformers"),
            AttrSpec::boolean("synchronous", "false"),
            AttrSpec::string("transformers"),
        ],
        children: &[
            ChildSpec::optional("transaction"),
            ChildSpec::optional("filter"),
            ChildSpec::optional("security-filter"),
            ChildSpec::optional("properties"),
        ],
    },
    ElementShape {
        tag: "interceptor-stack",
        attrs: &[AttrSpec::required_string("name")],
        children: &[ChildSpec::list("interceptor")],
    },
    ElementShape {
        tag: "interceptor",
        attrs: &[AttrSpec::string("className"), AttrSpec::string("name")],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "model",
        attrs: &[
            AttrSpec::string("className"),
            AttrSpec::required_string("name"),
            AttrSpec::string("ref"),
            AttrSpec::enumerated("type", EnumKind::ModelKind, "seda"),
        ],
        children: &[
            ChildSpec::optional("description"),
            ChildSpec::optional("entry-point-resolver"),
            ChildSpec::optional("component-factory"),
            ChildSpec::optional("component-lifecycle-adapter-factory"),
            ChildSpec::optional("component-pool-factory"),
            ChildSpec::optional("exception-strategy"),
            ChildSpec::list("mule-descriptor"),
        ],
    },
    ElementShape {
        tag: "entry-point-resolver",
        attrs: &[AttrSpec::required_string("className")],
        children: &[],
    },
    ElementShape {
        tag: "component-factory",
        attrs: &[AttrSpec::required_string("className")],
        children: &[],
    },
    ElementShape {
        tag: "component-lifecycle-adapter-factory",
        attrs: &[AttrSpec::required_string("className")],
        children: &[],
    },
    ElementShape {
        tag: "component-pool-factory",
        attrs: &[AttrSpec::required_string("className")],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "exception-strategy",
        attrs: &[AttrSpec::required_string("className")],
        children: &[
            ChildSpec::list("endpoint"),
            ChildSpec::list("global-endpoint"),
            ChildSpec::optional("properties"),
        ],
    },
    ElementShape {
        tag: "mule-descriptor",
        attrs: &[
            AttrSpec::boolean("containerManaged", "true"),
            AttrSpec::required_string("implementation"),
            AttrSpec::string("inboundEndpoint"),
            AttrSpec::string("inboundTransformer"),
            AttrSpec::enumerated("initialState", EnumKind::InitialState, "started"),
            AttrSpec::required_string("name"),
            AttrSpec::string("outboundEndpoint"),
            AttrSpec::string("outboundTransformer"),
            AttrSpec::string("ref"),
            AttrSpec::string("responseTransformer"),
            AttrSpec::boolean("singleton", "false"),
            AttrSpec::string("version"),
        ],
        children: &[
            ChildSpec::optional("inbound-router"),
            ChildSpec::optional("outbound-router"),
            ChildSpec::optional("response-router"),
            ChildSpec::list("interceptor"),
            ChildSpec::optional("threading-profile"),
            ChildSpec::optional("pooling-profile"),
            ChildSpec::optional("queue-profile"),
            ChildSpec::optional("exception-strategy"),
            ChildSpec::optional("properties"),
        ],
    },
    ElementShape {
        tag: "inbound-router",
        attrs: &[AttrSpec::boolean("matchAll", "false")],
        children: &[
            ChildSpec::optional("catch-all-strategy"),
            ChildSpec::list("endpoint"),
            ChildSpec::list("global-endpoint"),
            ChildSpec::list("router"),
        ],
    },
    ElementShape {
        tag: "outbound-router",
        attrs: &[AttrSpec::boolean("matchAll", "false")],
        children: &[
            ChildSpec::optional("catch-all-strategy"),
            ChildSpec::list("router"),
        ],
    },
    ElementShape {
        tag: "response-router",
        attrs: &[AttrSpec::string("timeout")],
        children: &[
            ChildSpec::list("endpoint"),
            ChildSpec::list("global-endpoint"),
            ChildSpec::list("router"),
        ],
    },
    // Routers are evaluated in document order; the list slots below are
    // order-significant.
    ElementShape {
        tag: "router",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::enumerated(
                "enableCorrelation",
                EnumKind::EnableCorrelation,
                "IF_NOT_SET",
            ),
            AttrSpec::string("propertyExtractor"),
        ],
        children: &[
            ChildSpec::list("endpoint"),
            ChildSpec::list("global-endpoint"),
            ChildSpec::optional("reply-to"),
            ChildSpec::optional("transaction"),
            ChildSpec::optional("filter"),
            ChildSpec::optional("properties"),
        ],
    },
    ElementShape {
        tag: "catch-all-strategy",
        attrs: &[AttrSpec::required_string("className")],
        children: &[
            ChildSpec::optional("endpoint"),
            ChildSpec::optional("global-endpoint"),
            ChildSpec::optional("properties"),
        ],
    },
    ElementShape {
        tag: "reply-to",
        attrs: &[AttrSpec::required_string("address")],
        children: &[],
    },
    ElementShape {
        tag: "transaction",
        attrs: &[
            AttrSpec::required_enum("action", EnumKind::TransactionAction),
            AttrSpec::string("factory"),
            AttrSpec::string("timeout"),
        ],
        children: &[ChildSpec::optional("constraint")],
    },
    ElementShape {
        tag: "constraint",
        attrs: &[
            AttrSpec::string("batchSize"),
            AttrSpec::string("className"),
            AttrSpec::string("expectedType"),
            AttrSpec::string("expression"),
            AttrSpec::string("frequency"),
            AttrSpec::string("path"),
            AttrSpec::string("pattern"),
        ],
        children: &[
            ChildSpec::optional("left-filter"),
            ChildSpec::optional("right-filter"),
            ChildSpec::optional("filter"),
        ],
    },
    ElementShape {
        tag: "filter",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::string("configFile"),
            AttrSpec::string("expectedType"),
            AttrSpec::string("expression"),
            AttrSpec::string("path"),
            AttrSpec::string("pattern"),
        ],
        children: &[
            ChildSpec::optional("properties"),
            ChildSpec::optional("filter"),
            ChildSpec::optional("left-filter"),
            ChildSpec::optional("right-filter"),
        ],
    },
    // left-filter and right-filter are schema-distinct types that happen
    // to share the filter attribute set; they stay separate shapes.
    ElementShape {
        tag: "left-filter",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::string("configFile"),
            AttrSpec::string("expectedType"),
            AttrSpec::string("expression"),
            AttrSpec::string("path"),
            AttrSpec::string("pattern"),
        ],
        children: &[
            ChildSpec::optional("properties"),
            ChildSpec::optional("filter"),
            ChildSpec::optional("left-filter"),
            ChildSpec::optional("right-filter"),
        ],
    },
    ElementShape {
        tag: "right-filter",
        attrs: &[
            AttrSpec::required_string("className"),
            AttrSpec::string("configFile"),
            AttrSpec::string("expectedType"),
            AttrSpec::string("expression"),
            AttrSpec::string("path"),
            AttrSpec::string("pattern"),
        ],
        children: &[
            ChildSpec::optional("properties"),
            ChildSpec::optional("filter"),
            ChildSpec::optional("left-filter"),
            ChildSpec::optional("right-filter"),
        ],
    },
    ElementShape {
        tag: "threading-profile",
        attrs: &[
            AttrSpec::boolean("doThreading", "true"),
            AttrSpec::enumerated("id", EnumKind::ThreadingProfileId, "default"),
            AttrSpec::string("maxBufferSize"),
            AttrSpec::string("maxThreadsActive"),
            AttrSpec::string("maxThreadsIdle"),
            AttrSpec::enumerated(
                "poolExhaustedAction",
                EnumKind::PoolExhaustedAction,
                "RUN",
            ),
            AttrSpec::string("threadTTL"),
            AttrSpec::string("threadWaitTimeout"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "pooling-profile",
        attrs: &[
            AttrSpec::enumerated("exhaustedAction", EnumKind::ExhaustedAction, "GROW"),
            AttrSpec::string("factory"),
            AttrSpec::enumerated(
                "initialisationPolicy",
                EnumKind::InitialisationPolicy,
                "INITIALISE_FIRST",
            ),
            AttrSpec::string("maxActive"),
            AttrSpec::string("maxIdle"),
            AttrSpec::string("maxWait"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "queue-profile",
        attrs: &[
            AttrSpec::string("maxOutstandingMessages"),
            AttrSpec::boolean("persistent", "false"),
        ],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "persistence-strategy",
        attrs: &[AttrSpec::required_string("className")],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "connection-strategy",
        attrs: &[AttrSpec::required_string("className")],
        children: &[ChildSpec::optional("properties")],
    },
    ElementShape {
        tag: "properties",
        attrs: &[],
        children: &[
            ChildSpec::list("property"),
            ChildSpec::list("factory-property"),
            ChildSpec::list("container-property"),
            ChildSpec::list("system-property"),
            ChildSpec::list("map"),
            ChildSpec::list("list"),
            ChildSpec::list("file-properties"),
            ChildSpec::list("text-property"),
        ],
    },
    ElementShape {
        tag: "property",
        attrs: &[
            AttrSpec::required_string("name"),
            AttrSpec::required_string("value"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "factory-property",
        attrs: &[
            AttrSpec::required_string("factory"),
            AttrSpec::required_string("name"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "container-property",
        attrs: &[
            AttrSpec::string("container"),
            AttrSpec::required_string("name"),
            AttrSpec::required_string("reference"),
            AttrSpec::boolean("required", "true"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "system-property",
        attrs: &[
            AttrSpec::string("defaultValue"),
            AttrSpec::required_string("key"),
            AttrSpec::required_string("name"),
        ],
        children: &[],
    },
    // Value is the element's text content, carried by the content bucket.
    ElementShape {
        tag: "text-property",
        attrs: &[AttrSpec::required_string("name")],
        children: &[],
    },
    ElementShape {
        tag: "file-properties",
        attrs: &[
            AttrSpec::required_string("location"),
            AttrSpec::boolean("override", "false"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "map",
        attrs: &[AttrSpec::required_string("name")],
        children: &[
            ChildSpec::list("property"),
            ChildSpec::list("factory-property"),
            ChildSpec::list("container-property"),
            ChildSpec::list("system-property"),
            ChildSpec::list("map"),
            ChildSpec::list("list"),
            ChildSpec::list("file-properties"),
        ],
    },
    ElementShape {
        tag: "list",
        attrs: &[AttrSpec::required_string("name")],
        children: &[
            ChildSpec::list("entry"),
            ChildSpec::list("factory-entry"),
            ChildSpec::list("system-entry"),
            ChildSpec::list("container-entry"),
        ],
    },
    ElementShape {
        tag: "entry",
        attrs: &[AttrSpec::required_string("value")],
        children: &[],
    },
    ElementShape {
        tag: "factory-entry",
        attrs: &[AttrSpec::required_string("factory")],
        children: &[],
    },
    ElementShape {
        tag: "system-entry",
        attrs: &[
            AttrSpec::string("defaultValue"),
            AttrSpec::required_string("key"),
        ],
        children: &[],
    },
    ElementShape {
        tag: "container-entry",
        attrs: &[
            AttrSpec::required_string("reference"),
            AttrSpec::boolean("required", "true"),
        ],
        children: &[],
    },
];

static REGISTRY: Lazy<IndexMap<&'static str, &'static ElementShape>> = Lazy::new(|| {
    SHAPES.iter().map(|shape| (shape.tag, shape)).collect()
});

/// The tag-keyed shape registry, built once at first use
pub fn registry() -> &'static IndexMap<&'static str, &'static ElementShape> {
    &REGISTRY
}

/// Look up the shape for an element tag
pub fn shape_for(tag: &str) -> Option<&'static ElementShape> {
    REGISTRY.get(tag).copied()
}
