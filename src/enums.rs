//! Enum registry for closed-set configuration attributes
//!
//! Every enumerated attribute in the schema family draws from a fixed,
//! non-extensible literal set. The registry maps symbolic names (the
//! serialized form) to small integer ordinals (the in-memory form) and
//! back. Lookups are total: unrecognized input yields `None`, never a
//! panic, so the loader can report a bad literal as a validation error
//! and keep going.

use std::fmt;

/// The closed enumerations of the schema family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    /// Transaction demarcation action (`transaction@action`)
    TransactionAction,
    /// Connector creation policy (`endpoint@createConnector`)
    CreateConnector,
    /// Correlation policy (`router@enableCorrelation`)
    EnableCorrelation,
    /// Object-pool exhaustion action (`pooling-profile@exhaustedAction`)
    ExhaustedAction,
    /// Thread-pool exhaustion action (`threading-profile@poolExhaustedAction`)
    ///
    /// Overlaps [`EnumKind::ExhaustedAction`] in literal names but is a
    /// distinct type in the owning schema; the two are not unified here.
    PoolExhaustedAction,
    /// Threading profile identifier (`threading-profile@id`)
    ThreadingProfileId,
    /// Pooled component initialisation policy
    /// (`pooling-profile@initialisationPolicy`)
    InitialisationPolicy,
    /// Component lifecycle initial state (`mule-descriptor@initialState`)
    InitialState,
    /// Endpoint direction (`endpoint@type`)
    EndpointDirection,
    /// Model implementation kind (`model@type`)
    ModelKind,
}

impl EnumKind {
    /// The literal names of this enumeration, in ordinal order
    pub fn literals(&self) -> &'static [&'static str] {
        match self {
            Self::TransactionAction => &[
                "NONE",
                "ALWAYS_BEGIN",
                "BEGIN_OR_JOIN",
                "ALWAYS_JOIN",
                "JOIN_IF_POSSIBLE",
            ],
            Self::CreateConnector => &["GET_OR_CREATE", "ALWAYS_CREATE", "NEVER_CREATE"],
            Self::EnableCorrelation => &["ALWAYS", "NEVER", "IF_NOT_SET"],
            Self::ExhaustedAction => &["GROW", "WAIT", "FAIL"],
            Self::PoolExhaustedAction => {
                &["WAIT", "DISCARD", "DISCARD_OLDEST", "ABORT", "RUN"]
            }
            Self::ThreadingProfileId => &["receiver", "dispatcher", "component", "default"],
            Self::InitialisationPolicy => {
                &["INITIALISE_NONE", "INITIALISE_FIRST", "INITIALISE_ALL"]
            }
            Self::InitialState => &["started", "stopped"],
            Self::EndpointDirection => &["sender", "receiver", "senderAndReceiver"],
            Self::ModelKind => &[
                "seda",
                "direct",
                "pipeline",
                "jms",
                "jms-clustered",
                "jcyclone",
                "custom",
            ],
        }
    }

    /// All registry kinds, for exhaustive iteration in tests and tools
    pub fn all() -> &'static [EnumKind] {
        &[
            Self::TransactionAction,
            Self::CreateConnector,
            Self::EnableCorrelation,
            Self::ExhaustedAction,
            Self::PoolExhaustedAction,
            Self::ThreadingProfileId,
            Self::InitialisationPolicy,
            Self::InitialState,
            Self::EndpointDirection,
            Self::ModelKind,
        ]
    }
}

/// One value of a closed enumeration: a kind plus an ordinal into its
/// literal table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumLiteral {
    /// Owning enumeration
    pub kind: EnumKind,
    /// Position in the literal table
    pub ordinal: usize,
}

impl EnumLiteral {
    /// The symbolic name used in serialized form
    pub fn name(&self) -> &'static str {
        self.kind.literals()[self.ordinal]
    }
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Look up a literal by its symbolic name
///
/// Names are case-sensitive. Returns `None` for anything outside the
/// closed set.
pub fn lookup_by_name(kind: EnumKind, name: &str) -> Option<EnumLiteral> {
    kind.literals()
        .iter()
        .position(|&literal| literal == name)
        .map(|ordinal| EnumLiteral { kind, ordinal })
}

/// Look up a literal by its ordinal
pub fn lookup_by_ordinal(kind: EnumKind, ordinal: usize) -> Option<EnumLiteral> {
    if ordinal < kind.literals().len() {
        Some(EnumLiteral { kind, ordinal })
    } else {
        None
    }
}
