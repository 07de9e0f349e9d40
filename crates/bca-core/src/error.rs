use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Machine-readable error codes shared by every bca crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidWeight,
    SelfLoop,
    DuplicateEdge,
    ZeroWeightCycle,
    VertexNotFound,
    ConfigParseError,
    DocumentParseError,
    InconsistentPathCount,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidWeight => "E1001",
            Self::SelfLoop => "E1002",
            Self::DuplicateEdge => "E1003",
            Self::ZeroWeightCycle => "E1004",
            Self::VertexNotFound => "E2001",
            Self::ConfigParseError => "E3001",
            Self::DocumentParseError => "E3002",
            Self::InconsistentPathCount => "E9001",
            Self::InternalUnexpected => "E9002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidWeight => "Edge weight is negative or not finite",
            Self::SelfLoop => "Edge connects a vertex to itself",
            Self::DuplicateEdge => "Edge already exists for this ordered pair",
            Self::ZeroWeightCycle => "Cycle of zero-weight edges",
            Self::VertexNotFound => "Vertex not found",
            Self::ConfigParseError => "Config file parse error",
            Self::DocumentParseError => "Graph document parse error",
            Self::InconsistentPathCount => "Shortest-path bookkeeping is inconsistent",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidWeight => {
                Some("Weights must be finite and >= 0; fix the input graph and retry.")
            }
            Self::SelfLoop => Some("Drop self-referencing edges before loading the graph."),
            Self::DuplicateEdge => {
                Some("Merge parallel edges first, or load them with accumulation enabled.")
            }
            Self::ZeroWeightCycle => {
                Some("Give at least one edge on the cycle a positive weight.")
            }
            Self::VertexNotFound => None,
            Self::ConfigParseError => Some("Fix syntax in .bca/config.toml and retry."),
            Self::DocumentParseError => {
                Some("Expected a JSON object with `vertices` and `edges` arrays.")
            }
            Self::InconsistentPathCount | Self::InternalUnexpected => {
                Some("Report a bug with the input graph attached.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the graph store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("self loop on vertex {0}")]
    SelfLoop(String),

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::SelfLoop(_) => ErrorCode::SelfLoop,
            Self::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
        }
    }
}

/// Errors raised while reading configuration or graph documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse graph document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::Document { .. } => ErrorCode::DocumentParseError,
        }
    }
}

/// Returns `true` if `weight` can be used as a shortest-path step cost.
#[must_use]
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}
