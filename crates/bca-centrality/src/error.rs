use bca_core::ErrorCode;
use thiserror::Error;

/// Errors raised by a centrality run.
///
/// Vertices are identified by their graph label so messages stay readable
/// regardless of the backend's handle type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CentralityError {
    #[error("invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("vertex {0} is not part of the graph")]
    UnknownVertex(String),

    #[error("zero-weight cycle through vertex {0}")]
    ZeroWeightCycle(String),

    #[error("vertex {vertex} lists predecessor {predecessor} without a positive path count")]
    InconsistentPathCount { vertex: String, predecessor: String },
}

impl CentralityError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::UnknownVertex(_) => ErrorCode::VertexNotFound,
            Self::ZeroWeightCycle(_) => ErrorCode::ZeroWeightCycle,
            Self::InconsistentPathCount { .. } => ErrorCode::InconsistentPathCount,
        }
    }
}
