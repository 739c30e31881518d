//! Error types for queries and coordinate transforms.

use thiserror::Error;

use crate::samples::Topology;

/// Query result type
pub type Result<T> = std::result::Result<T, QueryError>;

/// Failures raised while configuring or evaluating a query.
///
/// Every variant is terminal for the query that raised it; no partial
/// output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Selection not set, output size mismatch, unknown value name, or a
    /// malformed sample set.
    #[error("invalid configuration of spatial database {label}: {message}")]
    InvalidConfiguration { label: String, message: String },

    /// No non-extrapolating, non-degenerate figure among the candidates.
    #[error("could not find points for {kind} interpolation in spatial database {label}", kind = .topology.interpolation_name())]
    OutOfBounds { label: String, topology: Topology },

    /// Topology tag is not one of point, line, area, volume.
    #[error("unsupported topology `{0}`")]
    UnsupportedTopology(String),

    /// Query mode tag is not one of nearest, linear.
    #[error("unsupported query mode `{0}`; expected nearest or linear")]
    UnsupportedMode(String),

    #[error("coordinate transform failed: {0}")]
    Transform(#[from] TransformError),
}

impl QueryError {
    pub(crate) fn config(label: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            label: label.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn out_of_bounds(label: &str, topology: Topology) -> Self {
        Self::OutOfBounds {
            label: label.to_owned(),
            topology,
        }
    }
}

/// Failures of the coordinate transform collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("coordinate system is not initialized: {0}")]
    Uninitialized(String),

    #[error("incompatible coordinate systems: {0}")]
    Incompatible(String),
}
