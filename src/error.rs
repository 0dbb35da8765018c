//! Error types for graph construction and solving.

use thiserror::Error;

/// Result type for graph and solver operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while building a graph or configuring a solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint lies outside `[0, n)`.
    #[error("vertex {vertex} out of range for graph with {len} vertices")]
    OutOfRange { vertex: u32, len: usize },

    /// A malformed argument, e.g. a negative weight or bad terminals.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
