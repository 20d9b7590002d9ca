use thiserror::Error;

use crate::config::Orientation;

/// Errors surfaced by graph store operations.
///
/// Every failing operation validates before it mutates, so an `Err` never
/// leaves the adjacency structure partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A required node reference was absent (blank name).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("node '{name}' not found")]
    NodeNotFound { name: String },

    /// The request is structurally forbidden for this graph.
    #[error("operation '{operation}' is not valid for a {orientation} graph")]
    InvalidOperation {
        operation: String,
        orientation: Orientation,
    },

    #[error("no path exists from '{from}' to '{to}'")]
    NoPath { from: String, to: String },

    #[error("invalid graph configuration: {0}")]
    Config(String),
}

/// Coarse classification of a [`GraphError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    InvalidOperation,
    NoPath,
    Config,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            GraphError::NodeNotFound { .. } => ErrorKind::NotFound,
            GraphError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
            GraphError::NoPath { .. } => ErrorKind::NoPath,
            GraphError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn not_found(name: &str) -> Self {
        GraphError::NodeNotFound {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
