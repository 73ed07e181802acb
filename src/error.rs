//! Error types for genograph operations.
//!
//! All fallible operations return [`Result<T>`] with context-rich error messages.

use thiserror::Error;

/// Result type alias for genograph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for all genealogy graph operations.
///
/// Every public operation is strongly exception-safe: when one of these
/// errors is returned, the graph is exactly as it was before the call.
/// Node ids are rendered to strings at construction time so the error type
/// stays independent of the caller's id type.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Referenced node does not exist in the graph
    #[error("Node not found: {id}")]
    NotFound {
        /// ID of the missing node
        id: String,
    },

    /// A node with this id is already present
    #[error("Node already exists: {id}")]
    AlreadyExists {
        /// ID that collided
        id: String,
    },

    /// Attempt to remove the stem node
    #[error("Cannot remove the stem node: {id}")]
    CannotRemoveStem {
        /// ID of the stem
        id: String,
    },

    /// The requested edge would make a node its own ancestor
    #[error("Edge {parent} -> {child} would create a cycle")]
    WouldCycle {
        /// Parent end of the rejected edge
        parent: String,
        /// Child end of the rejected edge
        child: String,
    },

    /// Payload construction failed in the caller-supplied source
    #[error("Payload construction failed for {id}")]
    PayloadConstruction {
        /// ID the payload was being built for
        id: String,
        /// Error propagated verbatim from the payload source
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl GraphError {
    /// Create a `NotFound` error from any displayable id.
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Create an `AlreadyExists` error from any displayable id.
    pub fn already_exists(id: impl std::fmt::Display) -> Self {
        Self::AlreadyExists { id: id.to_string() }
    }

    /// Create a `PayloadConstruction` error wrapping a source error.
    pub fn payload_construction<E>(id: impl std::fmt::Display, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::PayloadConstruction {
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}
