//! Domain-level errors for tree construction, queries and decoding

use generational_arena::Index;
use thiserror::Error;

use crate::domain::binary::{NodeId, Side};

/// Domain errors represent contract violations of the tree operations.
/// Every query over a well-formed tree succeeds; these only surface for
/// foreign handles, illegal construction steps and malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node not found in tree: {0}")]
    NodeNotFound(NodeId),

    #[error("parent index not found: {0:?}")]
    ParentNotFound(Index),

    #[error("{side} child of {parent} is already set")]
    SlotOccupied { parent: NodeId, side: Side },

    #[error("root already set")]
    RootAlreadySet,

    #[error("tree is empty")]
    EmptyTree,

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
