//! Error types for tree surgery.

use thiserror::Error;

use crate::node::NodeId;

/// Result type for tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors raised when a tree operation would break the hierarchy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The handle does not belong to this tree
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    /// The node is not a child of the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// The node has no parent (root or detached)
    #[error("Node {0:?} has no parent")]
    NoParent(NodeId),

    /// The node is already attached somewhere else
    #[error("Node {0:?} is already attached; detach it first")]
    AlreadyAttached(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// Insertion index past the end of the child list
    #[error("Index {index} out of range for {parent:?} with {len} children")]
    IndexOutOfRange {
        parent: NodeId,
        index: usize,
        len: usize,
    },

    /// A loaded tree must start with a document node
    #[error("Root node must be a document, found '{found}'")]
    RootNotDocument { found: String },
}

impl TreeError {
    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownNode(_) => "TREE001",
            Self::NotAChild { .. } => "TREE002",
            Self::NoParent(_) => "TREE003",
            Self::AlreadyAttached(_) => "TREE004",
            Self::Cycle { .. } => "TREE005",
            Self::IndexOutOfRange { .. } => "TREE006",
            Self::RootNotDocument { .. } => "TREE007",
        }
    }
}
