//! Graph-specific error types.

use hl_core::{BranchId, NodeId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share a name.
    #[error("Duplicate node name: {name}")]
    DuplicateNodeName { name: String },

    /// Two branches share a name.
    #[error("Duplicate branch name: {name}")]
    DuplicateBranchName { name: String },

    /// A branch endpoint names a node that was never added.
    #[error("Branch {branch} refers to unknown node {node}")]
    UnknownNodeName { branch: String, node: String },

    /// A branch endpoint id is out of range.
    #[error("Branch {branch} refers to non-existent node {node}")]
    InvalidNodeRef { branch: BranchId, node: NodeId },

    /// A vector handed to the incidence operator has the wrong length.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
