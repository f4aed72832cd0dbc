//! Core graph data structures.

use hl_core::{BranchId, NodeId};

/// A node in the hydraulic network (a point where pressure is defined).
///
/// Nodes are minimal here: an ID and a name. Physical data (reference
/// pressure) lives in the entity model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

/// A directed branch between two nodes.
///
/// Flow is positive in the `from -> to` direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub from: NodeId,
    pub to: NodeId,
}

impl Branch {
    /// True when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// The graph: a validated, immutable collection of nodes and branches.
///
/// Nodes and branches are stored in insertion order; their IDs are their
/// positions, which is also their slot in the solver state vector.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) branches: Vec<Branch>,
}

impl Graph {
    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all branches.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.slot())
    }

    /// Get a branch by ID (returns None if ID out of bounds).
    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.slot())
    }

    /// Branches whose endpoints coincide.
    pub fn self_loops(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.is_self_loop())
    }
}
