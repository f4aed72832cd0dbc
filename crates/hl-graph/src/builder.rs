//! Incremental graph builder.

use hl_core::{BranchId, NodeId};
use tracing::warn;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Branch, Graph, Node};
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_node` and `add_branch` to build up the graph,
/// then call `build()` to validate and freeze it into an immutable `Graph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    branches: Vec<Branch>,
    next_node_id: u32,
    next_branch_id: u32,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::from_index(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a branch directed from `from` to `to` and return its ID.
    pub fn add_branch(&mut self, name: impl Into<String>, from: NodeId, to: NodeId) -> BranchId {
        let id = BranchId::from_index(self.next_branch_id);
        self.next_branch_id += 1;
        self.branches.push(Branch {
            id,
            name: name.into(),
            from,
            to,
        });
        id
    }

    /// Add a branch whose endpoints are given by node name.
    ///
    /// Fails if either name has not been added yet. When names are
    /// duplicated the first matching node wins; `build()` rejects that case.
    pub fn add_branch_between(
        &mut self,
        name: impl Into<String>,
        from_name: &str,
        to_name: &str,
    ) -> GraphResult<BranchId> {
        let name = name.into();
        let from = self.lookup(&name, from_name)?;
        let to = self.lookup(&name, to_name)?;
        Ok(self.add_branch(name, from, to))
    }

    /// Find a node ID by name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    fn lookup(&self, branch: &str, node: &str) -> GraphResult<NodeId> {
        self.node_id(node).ok_or_else(|| GraphError::UnknownNodeName {
            branch: branch.to_string(),
            node: node.to_string(),
        })
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    pub fn build(self) -> GraphResult<Graph> {
        validate::validate_structure(&self.nodes, &self.branches)?;

        let graph = Graph {
            nodes: self.nodes,
            branches: self.branches,
        };

        for branch in graph.self_loops() {
            warn!(
                branch = %branch.name,
                "branch starts and ends at the same node; it takes no part in mass balance"
            );
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = GraphBuilder::new();
        let n1 = builder.add_node("Node1");
        let n2 = builder.add_node("Node2");
        let b1 = builder.add_branch("Branch1", n1, n2);

        assert_eq!(n1.index(), 0);
        assert_eq!(n2.index(), 1);
        assert_eq!(b1.index(), 0);
        assert_eq!(builder.nodes.len(), 2);
        assert_eq!(builder.branches.len(), 1);
    }

    #[test]
    fn builder_resolves_names() {
        let mut builder = GraphBuilder::new();
        builder.add_node("Tank");
        builder.add_node("Header");
        let b = builder.add_branch_between("Supply", "Tank", "Header").unwrap();

        let graph = builder.build().unwrap();
        let branch = graph.branch(b).unwrap();
        assert_eq!(graph.node(branch.from).unwrap().name, "Tank");
        assert_eq!(graph.node(branch.to).unwrap().name, "Header");
    }

    #[test]
    fn builder_unknown_endpoint_name() {
        let mut builder = GraphBuilder::new();
        builder.add_node("Tank");
        let err = builder
            .add_branch_between("Supply", "Tank", "Ghost")
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownNodeName {
                branch: "Supply".into(),
                node: "Ghost".into()
            }
        );
    }

    #[test]
    fn builder_keeps_self_loop() {
        let mut builder = GraphBuilder::new();
        let n = builder.add_node("Loop");
        builder.add_branch("Recirc", n, n);
        let graph = builder.build().unwrap();
        assert_eq!(graph.self_loops().count(), 1);
    }
}
