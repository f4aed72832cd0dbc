//! Graph validation logic.

use std::collections::HashSet;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Branch, Node};

/// Validate the graph structure: names are unique and endpoints exist.
pub(crate) fn validate_structure(nodes: &[Node], branches: &[Branch]) -> GraphResult<()> {
    let mut node_names = HashSet::new();
    for node in nodes {
        if !node_names.insert(node.name.as_str()) {
            return Err(GraphError::DuplicateNodeName {
                name: node.name.clone(),
            });
        }
    }

    let mut branch_names = HashSet::new();
    for branch in branches {
        if !branch_names.insert(branch.name.as_str()) {
            return Err(GraphError::DuplicateBranchName {
                name: branch.name.clone(),
            });
        }
    }

    for branch in branches {
        for endpoint in [branch.from, branch.to] {
            if endpoint.slot() >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    branch: branch.id,
                    node: endpoint,
                });
            }
        }
    }

    Ok(())
}
