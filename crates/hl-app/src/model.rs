//! Compilation of a topology record into an immutable hydraulic model.

use hl_components::{Branch, Node};
use hl_graph::{Graph, GraphBuilder, IncidenceMatrix};
use hl_project::{SolverDef, TopologyDef, create_branch, create_node};
use hl_solver::{NetworkProblem, SolverConfig};
use tracing::debug;

use crate::error::AppResult;

/// Entities plus the assembled network, index-aligned with the topology.
#[derive(Debug, Clone)]
pub struct HydraulicModel {
    pub nodes: Vec<Node>,
    pub branches: Vec<Branch>,
    pub graph: Graph,
    pub incidence: IncidenceMatrix,
}

impl HydraulicModel {
    /// Residual problem over this model.
    pub fn problem(&self, allow_reverse_flow: bool) -> AppResult<NetworkProblem<'_>> {
        Ok(NetworkProblem::new(
            &self.incidence,
            &self.nodes,
            &self.branches,
            allow_reverse_flow,
        )?)
    }

    pub fn reference_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_reference()).count()
    }
}

/// Build entities, then the graph and incidence matrix.
///
/// Any configuration error aborts; no partial model is returned.
pub fn compile_topology(topology: &TopologyDef) -> AppResult<HydraulicModel> {
    let nodes = topology
        .nodes
        .iter()
        .map(create_node)
        .collect::<Result<Vec<_>, _>>()?;
    let branches = topology
        .branches
        .iter()
        .map(create_branch)
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = GraphBuilder::new();
    for node in &nodes {
        builder.add_node(node.name());
    }
    for branch in &branches {
        builder.add_branch_between(branch.name(), &branch.from_node, &branch.to_node)?;
    }
    let graph = builder.build()?;
    let incidence = IncidenceMatrix::from_graph(&graph);

    debug!(
        nodes = nodes.len(),
        branches = branches.len(),
        "compiled hydraulic model"
    );

    Ok(HydraulicModel {
        nodes,
        branches,
        graph,
        incidence,
    })
}

/// Solver options from a topology's `solver` block, defaults elsewhere.
pub fn solver_config_from(def: &SolverDef) -> SolverConfig {
    let defaults = SolverConfig::default();
    SolverConfig {
        flowrate_bounds: def.flowrate_bounds.unwrap_or(defaults.flowrate_bounds),
        pressure_bounds: def.pressure_bounds.unwrap_or(defaults.pressure_bounds),
        max_retries: def.max_retries.unwrap_or(defaults.max_retries),
        allow_reverse_flow: def.allow_reverse_flow.unwrap_or(defaults.allow_reverse_flow),
        newton: defaults.newton,
    }
}
