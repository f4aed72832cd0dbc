//! Topology file schema.
//!
//! Every record field is optional at the serde level; required fields are
//! enforced by the factory so a missing field reports which entity lacks it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TopologyDef {
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub branches: Vec<BranchDef>,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `"junction"` (default) or `"reference"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    /// Pa, reference nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_pressure: Option<f64>,
}

/// Flat branch record; which fields matter depends on `branch_type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BranchDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `"static"`, `"pump"`, `"pipe"` or `"control_valve"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_node_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_node_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_change: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_of_pumps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_speed: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valve_travel: Option<f64>,
}

/// Optional solver overrides carried with a topology.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    /// m^3/s, used to sample initial flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowrate_bounds: Option<(f64, f64)>,
    /// Pa, used to sample initial pressures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_bounds: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_reverse_flow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
