//! Application layer for hydroloop.
//!
//! Turns a topology file into a compiled model, runs the steady-state solver
//! and renders results for the CLI.

pub mod error;
pub mod model;
pub mod report;
pub mod simulation;

pub use error::{AppError, AppResult};
pub use model::{HydraulicModel, compile_topology, solver_config_from};
pub use report::{Row, branch_flows_lps, format_table, node_pressures_barg};
pub use simulation::Simulation;
