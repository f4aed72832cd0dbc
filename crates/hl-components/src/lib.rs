//! hl-components: entity model for hydraulic loops.
//!
//! Provides:
//! - Pressure-drop correlations for pipes, pumps and control valves
//! - Node entities (junctions and fixed-pressure references)
//! - Branch entities (static elevation, pump, pipe, control valve)
//!
//! Every branch kind implements the `PressureChange` trait: the pressure
//! change in the branch's `from -> to` direction as a function of volumetric
//! flow. Laws are pure functions of flow and parameters, suitable for
//! repeated residual evaluation.
//!
//! # Example
//!
//! ```
//! use hl_components::{Branch, Pipe, PressureChange};
//! use hl_core::units::{kg_m3, m};
//!
//! let pipe = Pipe::new(0.02, m(100.0), m(0.1), kg_m3(1000.0));
//! let branch = Branch::new("Return", "Header", "Tank", pipe.into());
//!
//! let dp = branch.pressure_change(0.05);
//! assert!(dp < 0.0, "a pipe always loses pressure along the flow");
//! ```

pub mod branch;
pub mod common;
pub mod correlations;
pub mod node;
pub mod traits;

// Re-exports
pub use branch::{Branch, BranchKind, ControlValve, Pipe, Pump, StaticSegment};
pub use node::{Node, NodeKind};
pub use traits::PressureChange;
