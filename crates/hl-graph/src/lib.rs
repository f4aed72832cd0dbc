//! hl-graph: network topology layer for hydroloop.
//!
//! Provides:
//! - Core graph data structures (Node, Branch, Graph)
//! - Incremental graph builder with validation
//! - Signed node/branch incidence matrix for the balance equations
//!
//! # Example
//!
//! ```
//! use hl_graph::{GraphBuilder, IncidenceMatrix};
//!
//! let mut builder = GraphBuilder::new();
//! let tank = builder.add_node("Tank");
//! let header = builder.add_node("Header");
//! builder.add_branch("Pump", tank, header);
//! builder.add_branch("Return", header, tank);
//! let graph = builder.build().unwrap();
//!
//! let incidence = IncidenceMatrix::from_graph(&graph);
//! assert_eq!(incidence.entry(0, 0), -1.0);
//! assert_eq!(incidence.entry(1, 0), 1.0);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod incidence;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Branch, Graph, Node};
pub use incidence::IncidenceMatrix;
