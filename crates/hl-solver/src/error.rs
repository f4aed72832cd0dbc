//! Error types for solver operations.

use thiserror::Error;

/// Errors that can occur during network solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("No steady state found after {attempts} attempt(s): {message}")]
    Convergence { attempts: usize, message: String },

    #[error("Graph error: {0}")]
    Graph(#[from] hl_graph::GraphError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
