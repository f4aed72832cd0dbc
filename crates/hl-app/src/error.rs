//! Error types for the hl-app facade.

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Project(#[from] hl_project::ProjectError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] hl_project::ConfigurationError),

    #[error("Solver error: {0}")]
    Solver(#[from] hl_solver::SolverError),
}

impl From<hl_graph::GraphError> for AppError {
    fn from(err: hl_graph::GraphError) -> Self {
        AppError::Configuration(err.into())
    }
}

/// Result type for hl-app operations.
pub type AppResult<T> = Result<T, AppError>;
