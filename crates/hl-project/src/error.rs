use hl_graph::GraphError;
use thiserror::Error;

/// A topology record that cannot be turned into entities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{entity} '{name}' is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        name: String,
        field: &'static str,
    },

    #[error("Branch '{name}' has unknown branch_type '{kind}'")]
    UnknownBranchKind { name: String, kind: String },

    #[error("Node '{name}' has unknown node_type '{kind}'")]
    UnknownNodeKind { name: String, kind: String },

    #[error("Invalid topology: {0}")]
    Topology(#[from] GraphError),
}

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Unsupported topology file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ProjectResult<T> = Result<T, ProjectError>;
