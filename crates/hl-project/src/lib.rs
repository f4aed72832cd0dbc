//! hl-project: topology file format, loaders and the entity factory.

pub mod error;
pub mod factory;
pub mod schema;

use std::path::Path;

pub use error::{ConfigurationError, ProjectError, ProjectResult};
pub use factory::{create_branch, create_node};
pub use schema::*;

pub fn parse_json(content: &str) -> ProjectResult<TopologyDef> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_yaml(content: &str) -> ProjectResult<TopologyDef> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn load_json(path: &Path) -> ProjectResult<TopologyDef> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

pub fn load_yaml(path: &Path) -> ProjectResult<TopologyDef> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_json(path: &Path, topology: &TopologyDef) -> ProjectResult<()> {
    let content = serde_json::to_string_pretty(topology)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn save_yaml(path: &Path, topology: &TopologyDef) -> ProjectResult<()> {
    let content = serde_yaml::to_string(topology)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a topology, choosing the parser from the file extension.
pub fn load_topology(path: &Path) -> ProjectResult<TopologyDef> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => load_json(path),
        Some("yaml") | Some("yml") => load_yaml(path),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}
