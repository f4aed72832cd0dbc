//! Entity factory: topology records to node and branch entities.

use hl_components::{Branch, BranchKind, ControlValve, Node, Pipe, Pump, StaticSegment};
use hl_core::units::{constants::DEFAULT_GRAVITY_MPS2, kg_m3, m, mps2, pa};

use crate::error::ConfigurationError;
use crate::schema::{BranchDef, NodeDef};

const UNNAMED: &str = "<unnamed>";

/// Build a node entity from its record.
///
/// `node_type` defaults to `"junction"`; a reference node without a
/// `reference_pressure` sits at 0 Pa.
pub fn create_node(def: &NodeDef) -> Result<Node, ConfigurationError> {
    let name = def
        .name
        .clone()
        .ok_or_else(|| missing("node", UNNAMED, "name"))?;

    match def.node_type.as_deref().unwrap_or("junction") {
        "junction" => Ok(Node::junction(name)),
        "reference" => {
            let pressure = pa(def.reference_pressure.unwrap_or(0.0));
            Ok(Node::reference(name, pressure))
        }
        other => Err(ConfigurationError::UnknownNodeKind {
            name,
            kind: other.to_string(),
        }),
    }
}

/// Build a branch entity from its record.
pub fn create_branch(def: &BranchDef) -> Result<Branch, ConfigurationError> {
    let name = def
        .name
        .clone()
        .ok_or_else(|| missing("branch", UNNAMED, "name"))?;
    let fields = Fields { def, name: &name };

    let kind_tag = fields.text("branch_type", &def.branch_type)?;
    let from = fields.text("from_node_name", &def.from_node_name)?;
    let to = fields.text("to_node_name", &def.to_node_name)?;

    let gravity = mps2(def.gravity.unwrap_or(DEFAULT_GRAVITY_MPS2));

    let kind: BranchKind = match kind_tag.as_str() {
        "static" => StaticSegment::new(
            m(fields.real("elevation_change", def.elevation_change)?),
            kg_m3(fields.density()?),
            gravity,
        )
        .into(),
        "pump" => Pump::new(
            def.num_of_pumps
                .ok_or_else(|| missing("branch", &name, "num_of_pumps"))?,
            fields.real("pump_speed", def.pump_speed)?,
            kg_m3(fields.density()?),
            gravity,
        )
        .into(),
        "pipe" => Pipe::new(
            fields.real("friction_factor", def.friction_factor)?,
            m(fields.real("length", def.length)?),
            m(fields.real("diameter", def.diameter)?),
            kg_m3(fields.density()?),
        )
        .into(),
        "control_valve" => ControlValve::new(
            fields.real("valve_travel", def.valve_travel)?,
            kg_m3(fields.density()?),
            gravity,
        )
        .into(),
        _ => {
            return Err(ConfigurationError::UnknownBranchKind {
                name,
                kind: kind_tag,
            });
        }
    };

    Ok(Branch::new(name, from, to, kind))
}

/// Required-field lookups that name the branch on failure.
struct Fields<'a> {
    def: &'a BranchDef,
    name: &'a str,
}

impl Fields<'_> {
    fn text(
        &self,
        field: &'static str,
        value: &Option<String>,
    ) -> Result<String, ConfigurationError> {
        value.clone().ok_or_else(|| missing("branch", self.name, field))
    }

    fn real(&self, field: &'static str, value: Option<f64>) -> Result<f64, ConfigurationError> {
        value.ok_or_else(|| missing("branch", self.name, field))
    }

    fn density(&self) -> Result<f64, ConfigurationError> {
        self.real("density", self.def.density)
    }
}

fn missing(entity: &'static str, name: &str, field: &'static str) -> ConfigurationError {
    ConfigurationError::MissingField {
        entity,
        name: name.to_string(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_components::{NodeKind, PressureChange};

    fn pipe_def() -> BranchDef {
        BranchDef {
            name: Some("Return".into()),
            branch_type: Some("pipe".into()),
            from_node_name: Some("Header".into()),
            to_node_name: Some("Tank".into()),
            friction_factor: Some(0.02),
            length: Some(100.0),
            diameter: Some(0.1),
            density: Some(1000.0),
            ..BranchDef::default()
        }
    }

    #[test]
    fn node_type_defaults_to_junction() {
        let node = create_node(&NodeDef {
            name: Some("Tee".into()),
            ..NodeDef::default()
        })
        .unwrap();
        assert_eq!(node.kind, NodeKind::Junction);
    }

    #[test]
    fn reference_pressure_defaults_to_zero() {
        let node = create_node(&NodeDef {
            name: Some("Tank".into()),
            node_type: Some("reference".into()),
            reference_pressure: None,
        })
        .unwrap();
        assert_eq!(node.fixed_pressure(), Some(0.0));
    }

    #[test]
    fn unknown_node_kind_is_rejected() {
        let err = create_node(&NodeDef {
            name: Some("Tank".into()),
            node_type: Some("reservoir".into()),
            reference_pressure: None,
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownNodeKind {
                name: "Tank".into(),
                kind: "reservoir".into()
            }
        );
    }

    #[test]
    fn unnamed_node_is_rejected() {
        let err = create_node(&NodeDef::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingField { field: "name", .. }
        ));
    }

    #[test]
    fn pipe_record_builds_pipe() {
        let branch = create_branch(&pipe_def()).unwrap();
        assert_eq!(branch.kind.name(), "pipe");
        assert_eq!(branch.from_node, "Header");
        assert_eq!(branch.to_node, "Tank");
        assert!(branch.pressure_change(0.05) < 0.0);
    }

    #[test]
    fn missing_diameter_names_branch_and_field() {
        let def = BranchDef {
            diameter: None,
            ..pipe_def()
        };
        let err = create_branch(&def).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingField {
                entity: "branch",
                name: "Return".into(),
                field: "diameter"
            }
        );
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let def = BranchDef {
            to_node_name: None,
            ..pipe_def()
        };
        assert!(matches!(
            create_branch(&def),
            Err(ConfigurationError::MissingField {
                field: "to_node_name",
                ..
            })
        ));
    }

    #[test]
    fn unknown_branch_kind_is_rejected() {
        let def = BranchDef {
            branch_type: Some("heat_exchanger".into()),
            ..pipe_def()
        };
        assert!(matches!(
            create_branch(&def),
            Err(ConfigurationError::UnknownBranchKind { .. })
        ));
    }

    #[test]
    fn gravity_defaults_when_omitted() {
        let def = BranchDef {
            name: Some("Riser".into()),
            branch_type: Some("static".into()),
            from_node_name: Some("A".into()),
            to_node_name: Some("B".into()),
            elevation_change: Some(1.0),
            density: Some(1000.0),
            ..BranchDef::default()
        };
        let branch = create_branch(&def).unwrap();
        assert!((branch.pressure_change(0.0) - 9810.0).abs() < 1e-9);
    }

    #[test]
    fn pump_requires_count() {
        let def = BranchDef {
            name: Some("P-1".into()),
            branch_type: Some("pump".into()),
            from_node_name: Some("A".into()),
            to_node_name: Some("B".into()),
            pump_speed: Some(1.0),
            density: Some(1000.0),
            ..BranchDef::default()
        };
        assert!(matches!(
            create_branch(&def),
            Err(ConfigurationError::MissingField {
                field: "num_of_pumps",
                ..
            })
        ));
    }
}
