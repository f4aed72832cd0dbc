//! Node entities.

use hl_core::units::Pressure;

/// Physical role of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Free node; its pressure is solved for.
    Junction,
    /// Node held at a fixed pressure.
    Reference { pressure: Pressure },
}

/// A named point in the network where pressure is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn junction(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Junction,
        }
    }

    pub fn reference(name: impl Into<String>, pressure: Pressure) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Reference { pressure },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, NodeKind::Reference { .. })
    }

    /// Fixed pressure in Pa, if this node is a reference.
    pub fn fixed_pressure(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Junction => None,
            NodeKind::Reference { pressure } => Some(pressure.value),
        }
    }

    /// Kind tag as written in topology files.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Junction => "junction",
            NodeKind::Reference { .. } => "reference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::units::pa;

    #[test]
    fn reference_exposes_pressure() {
        let tank = Node::reference("Tank", pa(100_000.0));
        assert!(tank.is_reference());
        assert_eq!(tank.fixed_pressure(), Some(100_000.0));
        assert_eq!(tank.kind_name(), "reference");
    }

    #[test]
    fn junction_has_no_fixed_pressure() {
        let tee = Node::junction("Tee");
        assert!(!tee.is_reference());
        assert_eq!(tee.fixed_pressure(), None);
        assert_eq!(tee.name(), "Tee");
    }
}
