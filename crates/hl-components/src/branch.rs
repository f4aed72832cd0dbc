//! Branch entities and their pressure-change laws.

use hl_core::units::{Accel, Density, Length};

use crate::common::{NEAR_ZERO_SPEED, NEAR_ZERO_TRAVEL, NEGLIGIBLE_FLOW};
use crate::correlations::{pipe_drop, pump_rise, valve_drop};
use crate::traits::PressureChange;

/// Static elevation leg: constant `rho g dz`, independent of flow.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticSegment {
    pub density: Density,
    pub gravity: Accel,
    /// Elevation change; positive values raise the pressure at the `to` node.
    pub elevation_change: Length,
}

impl StaticSegment {
    pub fn new(elevation_change: Length, density: Density, gravity: Accel) -> Self {
        Self {
            density,
            gravity,
            elevation_change,
        }
    }
}

impl PressureChange for StaticSegment {
    fn pressure_change(&self, _flow: f64) -> f64 {
        self.density.value * self.gravity.value * self.elevation_change.value
    }
}

/// Bank of identical centrifugal pumps in parallel sharing the branch flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Pump {
    pub density: Density,
    pub gravity: Accel,
    /// Speed as a fraction of rated speed.
    pub speed: f64,
    /// Number of pumps running in parallel.
    pub count: u32,
}

impl Pump {
    pub fn new(count: u32, speed: f64, density: Density, gravity: Accel) -> Self {
        Self {
            density,
            gravity,
            speed,
            count,
        }
    }

    /// Pressure rise at zero flow.
    pub fn shutoff_rise(&self) -> f64 {
        pump_rise(0.0, self.speed, self.density.value, self.gravity.value)
    }

    pub fn is_stopped(&self) -> bool {
        self.speed < NEAR_ZERO_SPEED
    }
}

impl PressureChange for Pump {
    fn pressure_change(&self, flow: f64) -> f64 {
        let per_pump = flow / f64::from(self.count);
        pump_rise(per_pump, self.speed, self.density.value, self.gravity.value)
    }

    fn warm_start_flow(&self) -> Option<f64> {
        self.is_stopped().then_some(NEGLIGIBLE_FLOW)
    }
}

/// Straight pipe with a fixed Darcy friction factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub friction_factor: f64,
    pub length: Length,
    pub diameter: Length,
    pub density: Density,
}

impl Pipe {
    pub fn new(friction_factor: f64, length: Length, diameter: Length, density: Density) -> Self {
        Self {
            friction_factor,
            length,
            diameter,
            density,
        }
    }
}

impl PressureChange for Pipe {
    /// Friction always opposes the flow.
    fn pressure_change(&self, flow: f64) -> f64 {
        let drop = pipe_drop(
            flow,
            self.friction_factor,
            self.length.value,
            self.diameter.value,
            self.density.value,
        );
        if flow < 0.0 { drop } else { -drop }
    }
}

/// Control valve following the manufacturer Cv curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlValve {
    pub density: Density,
    pub gravity: Accel,
    /// Valve travel as a fraction of full stroke.
    pub travel: f64,
}

impl ControlValve {
    pub fn new(travel: f64, density: Density, gravity: Accel) -> Self {
        Self {
            density,
            gravity,
            travel,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.travel < NEAR_ZERO_TRAVEL
    }
}

impl PressureChange for ControlValve {
    fn pressure_change(&self, flow: f64) -> f64 {
        -valve_drop(flow, self.travel, self.density.value, self.gravity.value)
    }

    fn warm_start_flow(&self) -> Option<f64> {
        self.is_closed().then_some(0.0)
    }
}

/// Closed set of branch kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchKind {
    Static(StaticSegment),
    Pump(Pump),
    Pipe(Pipe),
    ControlValve(ControlValve),
}

impl BranchKind {
    /// Kind tag as written in topology files.
    pub fn name(&self) -> &'static str {
        match self {
            BranchKind::Static(_) => "static",
            BranchKind::Pump(_) => "pump",
            BranchKind::Pipe(_) => "pipe",
            BranchKind::ControlValve(_) => "control_valve",
        }
    }
}

impl PressureChange for BranchKind {
    fn pressure_change(&self, flow: f64) -> f64 {
        match self {
            BranchKind::Static(s) => s.pressure_change(flow),
            BranchKind::Pump(p) => p.pressure_change(flow),
            BranchKind::Pipe(p) => p.pressure_change(flow),
            BranchKind::ControlValve(v) => v.pressure_change(flow),
        }
    }

    fn warm_start_flow(&self) -> Option<f64> {
        match self {
            BranchKind::Static(s) => s.warm_start_flow(),
            BranchKind::Pump(p) => p.warm_start_flow(),
            BranchKind::Pipe(p) => p.warm_start_flow(),
            BranchKind::ControlValve(v) => v.warm_start_flow(),
        }
    }
}

impl From<StaticSegment> for BranchKind {
    fn from(v: StaticSegment) -> Self {
        BranchKind::Static(v)
    }
}

impl From<Pump> for BranchKind {
    fn from(v: Pump) -> Self {
        BranchKind::Pump(v)
    }
}

impl From<Pipe> for BranchKind {
    fn from(v: Pipe) -> Self {
        BranchKind::Pipe(v)
    }
}

impl From<ControlValve> for BranchKind {
    fn from(v: ControlValve) -> Self {
        BranchKind::ControlValve(v)
    }
}

/// A named, directed branch between two nodes (referenced by name).
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub name: String,
    pub from_node: String,
    pub to_node: String,
    pub kind: BranchKind,
}

impl Branch {
    pub fn new(
        name: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        kind: BranchKind,
    ) -> Self {
        Self {
            name: name.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PressureChange for Branch {
    fn pressure_change(&self, flow: f64) -> f64 {
        self.kind.pressure_change(flow)
    }

    fn warm_start_flow(&self) -> Option<f64> {
        self.kind.warm_start_flow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_core::units::{constants::default_gravity, kg_m3, m};

    fn water() -> Density {
        kg_m3(1000.0)
    }

    #[test]
    fn static_leg_ignores_flow() {
        let leg = StaticSegment::new(m(-5.0), water(), default_gravity());
        let expected = 1000.0 * 9.81 * -5.0;
        assert_eq!(leg.pressure_change(0.0), expected);
        assert_eq!(leg.pressure_change(3.0), expected);
        assert_eq!(leg.warm_start_flow(), None);
    }

    #[test]
    fn pump_bank_splits_flow() {
        let single = Pump::new(1, 1.0, water(), default_gravity());
        let pair = Pump::new(2, 1.0, water(), default_gravity());
        assert_eq!(pair.pressure_change(0.2), single.pressure_change(0.1));
        assert!(single.pressure_change(0.1) < single.shutoff_rise());
    }

    #[test]
    fn stopped_pump_warm_starts_with_negligible_flow() {
        let stopped = Pump::new(1, 0.0, water(), default_gravity());
        assert_eq!(stopped.warm_start_flow(), Some(NEGLIGIBLE_FLOW));
        let running = Pump::new(1, 0.9, water(), default_gravity());
        assert_eq!(running.warm_start_flow(), None);
    }

    #[test]
    fn pipe_opposes_flow_in_both_directions() {
        let pipe = Pipe::new(0.02, m(100.0), m(0.1), water());
        assert!(pipe.pressure_change(0.05) < 0.0);
        assert!(pipe.pressure_change(-0.05) > 0.0);
        assert_eq!(pipe.pressure_change(0.05), -pipe.pressure_change(-0.05));
        assert_eq!(pipe.pressure_change(0.0), 0.0);
    }

    #[test]
    fn closed_valve_warm_starts_at_zero() {
        let valve = ControlValve::new(0.0, water(), default_gravity());
        assert!(valve.is_closed());
        assert_eq!(valve.warm_start_flow(), Some(0.0));
        assert!(valve.pressure_change(1e-4).is_finite());
        assert!(valve.pressure_change(1e-4) < 0.0);
    }

    #[test]
    fn branch_dispatches_to_kind() {
        let valve = ControlValve::new(0.5, water(), default_gravity());
        let branch = Branch::new("CV-1", "A", "B", valve.clone().into());
        assert_eq!(branch.kind.name(), "control_valve");
        assert_eq!(branch.pressure_change(0.03), valve.pressure_change(0.03));
        assert_eq!(branch.warm_start_flow(), None);
    }
}
