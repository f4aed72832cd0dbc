//! Converged steady-state solution.

use hl_core::units::{Pressure, VolumeRate, m3ps, pa};

use crate::error::SolverResult;
use crate::problem::NetworkProblem;
use crate::root_finder::RootReport;

/// Solution of a steady-state loop.
///
/// `flow_rates` is index-aligned with the branch input order and
/// `pressures` with the node input order.
#[derive(Clone, Debug, PartialEq)]
pub struct SteadySolution {
    /// Branch volumetric flows (m^3/s), clamped as the residual saw them.
    pub flow_rates: Vec<f64>,
    /// Node pressures (Pa), reference nodes at their fixed values.
    pub pressures: Vec<f64>,
    /// Raw root-finder report of the successful attempt.
    pub report: RootReport,
    /// Attempt number that converged (1-based).
    pub attempts: usize,
}

impl SteadySolution {
    pub(crate) fn from_report(
        problem: &NetworkProblem<'_>,
        report: RootReport,
        attempts: usize,
    ) -> SolverResult<Self> {
        let (flows, pressures) = problem.split(&report.x)?;
        Ok(Self {
            flow_rates: flows.iter().copied().collect(),
            pressures: pressures.iter().copied().collect(),
            report,
            attempts,
        })
    }

    pub fn flow_rate(&self, branch: usize) -> Option<VolumeRate> {
        self.flow_rates.get(branch).copied().map(m3ps)
    }

    pub fn pressure(&self, node: usize) -> Option<Pressure> {
        self.pressures.get(node).copied().map(pa)
    }

    pub fn residual_norm(&self) -> f64 {
        self.report.residual_norm
    }

    pub fn iterations(&self) -> usize {
        self.report.iterations
    }
}
