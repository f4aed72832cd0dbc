//! Root-finder seam used by the steady-state driver.

use nalgebra::DVector;

use crate::error::SolverResult;
use crate::newton::{NewtonConfig, newton_solve};

/// Outcome of one root-finding run.
///
/// Non-convergence is reported here (`converged == false` plus `message`),
/// not as an error, so the caller can retry from another start.
#[derive(Debug, Clone, PartialEq)]
pub struct RootReport {
    /// Final iterate (raw, before any flow clamping or reference overwrite).
    pub x: DVector<f64>,
    /// Infinity norm of the residual at `x`.
    pub residual_norm: f64,
    pub iterations: usize,
    /// Residual evaluations, including those spent on Jacobians.
    pub evaluations: usize,
    pub converged: bool,
    pub message: String,
}

/// Residual callback handed to a root finder.
pub type ResidualFn<'a> = dyn Fn(&DVector<f64>) -> SolverResult<DVector<f64>> + 'a;

/// Finds `x >= lower_bounds` with `residual(x) == 0`.
pub trait RootFinder {
    /// Errors are reserved for failures that no other starting point could
    /// fix (bad state length, non-finite state).
    fn find_root(
        &self,
        residual: &ResidualFn<'_>,
        x0: DVector<f64>,
        lower_bounds: &DVector<f64>,
    ) -> SolverResult<RootReport>;
}

/// Damped Newton with finite-difference Jacobian and SVD step.
#[derive(Debug, Clone, Default)]
pub struct DampedNewton {
    pub config: NewtonConfig,
}

impl DampedNewton {
    pub fn new(config: NewtonConfig) -> Self {
        Self { config }
    }
}

impl RootFinder for DampedNewton {
    fn find_root(
        &self,
        residual: &ResidualFn<'_>,
        x0: DVector<f64>,
        lower_bounds: &DVector<f64>,
    ) -> SolverResult<RootReport> {
        newton_solve(x0, residual, lower_bounds, &self.config)
    }
}
