//! Solver driver configuration.

use hl_core::ensure_range;

use crate::error::{SolverError, SolverResult};
use crate::newton::NewtonConfig;

/// Options for the steady-state driver.
///
/// The bounds only shape the random initial guess; they do not constrain
/// the solution.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Sampling range for initial branch flows (m^3/s).
    pub flowrate_bounds: (f64, f64),
    /// Sampling range for initial node pressures (Pa).
    pub pressure_bounds: (f64, f64),
    /// Total number of attempts before giving up.
    pub max_retries: usize,
    /// When false, negative flows are clamped to zero in the residual.
    pub allow_reverse_flow: bool,
    pub newton: NewtonConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            flowrate_bounds: (0.0, 1.0),
            pressure_bounds: (0.0, 1.0e6),
            max_retries: 10,
            allow_reverse_flow: false,
            newton: NewtonConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        for (range, what) in [
            (self.flowrate_bounds, "flowrate_bounds"),
            (self.pressure_bounds, "pressure_bounds"),
        ] {
            ensure_range(range, what).map_err(|e| SolverError::ProblemSetup {
                what: e.to_string(),
            })?;
        }
        if self.max_retries == 0 {
            return Err(SolverError::ProblemSetup {
                what: "max_retries must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
