//! Initial guesses for the steady-state driver.
//!
//! A guess is drawn uniformly from the configured bounds, then branches at a
//! degenerate operating point (closed valve, stopped pump) have their flow
//! overridden so the root finder does not start on a flat part of their law.

use hl_components::PressureChange;
use nalgebra::DVector;
use rand::Rng;

use crate::config::SolverConfig;
use crate::problem::NetworkProblem;

/// Flows uniform in `flowrate_bounds`, pressures uniform in `pressure_bounds`.
pub fn sample_initial_guess<R: Rng + ?Sized>(
    problem: &NetworkProblem<'_>,
    config: &SolverConfig,
    rng: &mut R,
) -> DVector<f64> {
    let (q_lo, q_hi) = config.flowrate_bounds;
    let (p_lo, p_hi) = config.pressure_bounds;
    let branch_count = problem.branch_count();
    DVector::from_fn(problem.state_len(), |i, _| {
        if i < branch_count {
            rng.gen_range(q_lo..=q_hi)
        } else {
            rng.gen_range(p_lo..=p_hi)
        }
    })
}

/// Overwrite flows of branches that request a warm start.
///
/// Returns how many flows were overridden.
pub fn apply_warm_start(problem: &NetworkProblem<'_>, x: &mut DVector<f64>) -> usize {
    let mut count = 0;
    for (j, branch) in problem.branches().iter().enumerate() {
        if let Some(flow) = branch.warm_start_flow() {
            x[j] = flow;
            count += 1;
        }
    }
    count
}

/// Sampled guess with warm-start overrides applied.
pub fn initial_guess<R: Rng + ?Sized>(
    problem: &NetworkProblem<'_>,
    config: &SolverConfig,
    rng: &mut R,
) -> DVector<f64> {
    let mut x = sample_initial_guess(problem, config, rng);
    apply_warm_start(problem, &mut x);
    x
}
