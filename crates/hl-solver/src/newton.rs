//! Damped Newton solver with bound projection.
//!
//! Each iteration:
//! 1. forward-difference Jacobian (`jacobian.rs`)
//! 2. row then column equilibration of the Jacobian
//! 3. SVD pseudo-inverse solve, dropping singular values below
//!    `svd_cutoff * sigma_max`
//! 4. backtracking line search on the row-scaled residual 2-norm, each
//!    trial point projected onto the lower bounds
//!
//! Convergence is judged on the unscaled residual infinity norm.

use std::cell::Cell;

use hl_core::max_abs;
use nalgebra::{DMatrix, DVector, SVD};
use tracing::trace;

use crate::error::{SolverError, SolverResult};
use crate::jacobian::finite_difference_jacobian;
use crate::root_finder::RootReport;

/// Sweep limit for the SVD; reaching it counts as a failed decomposition.
const SVD_MAX_SWEEPS: usize = 10_000;

/// Newton solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Maximum residual evaluations, Jacobian columns and line search
    /// trials included
    pub max_evaluations: usize,
    /// Absolute tolerance on the residual infinity norm
    pub abs_tol: f64,
    /// Relative finite-difference step
    pub fd_epsilon: f64,
    /// Relative singular value cutoff
    pub svd_cutoff: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            max_evaluations: 1_000_000,
            abs_tol: 1e-6,
            fd_epsilon: f64::EPSILON.sqrt(),
            svd_cutoff: 1e-12,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Search direction in original variables plus the row scaling that
/// defines the line search merit.
struct ScaledStep {
    dx: DVector<f64>,
    row_scale: DVector<f64>,
}

/// Newton solver with line search and lower-bound projection.
pub fn newton_solve<F>(
    x0: DVector<f64>,
    residual_fn: F,
    lower_bounds: &DVector<f64>,
    config: &NewtonConfig,
) -> SolverResult<RootReport>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    if lower_bounds.len() != x0.len() {
        return Err(SolverError::ProblemSetup {
            what: format!(
                "{} lower bounds for {} unknowns",
                lower_bounds.len(),
                x0.len()
            ),
        });
    }

    let evaluations = Cell::new(0_usize);
    let eval = |x: &DVector<f64>| {
        evaluations.set(evaluations.get() + 1);
        residual_fn(x)
    };

    let mut x = project(x0, lower_bounds);
    let mut r = eval(&x)?;
    let mut iterations = 0;

    loop {
        let r_norm = max_abs(r.as_slice());
        let finish = |x: DVector<f64>, converged: bool, message: String| RootReport {
            x,
            residual_norm: r_norm,
            iterations,
            evaluations: evaluations.get(),
            converged,
            message,
        };

        if r_norm <= config.abs_tol {
            return Ok(finish(x, true, "converged".to_string()));
        }
        if !r_norm.is_finite() {
            return Ok(finish(
                x,
                false,
                format!("residual is not finite at iteration {iterations}"),
            ));
        }
        if iterations >= config.max_iterations {
            return Ok(finish(
                x,
                false,
                format!(
                    "maximum iterations ({}) reached, residual = {r_norm:e}",
                    config.max_iterations
                ),
            ));
        }
        // One Jacobian plus at least one line search trial must fit.
        if evaluations.get() + x.len() >= config.max_evaluations {
            return Ok(finish(
                x,
                false,
                format!(
                    "evaluation budget ({}) exhausted, residual = {r_norm:e}",
                    config.max_evaluations
                ),
            ));
        }

        let jac = finite_difference_jacobian(&x, &r, &eval, config.fd_epsilon)?;
        let step = match equilibrated_step(jac, &r, config.svd_cutoff) {
            Ok(step) => step,
            Err(reason) => {
                return Ok(finish(
                    x,
                    false,
                    format!("{reason} at iteration {iterations}"),
                ));
            }
        };

        let merit = step.row_scale.component_mul(&r).norm();
        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..config.max_line_search_iters {
            if evaluations.get() >= config.max_evaluations {
                break;
            }
            let trial = project(&x + alpha * &step.dx, lower_bounds);
            let r_trial = eval(&trial)?;
            if step.row_scale.component_mul(&r_trial).norm() < merit {
                accepted = Some((trial, r_trial));
                break;
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new)) = accepted else {
            if evaluations.get() >= config.max_evaluations {
                return Ok(finish(
                    x,
                    false,
                    format!(
                        "evaluation budget ({}) exhausted in line search, residual = {r_norm:e}",
                        config.max_evaluations
                    ),
                ));
            }
            return Ok(finish(
                x,
                false,
                format!("line search stalled at iteration {iterations}, residual = {r_norm:e}"),
            ));
        };

        x = x_new;
        r = r_new;
        iterations += 1;
        trace!(
            iteration = iterations,
            alpha,
            residual_norm = max_abs(r.as_slice()),
            "newton step"
        );
    }
}

/// Componentwise `max(x, lower)`.
fn project(x: DVector<f64>, lower_bounds: &DVector<f64>) -> DVector<f64> {
    x.zip_map(lower_bounds, |v, lo| if v < lo { lo } else { v })
}

/// Solve `J dx = -r` on the equilibrated Jacobian `R J C`.
fn equilibrated_step(
    mut jac: DMatrix<f64>,
    r: &DVector<f64>,
    cutoff: f64,
) -> Result<ScaledStep, &'static str> {
    if jac.iter().any(|v| !v.is_finite()) {
        return Err("Jacobian is not finite");
    }

    let (m, n) = jac.shape();
    let row_scale = DVector::from_fn(m, |i, _| inverse_or_one(jac.row(i).amax()));
    for i in 0..m {
        for j in 0..n {
            jac[(i, j)] *= row_scale[i];
        }
    }
    let col_scale = DVector::from_fn(n, |j, _| inverse_or_one(jac.column(j).amax()));
    for j in 0..n {
        for i in 0..m {
            jac[(i, j)] *= col_scale[j];
        }
    }

    let rhs = -row_scale.component_mul(r);
    let svd = SVD::try_new(jac, true, true, f64::EPSILON, SVD_MAX_SWEEPS)
        .ok_or("singular value decomposition did not converge")?;
    let sigma_max = svd.singular_values.max();
    if sigma_max.is_nan() || sigma_max <= 0.0 {
        return Err("Jacobian is zero");
    }
    let dy = svd.solve(&rhs, cutoff * sigma_max)?;

    Ok(ScaledStep {
        dx: dy.component_mul(&col_scale),
        row_scale,
    })
}

fn inverse_or_one(v: f64) -> f64 {
    if v > 0.0 && v.is_finite() { 1.0 / v } else { 1.0 }
}
