//! Steady-state driver: sampled starts, warm start and bounded retries.

use nalgebra::DVector;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::initialization::initial_guess;
use crate::problem::NetworkProblem;
use crate::root_finder::{DampedNewton, RootFinder};
use crate::steady::SteadySolution;

/// Driver lifecycle, reported through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    Unsolved,
    Attempting { attempt: usize },
    Retrying { failed_attempt: usize },
    Converged { attempt: usize },
    Failed { attempts: usize },
}

impl SolveState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SolveState::Converged { .. } | SolveState::Failed { .. })
    }
}

fn enter(state: SolveState) {
    debug!(?state, terminal = state.is_terminal(), "solver state");
}

/// Finds the steady state of a `NetworkProblem`.
///
/// Each attempt starts from a fresh random guess; exactly
/// `config.max_retries` attempts are made before giving up.
#[derive(Debug, Clone)]
pub struct SteadyStateSolver<F: RootFinder = DampedNewton> {
    config: SolverConfig,
    root_finder: F,
}

impl SteadyStateSolver<DampedNewton> {
    pub fn new(config: SolverConfig) -> Self {
        let root_finder = DampedNewton::new(config.newton.clone());
        Self {
            config,
            root_finder,
        }
    }
}

impl<F: RootFinder> SteadyStateSolver<F> {
    pub fn with_root_finder(config: SolverConfig, root_finder: F) -> Self {
        Self {
            config,
            root_finder,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn root_finder(&self) -> &F {
        &self.root_finder
    }

    pub fn solve<R: Rng + ?Sized>(
        &self,
        problem: &NetworkProblem<'_>,
        rng: &mut R,
    ) -> SolverResult<SteadySolution> {
        self.config.validate()?;
        if problem.allow_reverse_flow() != self.config.allow_reverse_flow {
            return Err(SolverError::ProblemSetup {
                what: "problem and solver disagree on allow_reverse_flow".to_string(),
            });
        }

        let max_retries = self.config.max_retries;
        let lower_bounds = problem.lower_bounds();
        let residual = |x: &DVector<f64>| problem.residual(x);
        enter(SolveState::Unsolved);
        let mut last_message = String::new();

        for attempt in 1..=max_retries {
            enter(SolveState::Attempting { attempt });
            let x0 = initial_guess(problem, &self.config, rng);
            let report = self.root_finder.find_root(&residual, x0, &lower_bounds)?;

            debug!(
                attempt,
                iterations = report.iterations,
                evaluations = report.evaluations,
                residual_norm = report.residual_norm,
                "root finder finished"
            );

            if report.converged {
                enter(SolveState::Converged { attempt });
                info!(
                    attempt,
                    iterations = report.iterations,
                    residual_norm = report.residual_norm,
                    "steady state converged"
                );
                return SteadySolution::from_report(problem, report, attempt);
            }

            warn!(
                attempt,
                max_retries,
                reason = %report.message,
                "steady-state attempt failed"
            );
            last_message = report.message;
            if attempt < max_retries {
                enter(SolveState::Retrying {
                    failed_attempt: attempt,
                });
            }
        }

        enter(SolveState::Failed {
            attempts: max_retries,
        });
        Err(SolverError::Convergence {
            attempts: max_retries,
            message: last_message,
        })
    }
}
