//! Steady-state solver for closed hydraulic loops.
//!
//! Unknowns are one volumetric flow per branch and one pressure per node.
//! The residual stacks node mass balances on top of branch momentum balances
//! (`[A q ; A^T p - dp(q)]`); a damped Newton root finder drives it to zero
//! from randomly sampled starting points, retrying a bounded number of times.

pub mod config;
pub mod error;
pub mod initialization;
pub mod jacobian;
pub mod newton;
pub mod problem;
pub mod root_finder;
pub mod solve;
pub mod steady;

pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, newton_solve};
pub use problem::NetworkProblem;
pub use root_finder::{DampedNewton, ResidualFn, RootFinder, RootReport};
pub use solve::{SolveState, SteadyStateSolver};
pub use steady::SteadySolution;
