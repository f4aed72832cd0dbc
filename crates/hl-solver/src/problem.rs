//! Residual function for the steady-state loop.
//!
//! State vector layout: `[q_0 .. q_{b-1}, p_0 .. p_{n-1}]`, one volumetric
//! flow per branch followed by one pressure per node, both in input order.
//! The residual is `[A q ; A^T p - dp(q)]`: node mass balances first, then
//! one momentum balance per branch.

use hl_components::{Branch, Node, PressureChange};
use hl_graph::IncidenceMatrix;
use nalgebra::DVector;

use crate::error::{SolverError, SolverResult};

/// Assembled network ready for residual evaluation.
///
/// Borrows the entities and incidence matrix; holds no mutable state, so
/// repeated residual calls on the same state give identical results.
#[derive(Debug, Clone)]
pub struct NetworkProblem<'a> {
    incidence: &'a IncidenceMatrix,
    branches: &'a [Branch],
    fixed_pressures: Vec<Option<f64>>,
    allow_reverse_flow: bool,
}

impl<'a> NetworkProblem<'a> {
    pub fn new(
        incidence: &'a IncidenceMatrix,
        nodes: &[Node],
        branches: &'a [Branch],
        allow_reverse_flow: bool,
    ) -> SolverResult<Self> {
        if incidence.node_count() != nodes.len() || incidence.branch_count() != branches.len() {
            return Err(SolverError::ProblemSetup {
                what: format!(
                    "incidence matrix is {}x{} but the network has {} nodes and {} branches",
                    incidence.node_count(),
                    incidence.branch_count(),
                    nodes.len(),
                    branches.len()
                ),
            });
        }

        Ok(Self {
            incidence,
            branches,
            fixed_pressures: nodes.iter().map(Node::fixed_pressure).collect(),
            allow_reverse_flow,
        })
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn node_count(&self) -> usize {
        self.fixed_pressures.len()
    }

    pub fn state_len(&self) -> usize {
        self.branch_count() + self.node_count()
    }

    pub fn branches(&self) -> &[Branch] {
        self.branches
    }

    pub fn allow_reverse_flow(&self) -> bool {
        self.allow_reverse_flow
    }

    /// Per-variable lower bounds for the root finder.
    ///
    /// Flows are bounded below by zero when reverse flow is disallowed;
    /// everything else is unbounded.
    pub fn lower_bounds(&self) -> DVector<f64> {
        let flow_floor = if self.allow_reverse_flow {
            f64::NEG_INFINITY
        } else {
            0.0
        };
        DVector::from_fn(self.state_len(), |i, _| {
            if i < self.branch_count() {
                flow_floor
            } else {
                f64::NEG_INFINITY
            }
        })
    }

    /// Split a state into the flows and pressures the residual evaluates.
    ///
    /// Flows are clamped to `>= 0` unless reverse flow is allowed. Reference
    /// pressures are overwritten with their fixed values. The input is not
    /// modified.
    pub fn split(&self, x: &DVector<f64>) -> SolverResult<(DVector<f64>, DVector<f64>)> {
        if x.len() != self.state_len() {
            return Err(SolverError::InvalidState {
                what: format!(
                    "state has {} entries, expected {} ({} flows + {} pressures)",
                    x.len(),
                    self.state_len(),
                    self.branch_count(),
                    self.node_count()
                ),
            });
        }

        let mut flows = x.rows(0, self.branch_count()).into_owned();
        if !self.allow_reverse_flow {
            flows.apply(|q| *q = q.max(0.0));
        }

        let mut pressures = x.rows(self.branch_count(), self.node_count()).into_owned();
        for (p, fixed) in pressures.iter_mut().zip(&self.fixed_pressures) {
            if let Some(value) = fixed {
                *p = *value;
            }
        }

        Ok((flows, pressures))
    }

    /// Evaluate the residual at `x`.
    pub fn residual(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let (flows, pressures) = self.split(x)?;

        let mass_balance = self.incidence.apply(&flows)?;
        let potential = self.incidence.apply_transpose(&pressures)?;

        let n = self.node_count();
        let mut r = DVector::zeros(self.state_len());
        r.rows_mut(0, n).copy_from(&mass_balance);
        for (j, branch) in self.branches.iter().enumerate() {
            r[n + j] = potential[j] - branch.pressure_change(flows[j]);
        }
        Ok(r)
    }
}
