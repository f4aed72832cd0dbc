//! Signed node/branch incidence matrix.
//!
//! Row `i` is node `i`, column `j` is branch `j`. The entry is `+1` when the
//! branch enters the node (its `to` endpoint), `-1` when it leaves (its `from`
//! endpoint) and `0` otherwise. A self-loop therefore has an all-zero column.
//!
//! `A q` gives the net inflow at every node; `A^T p` gives `p_to - p_from`
//! for every branch.

use nalgebra::{DMatrix, DVector};

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceMatrix {
    matrix: DMatrix<f64>,
}

impl IncidenceMatrix {
    /// Assemble the matrix from node and branch order.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut matrix = DMatrix::zeros(graph.nodes().len(), graph.branches().len());
        for branch in graph.branches() {
            let j = branch.id.slot();
            if branch.is_self_loop() {
                continue;
            }
            matrix[(branch.to.slot(), j)] = 1.0;
            matrix[(branch.from.slot(), j)] = -1.0;
        }
        Self { matrix }
    }

    /// Number of nodes (rows).
    pub fn node_count(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of branches (columns).
    pub fn branch_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Entry for node row `node` and branch column `branch`.
    pub fn entry(&self, node: usize, branch: usize) -> f64 {
        self.matrix[(node, branch)]
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Net inflow at every node for the given branch flows.
    pub fn apply(&self, flows: &DVector<f64>) -> GraphResult<DVector<f64>> {
        check_len("branch flows", self.branch_count(), flows.len())?;
        Ok(&self.matrix * flows)
    }

    /// Pressure difference `p_to - p_from` along every branch.
    pub fn apply_transpose(&self, pressures: &DVector<f64>) -> GraphResult<DVector<f64>> {
        check_len("node pressures", self.node_count(), pressures.len())?;
        Ok(self.matrix.tr_mul(pressures))
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> GraphResult<()> {
    if expected != actual {
        return Err(GraphError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    fn triangle() -> Graph {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("A");
        let b = builder.add_node("B");
        let c = builder.add_node("C");
        builder.add_branch("AB", a, b);
        builder.add_branch("BC", b, c);
        builder.add_branch("CA", c, a);
        builder.build().unwrap()
    }

    #[test]
    fn signs_follow_branch_direction() {
        let inc = IncidenceMatrix::from_graph(&triangle());
        assert_eq!(inc.node_count(), 3);
        assert_eq!(inc.branch_count(), 3);
        // AB leaves A, enters B
        assert_eq!(inc.entry(0, 0), -1.0);
        assert_eq!(inc.entry(1, 0), 1.0);
        assert_eq!(inc.entry(2, 0), 0.0);
    }

    #[test]
    fn every_column_sums_to_zero() {
        let inc = IncidenceMatrix::from_graph(&triangle());
        for j in 0..inc.branch_count() {
            let sum: f64 = inc.matrix().column(j).iter().sum();
            assert_eq!(sum, 0.0);
        }
    }

    #[test]
    fn uniform_loop_flow_is_conserved() {
        let inc = IncidenceMatrix::from_graph(&triangle());
        let q = DVector::from_element(3, 0.25);
        let net = inc.apply(&q).unwrap();
        assert!(net.iter().all(|v| v.abs() < 1e-15));
    }

    #[test]
    fn transpose_gives_pressure_differences() {
        let inc = IncidenceMatrix::from_graph(&triangle());
        let p = DVector::from_vec(vec![100.0, 70.0, 40.0]);
        let dp = inc.apply_transpose(&p).unwrap();
        assert_eq!(dp.as_slice(), &[-30.0, -30.0, 60.0]);
    }

    #[test]
    fn self_loop_column_is_zero() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node("A");
        builder.add_branch("Recirc", a, a);
        let inc = IncidenceMatrix::from_graph(&builder.build().unwrap());
        assert_eq!(inc.entry(0, 0), 0.0);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let inc = IncidenceMatrix::from_graph(&triangle());
        let q = DVector::from_element(2, 1.0);
        assert!(matches!(
            inc.apply(&q),
            Err(GraphError::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
    }
}
