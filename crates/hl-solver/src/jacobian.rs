//! Finite difference Jacobian computation.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

/// Step used to perturb component `x_j`.
///
/// Relative to `|x_j|`, falling back to `epsilon` itself when `x_j == 0`.
pub fn fd_step(x_j: f64, epsilon: f64) -> f64 {
    let h = epsilon * x_j.abs();
    if h == 0.0 { epsilon } else { h }
}

/// Compute Jacobian using forward finite differences.
///
/// `f_x` must be `f(x)`; it is passed in so the caller's evaluation is reused.
/// For each column j, perturbs x[j] by `fd_step` and computes
/// (f(x+h) - f(x))/h.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let n = x.len();
    let m = f_x.len();
    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        if !x[j].is_finite() {
            return Err(SolverError::Numeric {
                what: format!("state component {j} is {}", x[j]),
            });
        }
        let h = fd_step(x[j], epsilon);
        let mut x_perturbed = x.clone();
        x_perturbed[j] += h;
        // Use the step actually taken after rounding.
        let h = x_perturbed[j] - x[j];

        let f_perturbed = f(&x_perturbed)?;
        let df = (f_perturbed - f_x) / h;
        jac.set_column(j, &df);
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };
        let x = DVector::from_element(1, 3.0);
        let jac = finite_difference_jacobian(&x, &f(&x).unwrap(), &f, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_quadratic() {
        // f(x) = x^2, J = 2*x
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0]))
        };
        let x = DVector::from_element(1, 3.0);
        let jac = finite_difference_jacobian(&x, &f(&x).unwrap(), &f, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn step_scales_with_magnitude() {
        assert_eq!(fd_step(0.0, 1e-8), 1e-8);
        assert_eq!(fd_step(-2.0e5, 1e-8), 2.0e-3);
        assert!(fd_step(1e-9, 1e-8) < 1e-16);
    }

    #[test]
    fn tiny_components_get_tiny_steps() {
        // f(x) = 1e12 x^2 near x = 1e-6: an absolute step of 1e-8 would be too coarse.
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 1e12 * x[0] * x[0]))
        };
        let x = DVector::from_element(1, 1e-6);
        let jac = finite_difference_jacobian(&x, &f(&x).unwrap(), &f, 1.4901161193847656e-8)
            .unwrap();
        assert!((jac[(0, 0)] - 2e6).abs() < 1.0);
    }

    #[test]
    fn non_finite_state_is_an_error() {
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> { Ok(x.clone()) };
        let x = DVector::from_vec(vec![1.0, f64::NAN]);
        let f_x = DVector::from_vec(vec![1.0, 0.0]);
        assert!(matches!(
            finite_difference_jacobian(&x, &f_x, &f, 1e-7),
            Err(SolverError::Numeric { .. })
        ));
    }
}
