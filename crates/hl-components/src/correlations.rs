//! Pressure-change correlations.
//!
//! All functions take SI values and return a non-negative pressure magnitude
//! in Pa, except `pump_rise`, which may go negative past the end of the pump
//! curve. Out-of-range inputs are clamped, never rejected:
//! - reverse flow through a pump or valve is evaluated as zero flow
//! - a non-positive valve Cv is floored to `CV_FLOOR`

use std::f64::consts::PI;

/// Manufacturer Cv curve: coefficients of `travel^1 .. travel^6`.
pub const VALVE_CV_COEFFS: [f64; 6] = [
    -0.264_782_13,
    3.908_621_64,
    -6.444_913_41,
    7.457_528_13,
    -5.002_646_94,
    1.346_235_55,
];

/// Scale applied to the Cv polynomial.
pub const VALVE_CV_SCALE: f64 = 2518.2;

/// Valve loss constant relating `Q^2 / Cv^2` to head.
pub const VALVE_LOSS_K: f64 = 1.765_738_532_11e8;

/// Smallest Cv used in the valve loss law.
pub const CV_FLOOR: f64 = 1e-6;

/// Pump curve: shutoff head coefficient.
pub const PUMP_SHUTOFF_COEFF: f64 = 81.0;

/// Pump curve: quadratic flow coefficient.
pub const PUMP_FLOW_COEFF: f64 = 2200.0;

/// Darcy-Weisbach loss for fully turbulent flow, written in volumetric flow.
///
/// `dp = 4 f L Q^2 rho / (pi^2 D^5)`
pub fn pipe_drop(q: f64, friction_factor: f64, length: f64, diameter: f64, rho: f64) -> f64 {
    4.0 * friction_factor * length * q * q / (PI * PI * diameter.powi(5)) * rho
}

/// Pump pressure rise for the flow through one pump at speed fraction `speed`.
///
/// `dp = (81 N^1.5 - 2200 N Q^2) rho g`, with `Q` clamped to `>= 0`.
pub fn pump_rise(q: f64, speed: f64, rho: f64, g: f64) -> f64 {
    let q = q.max(0.0);
    (PUMP_SHUTOFF_COEFF * speed.powf(1.5) - PUMP_FLOW_COEFF * speed * q * q) * rho * g
}

/// Valve flow coefficient for a travel fraction. Not floored.
pub fn valve_cv(travel: f64) -> f64 {
    let mut power = travel;
    let mut sum = 0.0;
    for c in VALVE_CV_COEFFS {
        sum += c * power;
        power *= travel;
    }
    sum * VALVE_CV_SCALE
}

/// Control valve pressure loss.
///
/// `dp = Q^2 K / Cv^2 rho g`, with `Q` clamped to `>= 0` and `Cv` floored.
pub fn valve_drop(q: f64, travel: f64, rho: f64, g: f64) -> f64 {
    let cv = valve_cv(travel).max(CV_FLOOR);
    let q = q.max(0.0);
    q * q * VALVE_LOSS_K / (cv * cv) * rho * g
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pipe_drop_monotone_in_flow_squared(a in -2.0_f64..2.0, b in -2.0_f64..2.0) {
            let (lo, hi) = if a * a <= b * b { (a, b) } else { (b, a) };
            prop_assert!(pipe_drop(lo, 0.02, 100.0, 0.1, 1000.0) <= pipe_drop(hi, 0.02, 100.0, 0.1, 1000.0));
        }

        #[test]
        fn pump_rise_falls_with_forward_flow(a in 0.0_f64..2.0, b in 0.0_f64..2.0, speed in 0.0_f64..1.2) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(pump_rise(hi, speed, 1000.0, 9.81) <= pump_rise(lo, speed, 1000.0, 9.81));
        }

        #[test]
        fn valve_drop_monotone_in_forward_flow(a in 0.0_f64..2.0, b in 0.0_f64..2.0, travel in 0.0_f64..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(valve_drop(lo, travel, 1000.0, 9.81) <= valve_drop(hi, travel, 1000.0, 9.81));
        }

        #[test]
        fn valve_drop_never_divides_by_zero(q in -1.0_f64..1.0, travel in -0.5_f64..1.5) {
            prop_assert!(valve_drop(q, travel, 1000.0, 9.81).is_finite());
        }
    }
}
