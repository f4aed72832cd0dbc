//! Core trait for branch laws.

/// Pressure change imposed by a branch as a function of its flow.
///
/// Sign convention: `flow` is volumetric flow in m^3/s, positive in the
/// branch's `from -> to` direction. The return value is the pressure change
/// in Pa along that direction (`p_to - p_from` at steady state): positive for
/// a rise (pump, downhill static leg), negative for a loss.
pub trait PressureChange {
    /// Pressure change in Pa for the given flow.
    fn pressure_change(&self, flow: f64) -> f64;

    /// Optional initial flow overriding a sampled guess.
    ///
    /// Degenerate operating points (closed valve, stopped pump) return a
    /// fixed starting flow so the root finder does not start on a flat or
    /// singular part of the law. Default: no override.
    fn warm_start_flow(&self) -> Option<f64> {
        None
    }
}
