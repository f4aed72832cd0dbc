//! Thresholds shared by the branch models.

/// Valve travel below which a control valve is treated as closed.
pub const NEAR_ZERO_TRAVEL: f64 = 1e-6;

/// Pump speed fraction below which a pump is treated as stopped.
pub const NEAR_ZERO_SPEED: f64 = 1e-6;

/// Starting flow for a stopped pump (m^3/s).
pub const NEGLIGIBLE_FLOW: f64 = 1e-9;
