//! hl-core: stable foundation for hydroloop.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (finiteness and range checks, infinity norm)
//! - ids (stable compact IDs for network objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
