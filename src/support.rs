//! Supporting utilities used by the network model.
//!
//! - [`constraint`]: construction-time numeric invariants.
//! - [`hx`]: per-stream effectiveness relations and stream state for a single
//!   two-stream exchanger cell.
//! - [`thermo`]: the property backend contract and fluid states.
//! - [`units`]: quantities and helpers missing from [`uom`].

pub mod constraint;
pub mod hx;
pub mod thermo;
pub mod units;
