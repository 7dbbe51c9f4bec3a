//! Fluid properties as seen by the exchanger network.
//!
//! The network never evaluates thermophysical properties itself. It talks to a
//! [`PropertyBackend`] through a small read/write contract: build a state from
//! a substance name, pressure and temperature, read density, specific heat,
//! enthalpy and phase, and update temperature or pressure. [`FluidState`] is
//! the value type carrying one such state.
//!
//! [`ReferenceBackend`] implements the contract for a handful of fluids with
//! closed-form correlations so the network can be exercised without an
//! external property library.

mod error;
mod fluid_state;

pub mod backend;
pub mod fluid;

pub use backend::{Phase, Properties, PropertyBackend, ReferenceBackend};
pub use error::PropertyError;
pub use fluid_state::{FluidState, Update};
