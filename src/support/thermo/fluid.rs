//! Fluids known to the [`ReferenceBackend`](super::ReferenceBackend).
//!
//! Each fluid is a unit-like type naming a substance and carrying the
//! closed-form correlations used to evaluate its properties.

mod air;
mod water;

use uom::si::f64::{Pressure, ThermodynamicTemperature};

use super::{Properties, PropertyError};

pub use air::Air;
pub use water::Water;

/// A substance with closed-form property correlations.
pub trait ReferenceFluid {
    /// Substance name used to look the fluid up.
    const NAME: &'static str;

    /// Evaluates the fluid's properties at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfDomain`] outside the correlations' valid region.
    fn properties(
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Properties, PropertyError>;
}

fn positive_pressure(name: &str, pressure: Pressure) -> Result<(), PropertyError> {
    if pressure.value > 0.0 && pressure.value.is_finite() {
        Ok(())
    } else {
        Err(PropertyError::OutOfDomain {
            context: format!("{name}: pressure must be positive, got {pressure:?}"),
        })
    }
}
