//! Property backend contract.

mod reference;

use std::fmt;

use uom::si::f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature};

use crate::support::units::SpecificEnthalpy;

use super::PropertyError;

pub use reference::ReferenceBackend;

/// Phase tag reported alongside the properties of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    Gas,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquid => f.write_str("liquid"),
            Self::Gas => f.write_str("gas"),
        }
    }
}

/// Properties derived for one (substance, pressure, temperature) state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Properties {
    pub density: MassDensity,
    pub cp: SpecificHeatCapacity,
    pub enthalpy: SpecificEnthalpy,
    pub phase: Phase,
}

/// A source of thermophysical properties.
///
/// Implementations are stateless from the network's point of view: the same
/// inputs always produce the same properties, so a single backend can be
/// shared by every [`FluidState`](super::FluidState) in a network.
///
/// Units are carried by the [`uom`] quantity types, so an implementation
/// wrapping a library with its own unit system converts at this boundary.
pub trait PropertyBackend: fmt::Debug + Send + Sync {
    /// Evaluates the properties of `substance` at the given pressure and temperature.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::UnknownSubstance`] for a name the backend does
    /// not recognize and [`PropertyError::OutOfDomain`] for a state outside the
    /// substance's valid region.
    fn properties(
        &self,
        substance: &str,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Properties, PropertyError>;
}
