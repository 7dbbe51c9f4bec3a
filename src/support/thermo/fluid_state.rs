use std::{fmt, sync::Arc};

use uom::si::{
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    pressure::pascal,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::units::SpecificEnthalpy;

use super::{Phase, Properties, PropertyBackend, PropertyError};

/// Outcome of a temperature or pressure update on a [`FluidState`].
///
/// A rejected update is not fatal: the state keeps its previous value and the
/// backend's reason is handed back.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Applied,
    Reverted(PropertyError),
}

impl Update {
    /// Returns `true` if the requested value was accepted.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// The state of one substance at a given pressure and temperature.
///
/// Derived properties are evaluated by the backend whenever the state changes.
/// Cloning yields an independent state: updating the clone never affects the
/// original.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use twine_hx_network::support::thermo::{FluidState, ReferenceBackend};
/// use uom::si::{
///     f64::{Pressure, ThermodynamicTemperature},
///     pressure::pascal,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let backend = Arc::new(ReferenceBackend);
/// let mut state = FluidState::new(
///     backend,
///     "Water",
///     Pressure::new::<pascal>(101_325.0),
///     ThermodynamicTemperature::new::<kelvin>(293.15),
/// )
/// .unwrap();
///
/// // Ice is outside the backend's valid region: the update is reverted.
/// let update = state.set_temperature(ThermodynamicTemperature::new::<kelvin>(200.0));
/// assert!(!update.is_applied());
/// assert_eq!(state.temperature().get::<kelvin>(), 293.15);
/// ```
#[derive(Clone)]
pub struct FluidState {
    backend: Arc<dyn PropertyBackend>,
    substance: Arc<str>,
    pressure: Pressure,
    temperature: ThermodynamicTemperature,
    properties: Properties,
}

impl FluidState {
    /// Creates a state by evaluating `substance` at the given pressure and temperature.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`PropertyError`] if the substance is unknown or
    /// the state lies outside its valid region.
    pub fn new(
        backend: Arc<dyn PropertyBackend>,
        substance: impl Into<Arc<str>>,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Self, PropertyError> {
        let substance = substance.into();
        let properties = backend.properties(&substance, pressure, temperature)?;
        Ok(Self {
            backend,
            substance,
            pressure,
            temperature,
            properties,
        })
    }

    /// Creates a state of the same substance, sharing this state's backend.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`PropertyError`] if the new state is invalid.
    pub fn at(
        &self,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Self, PropertyError> {
        Self::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.substance),
            pressure,
            temperature,
        )
    }

    #[must_use]
    pub fn substance(&self) -> &str {
        &self.substance
    }

    #[must_use]
    pub fn pressure(&self) -> Pressure {
        self.pressure
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.properties.density
    }

    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        self.properties.cp
    }

    #[must_use]
    pub fn enthalpy(&self) -> SpecificEnthalpy {
        self.properties.enthalpy
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.properties.phase
    }

    /// Moves the state to a new temperature at the current pressure.
    ///
    /// A temperature the backend rejects leaves the state unchanged and logs a
    /// warning.
    pub fn set_temperature(&mut self, temperature: ThermodynamicTemperature) -> Update {
        self.update(self.pressure, temperature)
    }

    /// Moves the state to a new pressure at the current temperature.
    ///
    /// A pressure the backend rejects leaves the state unchanged and logs a
    /// warning.
    pub fn set_pressure(&mut self, pressure: Pressure) -> Update {
        self.update(pressure, self.temperature)
    }

    fn update(&mut self, pressure: Pressure, temperature: ThermodynamicTemperature) -> Update {
        match self
            .backend
            .properties(&self.substance, pressure, temperature)
        {
            Ok(properties) => {
                self.pressure = pressure;
                self.temperature = temperature;
                self.properties = properties;
                Update::Applied
            }
            Err(error) => {
                tracing::warn!(
                    substance = %self.substance,
                    requested_pressure_pa = pressure.get::<pascal>(),
                    requested_temperature_k = temperature.get::<kelvin>(),
                    kept_pressure_pa = self.pressure.get::<pascal>(),
                    kept_temperature_k = self.temperature.get::<kelvin>(),
                    %error,
                    "state update rejected, keeping previous value"
                );
                Update::Reverted(error)
            }
        }
    }
}

impl fmt::Debug for FluidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluidState")
            .field("substance", &self.substance)
            .field("pressure", &self.pressure)
            .field("temperature", &self.temperature)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FluidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: p = {:.0} Pa, t = {:.2} °C ({})",
            self.substance,
            self.pressure.get::<pascal>(),
            self.temperature.get::<degree_celsius>(),
            self.properties.phase,
        )
    }
}
