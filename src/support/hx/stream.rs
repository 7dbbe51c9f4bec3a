use thiserror::Error;
use uom::si::{
    f64::{MassRate, Power, Pressure, ThermodynamicTemperature, VolumeRate},
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::ConstraintError,
    thermo::{FluidState, PropertyError, Update},
    units::TemperatureDifference,
};

use super::CapacitanceRate;

/// How much fluid a stream carries.
///
/// Exactly one form is authoritative. The other is derived through the
/// density of the stream's mean state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowRate {
    Mass(MassRate),
    Volume(VolumeRate),
}

/// Errors raised while deriving stream quantities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StreamError {
    #[error("property evaluation failed: {0}")]
    Property(#[from] PropertyError),
    #[error("heat capacity flow not defined: {0}")]
    Capacity(#[from] ConstraintError),
}

/// One fluid stream through a cell or a network: an inlet state, an outlet
/// state and a flow rate.
///
/// The outlet starts as an independent copy of the inlet.
#[derive(Debug, Clone)]
pub struct Stream {
    inlet: FluidState,
    outlet: FluidState,
    flow: FlowRate,
}

impl Stream {
    #[must_use]
    pub fn new(inlet: FluidState, flow: FlowRate) -> Self {
        Self {
            outlet: inlet.clone(),
            inlet,
            flow,
        }
    }

    #[must_use]
    pub fn inlet(&self) -> &FluidState {
        &self.inlet
    }

    #[must_use]
    pub fn outlet(&self) -> &FluidState {
        &self.outlet
    }

    #[must_use]
    pub fn flow(&self) -> FlowRate {
        self.flow
    }

    pub fn set_flow(&mut self, flow: FlowRate) {
        self.flow = flow;
    }

    pub fn set_inlet_temperature(&mut self, temperature: ThermodynamicTemperature) -> Update {
        self.inlet.set_temperature(temperature)
    }

    /// Sets the outlet temperature, warning if the stream changes phase.
    pub fn set_outlet_temperature(&mut self, temperature: ThermodynamicTemperature) -> Update {
        let update = self.outlet.set_temperature(temperature);
        if update.is_applied() && self.phase_change() {
            tracing::warn!(
                substance = self.inlet.substance(),
                inlet_phase = %self.inlet.phase(),
                outlet_phase = %self.outlet.phase(),
                outlet_temperature_k = temperature.get::<kelvin>(),
                "stream changes phase"
            );
        }
        update
    }

    /// Pressure lost between inlet and outlet.
    #[must_use]
    pub fn pressure_drop(&self) -> Pressure {
        self.inlet.pressure() - self.outlet.pressure()
    }

    /// Sets the outlet pressure to the inlet pressure less `drop`.
    pub fn set_pressure_drop(&mut self, drop: Pressure) -> Update {
        self.outlet.set_pressure(self.inlet.pressure() - drop)
    }

    /// `true` when the inlet and outlet are in different phases.
    #[must_use]
    pub fn phase_change(&self) -> bool {
        self.inlet.phase() != self.outlet.phase()
    }

    /// State at the average of inlet and outlet pressure and temperature.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the averaged state is invalid.
    pub fn mean_state(&self) -> Result<FluidState, PropertyError> {
        let pressure = (self.inlet.pressure() + self.outlet.pressure()) * 0.5;
        let temperature = self.inlet.temperature().midpoint(self.outlet.temperature());
        self.inlet.at(pressure, temperature)
    }

    /// Mass flow rate, derived from the mean density for volumetric flows.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the mean state cannot be evaluated.
    pub fn mass_rate(&self) -> Result<MassRate, PropertyError> {
        match self.flow {
            FlowRate::Mass(mass_rate) => Ok(mass_rate),
            FlowRate::Volume(volume_rate) => Ok(volume_rate * self.mean_state()?.density()),
        }
    }

    /// Volumetric flow rate, derived from the mean density for mass flows.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the mean state cannot be evaluated.
    pub fn volume_rate(&self) -> Result<VolumeRate, PropertyError> {
        match self.flow {
            FlowRate::Mass(mass_rate) => Ok(mass_rate / self.mean_state()?.density()),
            FlowRate::Volume(volume_rate) => Ok(volume_rate),
        }
    }

    /// Heat-capacity rate: mass flow times the mean specific heat.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Capacity`] when the rate is not strictly positive,
    /// for instance with zero flow.
    pub fn capacitance_rate(&self) -> Result<CapacitanceRate, StreamError> {
        let mean = self.mean_state()?;
        let mass_rate = match self.flow {
            FlowRate::Mass(mass_rate) => mass_rate,
            FlowRate::Volume(volume_rate) => volume_rate * mean.density(),
        };
        Ok(CapacitanceRate::from_mass_rate_and_specific_heat(
            mass_rate,
            mean.cp(),
        )?)
    }

    /// Heat released by the stream, `m_dot * (h_in - h_out)`.
    ///
    /// Positive when the stream cools down.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the mass rate cannot be derived.
    pub fn heat_rate(&self) -> Result<Power, PropertyError> {
        Ok(self.mass_rate()? * (self.inlet.enthalpy() - self.outlet.enthalpy()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, power::watt, pressure::pascal,
        thermal_conductance::watt_per_kelvin, volume_rate::cubic_meter_per_second,
    };

    use crate::support::thermo::ReferenceBackend;

    use super::*;

    fn water_at(t_kelvin: f64) -> Result<FluidState, PropertyError> {
        FluidState::new(
            Arc::new(ReferenceBackend),
            "Water",
            Pressure::new::<pascal>(101_420.0),
            ThermodynamicTemperature::new::<kelvin>(t_kelvin),
        )
    }

    #[test]
    fn outlet_starts_as_independent_copy() -> Result<(), StreamError> {
        let mut stream = Stream::new(
            water_at(373.15)?,
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(1.0)),
        );
        assert_relative_eq!(stream.heat_rate()?.get::<watt>(), 0.0);

        let _ = stream.set_outlet_temperature(ThermodynamicTemperature::new::<kelvin>(333.15));
        assert_relative_eq!(stream.inlet().temperature().get::<kelvin>(), 373.15);
        assert!(stream.heat_rate()?.get::<watt>() > 0.0);
        Ok(())
    }

    #[test]
    fn heat_rate_matches_capacity_rate() -> Result<(), StreamError> {
        let mut stream = Stream::new(
            water_at(353.15)?,
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(0.8)),
        );
        let _ = stream.set_outlet_temperature(ThermodynamicTemperature::new::<kelvin>(313.15));

        let c = stream.capacitance_rate()?.get::<watt_per_kelvin>();
        assert_relative_eq!(
            stream.heat_rate()?.get::<watt>(),
            c * 40.0,
            max_relative = 1e-3
        );
        Ok(())
    }

    #[test]
    fn volume_and_mass_rates_agree() -> Result<(), StreamError> {
        let inlet = water_at(293.15)?;
        let by_mass = Stream::new(
            inlet.clone(),
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(2.0)),
        );
        let volume_rate = by_mass.volume_rate()?;
        let by_volume = Stream::new(inlet, FlowRate::Volume(volume_rate));

        assert_relative_eq!(
            by_volume.mass_rate()?.get::<kilogram_per_second>(),
            2.0,
            max_relative = 1e-12
        );
        assert!(volume_rate.get::<cubic_meter_per_second>() > 0.0019);
        Ok(())
    }

    #[test]
    fn zero_flow_has_no_capacity_rate() -> Result<(), PropertyError> {
        let stream = Stream::new(
            water_at(293.15)?,
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(0.0)),
        );
        assert!(matches!(
            stream.capacitance_rate(),
            Err(StreamError::Capacity(ConstraintError::Zero))
        ));
        Ok(())
    }

    #[test]
    fn pressure_drop_moves_outlet() -> Result<(), PropertyError> {
        let mut stream = Stream::new(
            water_at(293.15)?,
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(1.0)),
        );

        assert!(stream.set_pressure_drop(Pressure::new::<pascal>(5_000.0)).is_applied());
        assert_relative_eq!(stream.pressure_drop().get::<pascal>(), 5_000.0);
        assert_relative_eq!(stream.outlet().pressure().get::<pascal>(), 96_420.0);

        let update = stream.set_pressure_drop(Pressure::new::<pascal>(200_000.0));
        assert!(!update.is_applied());
        assert_relative_eq!(stream.pressure_drop().get::<pascal>(), 5_000.0);
        Ok(())
    }

    #[test]
    fn boiling_outlet_is_a_phase_change() -> Result<(), PropertyError> {
        let mut stream = Stream::new(
            water_at(363.15)?,
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(1.0)),
        );
        assert!(!stream.phase_change());

        let _ = stream.set_outlet_temperature(ThermodynamicTemperature::new::<kelvin>(393.15));
        assert!(stream.phase_change());
        Ok(())
    }
}
