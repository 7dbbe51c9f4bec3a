use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassDensity, Pressure, SpecificHeatCapacity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use crate::support::{
    thermo::{Phase, Properties, PropertyError},
    units::SpecificEnthalpy,
};

use super::{ReferenceFluid, positive_pressure};

/// Specific gas constant of dry air, J/(kg·K).
const GAS_CONSTANT: f64 = 287.053;

/// Constant-pressure specific heat of dry air, J/(kg·K).
const CP: f64 = 1005.0;

/// Dry air as a calorically perfect gas.
///
/// Density follows `p = ρ·R·T` and enthalpy is `cp·(T − 0 °C)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Air;

impl ReferenceFluid for Air {
    const NAME: &'static str = "Air";

    fn properties(
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Properties, PropertyError> {
        positive_pressure(Self::NAME, pressure)?;

        let t = temperature.get::<kelvin>();
        if !(t > 0.0 && t.is_finite()) {
            return Err(PropertyError::OutOfDomain {
                context: format!("Air: temperature must be positive, got {t} K"),
            });
        }

        Ok(Properties {
            density: MassDensity::new::<kilogram_per_cubic_meter>(
                pressure.get::<pascal>() / (GAS_CONSTANT * t),
            ),
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(CP),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(
                CP * temperature.get::<degree_celsius>(),
            ),
            phase: Phase::Gas,
        })
    }
}
