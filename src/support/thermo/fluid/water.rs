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

/// Normal boiling point, K, at [`ATMOSPHERE`].
const NORMAL_BOILING_POINT: f64 = 373.15;

/// Standard atmosphere, Pa.
const ATMOSPHERE: f64 = 101_325.0;

/// Critical pressure, Pa. Supercritical states are not modeled.
const CRITICAL_PRESSURE: f64 = 22.064e6;

/// Melting point, K.
const MELTING_POINT: f64 = 273.15;

/// Highest temperature accepted for vapor states, K.
const MAX_TEMPERATURE: f64 = 1073.15;

/// Latent heat of vaporization at the normal boiling point, J/kg.
const LATENT_HEAT: f64 = 2.257e6;

/// Specific gas constant of steam, J/(kg·K).
const STEAM_GAS_CONSTANT: f64 = 461.52;

/// Constant-pressure specific heat of superheated steam, J/(kg·K).
const STEAM_CP: f64 = 2080.0;

/// Water, liquid or superheated vapor.
///
/// Liquid states use smooth fits intended for 0 °C to 150 °C:
///
/// - density from the Thiesen equation,
/// - `cp = 4178 + 0.009·(t − 35)²` J/(kg·K) with `t` in °C,
/// - enthalpy as the exact integral of `cp` from 0 °C.
///
/// The saturation temperature follows a Clausius-Clapeyron curve through the
/// normal boiling point. Above it the state is steam, treated as a perfect gas
/// whose enthalpy continues from the saturated liquid plus the latent heat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

impl Water {
    /// Saturation temperature at `pressure`, in kelvin.
    #[must_use]
    pub fn saturation_temperature(pressure: Pressure) -> f64 {
        let ln_ratio = (pressure.get::<pascal>() / ATMOSPHERE).ln();
        1.0 / (1.0 / NORMAL_BOILING_POINT - ln_ratio * STEAM_GAS_CONSTANT / LATENT_HEAT)
    }

    fn liquid_density(t: f64) -> f64 {
        1000.0 * (1.0 - (t + 288.9414) / (508_929.2 * (t + 68.129_63)) * (t - 3.9863).powi(2))
    }

    fn liquid_cp(t: f64) -> f64 {
        4178.0 + 0.009 * (t - 35.0).powi(2)
    }

    fn liquid_enthalpy(t: f64) -> f64 {
        4178.0 * t + 0.003 * ((t - 35.0).powi(3) + 35.0_f64.powi(3))
    }
}

impl ReferenceFluid for Water {
    const NAME: &'static str = "Water";

    fn properties(
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Properties, PropertyError> {
        positive_pressure(Self::NAME, pressure)?;

        let p = pressure.get::<pascal>();
        if p >= CRITICAL_PRESSURE {
            return Err(PropertyError::OutOfDomain {
                context: format!("Water: supercritical pressure {p} Pa"),
            });
        }

        let t_kelvin = temperature.get::<kelvin>();
        if !(MELTING_POINT..=MAX_TEMPERATURE).contains(&t_kelvin) {
            return Err(PropertyError::OutOfDomain {
                context: format!(
                    "Water: temperature {t_kelvin} K outside [{MELTING_POINT}, {MAX_TEMPERATURE}] K"
                ),
            });
        }

        let t_sat = Self::saturation_temperature(pressure);
        let t = temperature.get::<degree_celsius>();

        let (density, cp, enthalpy, phase) = if t_kelvin <= t_sat {
            (
                Self::liquid_density(t),
                Self::liquid_cp(t),
                Self::liquid_enthalpy(t),
                Phase::Liquid,
            )
        } else {
            let h_sat = Self::liquid_enthalpy(t_sat - MELTING_POINT);
            (
                p / (STEAM_GAS_CONSTANT * t_kelvin),
                STEAM_CP,
                h_sat + LATENT_HEAT + STEAM_CP * (t_kelvin - t_sat),
                Phase::Gas,
            )
        };

        Ok(Properties {
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(cp),
            enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(enthalpy),
            phase,
        })
    }
}
