use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, ThermalConductance},
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
};

use crate::models::thermal::hx_network::core::Iterations;

/// Solver configuration for sizing a network.
#[derive(Debug, Clone, Copy)]
pub struct SizingConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the total conductance.
    pub ua_tol: ThermalConductance,

    /// Absolute tolerance on the outlet temperature residual.
    pub temp_tol: TemperatureInterval,

    /// Adjustment passes run for every trial conductance.
    pub passes: Iterations,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            ua_tol: ThermalConductance::new::<watt_per_kelvin>(1e-9),
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            passes: Iterations::Fixed(2),
        }
    }
}

impl SizingConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.ua_tol.get::<watt_per_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: self.temp_tol.get::<delta_kelvin>(),
        }
    }
}
