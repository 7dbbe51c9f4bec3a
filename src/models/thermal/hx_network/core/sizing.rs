//! Sizing a network for a target stream 1 outlet temperature.
//!
//! The total conductance is found by bisection: each trial rebuilds the grid
//! with the candidate UA, runs the configured adjustment passes and compares
//! the solved stream 1 outlet with the target.

mod config;
mod error;
mod problem;

pub use config::SizingConfig;
pub use error::SizingError;

use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, ThermalConductance, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermal_conductance::watt_per_kelvin,
};

use super::HxNetwork;

use problem::{SizingModel, SizingProblem};

/// A network rebuilt and solved at the conductance found by sizing.
#[derive(Debug, Clone)]
pub struct SizedNetwork {
    pub network: HxNetwork,
    /// Outlets solved from the final cell states.
    pub outlets: [ThermodynamicTemperature; 2],
}

impl HxNetwork {
    /// Finds the total conductance within `bracket` that brings stream 1's
    /// outlet to `target`.
    ///
    /// Shape, cell kind, orders and inputs are taken from `self`, which is
    /// left untouched.
    ///
    /// The outlet need not be monotonic in UA. Arrangements with mixed flow
    /// directions reach a minimum outlet at some conductance and warm up
    /// again beyond it, so `bracket` must enclose exactly one crossing of
    /// the target.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Bisection`] if the outlets at both ends of the
    /// bracket lie on the same side of the target, [`SizingError::Network`]
    /// if no trial succeeds, or [`SizingError::MaxIters`] when the iteration
    /// limit is reached.
    pub fn size_for_outlet(
        &self,
        target: ThermodynamicTemperature,
        bracket: [ThermalConductance; 2],
        config: SizingConfig,
    ) -> Result<SizedNetwork, SizingError> {
        let model = SizingModel::new(self, config.passes);
        let problem = SizingProblem::new(target);

        let solution = bisection::solve(
            &model,
            &problem,
            bracket.map(|ua| ua.get::<watt_per_kelvin>()),
            &config.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                // A failed trial usually means a conductance too small to
                // evaluate, so steer towards larger values.
                if event.result().is_err() {
                    return Some(bisection::Action::assume_positive());
                }
                None
            },
        )?;

        if solution.status != bisection::Status::Converged {
            return Err(SizingError::MaxIters {
                residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
                iters: solution.iters,
            });
        }

        tracing::debug!(
            total_ua_w_per_k = solution.x,
            iters = solution.iters,
            "sized network"
        );
        Ok(solution.snapshot.output)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::kelvin;

    use super::super::{Iterations, NetworkError, test_support::scenario};
    use super::*;

    fn bracket(high: f64) -> [ThermalConductance; 2] {
        [100., high].map(ThermalConductance::new::<watt_per_kelvin>)
    }

    #[test]
    fn recovers_known_conductance() -> Result<(), Box<dyn std::error::Error>> {
        let network = scenario()?;
        let target = network.solve()?.outlets[0];
        let config = SizingConfig {
            passes: Iterations::Fixed(0),
            ..SizingConfig::default()
        };

        let sized = network.size_for_outlet(target, bracket(8000.), config)?;

        assert_relative_eq!(
            sized.network.total_ua().ua().get::<watt_per_kelvin>(),
            4000.,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            sized.outlets[0].get::<kelvin>(),
            target.get::<kelvin>(),
            epsilon = 1e-6
        );
        assert_relative_eq!(network.total_ua().ua().get::<watt_per_kelvin>(), 4000.);
        Ok(())
    }

    #[test]
    fn adjusted_sizing_hits_target() -> Result<(), Box<dyn std::error::Error>> {
        let network = scenario()?;
        let target = ThermodynamicTemperature::new::<kelvin>(340.);

        let sized = network.size_for_outlet(target, bracket(8000.), SizingConfig::default())?;

        assert_relative_eq!(sized.outlets[0].get::<kelvin>(), 340., epsilon = 1e-6);
        assert!(!sized.network.trajectory().is_empty());
        Ok(())
    }

    #[test]
    fn iteration_limit() -> Result<(), NetworkError> {
        let network = scenario()?;
        let config = SizingConfig {
            max_iters: 3,
            ..SizingConfig::default()
        };
        let result = network.size_for_outlet(
            ThermodynamicTemperature::new::<kelvin>(340.),
            bracket(8000.),
            config,
        );
        assert!(matches!(result, Err(SizingError::MaxIters { .. })));
        Ok(())
    }

    #[test]
    fn bracket_past_the_minimum_outlet() -> Result<(), NetworkError> {
        // Stream 1 leaves coldest near 10 kW/K and warms again above it, so
        // both ends of this bracket sit above the 4 kW/K outlet.
        let network = scenario()?;
        let target = network.solve()?.outlets[0];
        let config = SizingConfig {
            passes: Iterations::Fixed(0),
            ..SizingConfig::default()
        };

        let result = network.size_for_outlet(target, bracket(50_000.), config);
        assert!(matches!(result, Err(SizingError::Bisection(_))));
        Ok(())
    }
}
