//! Fixed-point passes between the linear solve and the cell states.

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::TemperatureDifference;

use super::{HxNetwork, StreamId, error::NetworkError};

/// How many adjustment passes to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Iterations {
    /// Exactly this many passes.
    Fixed(usize),
    /// Passes until both outlets move by no more than `tolerance`, at most
    /// `max_passes` of them.
    UntilConverged {
        tolerance: TemperatureInterval,
        max_passes: usize,
    },
}

impl Default for Iterations {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

/// Outcome of [`HxNetwork::adjust`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub passes: usize,
    /// Largest outlet change during the last pass, if there was an earlier
    /// pass to compare with.
    pub last_change: Option<TemperatureInterval>,
}

impl Adjustment {
    /// `true` when the last pass moved the outlets by at most `tolerance`.
    #[must_use]
    pub fn within(&self, tolerance: TemperatureInterval) -> bool {
        self.last_change.is_some_and(|change| change <= tolerance)
    }
}

impl HxNetwork {
    /// Alternates solving and writing the solution back into the cells.
    ///
    /// Each pass records the solved outlets in the trajectory, copies them
    /// into the output streams, sets every cell's outlet temperatures and
    /// feeds each cell's inlets from its upstream neighbour. Zero passes leave
    /// the network untouched.
    ///
    /// # Errors
    ///
    /// Fails while dirty, for an empty grid, or when a solve fails.
    pub fn adjust(&mut self, iterations: Iterations) -> Result<Adjustment, NetworkError> {
        let (tolerance, max_passes) = match iterations {
            Iterations::Fixed(passes) => (None, passes),
            Iterations::UntilConverged {
                tolerance,
                max_passes,
            } => (Some(tolerance), max_passes),
        };

        let mut adjustment = Adjustment {
            passes: 0,
            last_change: None,
        };
        while adjustment.passes < max_passes {
            let previous = self.trajectory.last().copied();
            let outlets = self.adjust_once()?;
            adjustment.passes += 1;
            adjustment.last_change = previous.map(|previous| largest_change(previous, outlets));

            if tolerance.is_some_and(|tolerance| adjustment.within(tolerance)) {
                return Ok(adjustment);
            }
        }

        if let Some(tolerance) = tolerance {
            tracing::warn!(
                passes = adjustment.passes,
                tolerance_k = tolerance.get::<delta_kelvin>(),
                last_change_k = adjustment.last_change.map(|c| c.get::<delta_kelvin>()),
                "network outlets did not settle"
            );
        }
        Ok(adjustment)
    }

    fn adjust_once(&mut self) -> Result<[ThermodynamicTemperature; 2], NetworkError> {
        let solution = self.solve()?;
        let outlets = solution.outlets;
        let temperatures = &solution.temperatures;

        self.trajectory.push(outlets);
        for (output, outlet) in self.outputs.iter_mut().zip(outlets) {
            if let Some(stream) = output {
                let _ = stream.set_inlet_temperature(outlet);
            }
        }

        let (grid, assembly) = (&mut self.grid, &self.assembly);
        let n = assembly.len();
        for (i, &g) in assembly.path(StreamId::One).iter().enumerate() {
            let cell = grid
                .cell_mut(g)
                .ok_or(NetworkError::MissingCell { cell: g })?;
            let _ = cell
                .stream_mut(StreamId::One)
                .set_outlet_temperature(temperatures[i]);
            let _ = cell
                .stream_mut(StreamId::Two)
                .set_outlet_temperature(temperatures[n + i]);
            if i > 0 {
                let _ = cell
                    .stream_mut(StreamId::One)
                    .set_inlet_temperature(temperatures[i - 1]);
            }
        }
        for step in assembly.path(StreamId::Two).windows(2) {
            let upstream = grid
                .cell(step[0])
                .ok_or(NetworkError::MissingCell { cell: step[0] })?
                .stream(StreamId::Two)
                .outlet()
                .temperature();
            let _ = grid
                .cell_mut(step[1])
                .ok_or(NetworkError::MissingCell { cell: step[1] })?
                .stream_mut(StreamId::Two)
                .set_inlet_temperature(upstream);
        }

        tracing::debug!(
            pass = self.trajectory.len(),
            outlet_1_k = outlets[0].get::<kelvin>(),
            outlet_2_k = outlets[1].get::<kelvin>(),
            "adjusted network"
        );
        Ok(outlets)
    }
}

fn largest_change(
    previous: [ThermodynamicTemperature; 2],
    current: [ThermodynamicTemperature; 2],
) -> TemperatureInterval {
    let [a, b] = [0, 1].map(|k| current[k].minus(previous[k]).abs());
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::power::watt;

    use super::super::test_support::{air_network, scenario};
    use super::*;

    #[test]
    fn zero_passes_change_nothing() -> Result<(), NetworkError> {
        let mut network = scenario()?;
        let before = network.solve()?;

        let adjustment = network.adjust(Iterations::Fixed(0))?;
        assert_eq!(adjustment.passes, 0);
        assert!(network.trajectory().is_empty());
        assert_eq!(network.solve()?, before);
        for cell in network.grid().cells() {
            assert_eq!(
                cell.stream(StreamId::One).outlet().temperature(),
                cell.stream(StreamId::One).inlet().temperature()
            );
        }
        Ok(())
    }

    #[test]
    fn passes_are_recorded() -> Result<(), NetworkError> {
        let mut network = scenario()?;
        let adjustment = network.adjust(Iterations::Fixed(3))?;

        assert_eq!(adjustment.passes, 3);
        assert_eq!(network.trajectory().len(), 3);
        assert!(adjustment.last_change.is_some());
        Ok(())
    }

    #[test]
    fn converges_on_varying_properties() -> Result<(), NetworkError> {
        let mut network = scenario()?;
        let tolerance = TemperatureInterval::new::<delta_kelvin>(1e-6);
        let adjustment = network.adjust(Iterations::UntilConverged {
            tolerance,
            max_passes: 50,
        })?;

        assert!(adjustment.within(tolerance));
        assert!(adjustment.passes < 50);

        // Property changes shift the first solve only slightly.
        let trajectory = network.trajectory();
        let [first, last] = [trajectory[0], trajectory[trajectory.len() - 1]];
        for k in 0..2 {
            assert_relative_eq!(
                first[k].get::<kelvin>(),
                last[k].get::<kelvin>(),
                epsilon = 0.5
            );
        }
        Ok(())
    }

    #[test]
    fn constant_properties_settle_after_one_pass() -> Result<(), NetworkError> {
        let mut network = air_network()?;
        network.adjust(Iterations::Fixed(2))?;

        let [first, second] = [network.trajectory()[0], network.trajectory()[1]];
        for k in 0..2 {
            assert_relative_eq!(
                first[k].get::<kelvin>(),
                second[k].get::<kelvin>(),
                max_relative = 1e-12
            );
        }

        // Energy released by stream 1 is absorbed by stream 2.
        let [q1, q2] = network.heat_rates()?;
        assert!(q1.get::<watt>() > 0.);
        assert_relative_eq!(q1.get::<watt>(), -q2.get::<watt>(), max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn outputs_carry_network_outlets() -> Result<(), NetworkError> {
        let mut network = scenario()?;
        network.adjust(Iterations::Fixed(1))?;

        let outlets = network.trajectory()[0];
        for id in StreamId::BOTH {
            let output = network.output(id).ok_or(NetworkError::InputsNotDefined)?;
            assert_eq!(output.inlet().temperature(), outlets[id.index()]);
        }
        Ok(())
    }
}
