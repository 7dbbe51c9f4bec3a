//! Closed-form evaluation of a single cell from its inlet conditions.

use uom::si::{
    f64::{Power, ThermalConductance, ThermodynamicTemperature},
    ratio::ratio,
};

use crate::support::{constraint::ConstraintResult, units::TemperatureDifference};

use super::{CapacitanceRate, Effectiveness, effectiveness_ntu::EffectivenessRelation};

/// Capacity rate and inlet temperature of one stream entering a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellInlet {
    pub capacitance_rate: CapacitanceRate,
    pub temperature: ThermodynamicTemperature,
}

impl CellInlet {
    #[must_use]
    pub fn new(capacitance_rate: CapacitanceRate, temperature: ThermodynamicTemperature) -> Self {
        Self {
            capacitance_rate,
            temperature,
        }
    }
}

/// Resolved state of an isolated cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellExchange {
    /// `[P1, P2]`, same order as the inlets.
    pub effectiveness: [Effectiveness; 2],
    pub outlet_temperatures: [ThermodynamicTemperature; 2],
    /// Heat passed from stream 1 to stream 2; negative when stream 2 is hotter.
    pub heat_rate: Power,
}

/// Evaluates one cell of conductance `ua` given both inlets.
///
/// Each stream moves towards the other's inlet temperature by its own
/// effectiveness: `T1_out = T1_in - P1 (T1_in - T2_in)` and
/// `T2_out = T2_in + P2 (T1_in - T2_in)`.
///
/// # Errors
///
/// Returns `Err` if `ua` is negative or the correlation leaves [0, 1].
pub fn known_conductance_and_inlets(
    arrangement: &impl EffectivenessRelation,
    ua: ThermalConductance,
    inlets: [CellInlet; 2],
) -> ConstraintResult<CellExchange> {
    let [first, second] = inlets;
    let effectiveness =
        arrangement.for_cell(ua, [first.capacitance_rate, second.capacitance_rate])?;
    let [p1, p2] = effectiveness.map(|p| p.get::<ratio>());

    let span = first.temperature.minus(second.temperature);

    Ok(CellExchange {
        effectiveness,
        outlet_temperatures: [
            first.temperature - span * p1,
            second.temperature + span * p2,
        ],
        heat_rate: *first.capacitance_rate * span * p1,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        power::kilowatt, thermal_conductance::kilowatt_per_kelvin,
        thermodynamic_temperature::degree_celsius,
    };

    use super::super::arrangement::{CounterFlow, CrossFlowOneRow};
    use super::*;

    #[test]
    fn counter_flow_textbook_case() -> ConstraintResult<()> {
        // Hot stream 6 kW/K at 80 °C against cold 3 kW/K at 50 °C, NTU_cold = ln 4.
        let exchange = known_conductance_and_inlets(
            &CounterFlow,
            ThermalConductance::new::<kilowatt_per_kelvin>(3. * 4.0_f64.ln()),
            [
                CellInlet::new(
                    CapacitanceRate::new::<kilowatt_per_kelvin>(6.)?,
                    ThermodynamicTemperature::new::<degree_celsius>(80.),
                ),
                CellInlet::new(
                    CapacitanceRate::new::<kilowatt_per_kelvin>(3.)?,
                    ThermodynamicTemperature::new::<degree_celsius>(50.),
                ),
            ],
        )?;

        assert_relative_eq!(
            exchange.effectiveness[1].get::<ratio>(),
            2. / 3.,
            max_relative = 1e-12
        );
        assert_relative_eq!(exchange.heat_rate.get::<kilowatt>(), 60., max_relative = 1e-12);
        for outlet in exchange.outlet_temperatures {
            assert_relative_eq!(outlet.get::<degree_celsius>(), 70., max_relative = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn energy_is_conserved() -> ConstraintResult<()> {
        let c1 = CapacitanceRate::new::<kilowatt_per_kelvin>(3.5)?;
        let c2 = CapacitanceRate::new::<kilowatt_per_kelvin>(1.2)?;
        let exchange = known_conductance_and_inlets(
            &CrossFlowOneRow,
            ThermalConductance::new::<kilowatt_per_kelvin>(2.),
            [
                CellInlet::new(c1, ThermodynamicTemperature::new::<degree_celsius>(100.)),
                CellInlet::new(c2, ThermodynamicTemperature::new::<degree_celsius>(20.)),
            ],
        )?;

        let [t1, t2] = exchange.outlet_temperatures.map(|t| t.get::<degree_celsius>());
        let released = 3.5 * (100. - t1);
        let absorbed = 1.2 * (t2 - 20.);
        assert_relative_eq!(released, absorbed, max_relative = 1e-12);
        assert_relative_eq!(exchange.heat_rate.get::<kilowatt>(), released, max_relative = 1e-12);
        Ok(())
    }
}
