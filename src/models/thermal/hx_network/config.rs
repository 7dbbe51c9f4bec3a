//! Flat, serializable description of a network.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{
        MassRate, Pressure, TemperatureInterval, ThermalConductance, ThermodynamicTemperature,
        VolumeRate,
    },
    mass_rate::kilogram_per_second,
    pressure::{bar, pascal},
    temperature_interval::{degree_celsius as delta_celsius, kelvin as delta_kelvin},
    thermal_conductance::{kilowatt_per_kelvin, watt_per_kelvin},
    thermodynamic_temperature::{degree_celsius, kelvin},
    volume_rate::{cubic_meter_per_hour, cubic_meter_per_second},
};

use crate::support::{
    hx::{Conductance, FlowRate, Stream},
    thermo::{FluidState, PropertyBackend},
};

use super::core::{
    CellKind, FlowOrder, HxNetwork, Iterations, NetworkError, Shape, StreamId,
};

/// How the plain numbers of a configuration are read.
///
/// | quantity    | `si`  | `engineering` |
/// |-------------|-------|---------------|
/// | temperature | K     | °C            |
/// | pressure    | Pa    | bar           |
/// | conductance | W/K   | kW/K          |
/// | mass rate   | kg/s  | kg/s          |
/// | volume rate | m³/s  | m³/h          |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Si,
    Engineering,
}

impl UnitSystem {
    fn temperature(self, value: f64) -> ThermodynamicTemperature {
        match self {
            Self::Si => ThermodynamicTemperature::new::<kelvin>(value),
            Self::Engineering => ThermodynamicTemperature::new::<degree_celsius>(value),
        }
    }

    /// Temperature differences, used for the convergence tolerance.
    fn temperature_interval(self, value: f64) -> TemperatureInterval {
        match self {
            Self::Si => TemperatureInterval::new::<delta_kelvin>(value),
            Self::Engineering => TemperatureInterval::new::<delta_celsius>(value),
        }
    }

    fn pressure(self, value: f64) -> Pressure {
        match self {
            Self::Si => Pressure::new::<pascal>(value),
            Self::Engineering => Pressure::new::<bar>(value),
        }
    }

    fn conductance(self, value: f64) -> ThermalConductance {
        match self {
            Self::Si => ThermalConductance::new::<watt_per_kelvin>(value),
            Self::Engineering => ThermalConductance::new::<kilowatt_per_kelvin>(value),
        }
    }

    fn volume_rate(self, value: f64) -> VolumeRate {
        match self {
            Self::Si => VolumeRate::new::<cubic_meter_per_second>(value),
            Self::Engineering => VolumeRate::new::<cubic_meter_per_hour>(value),
        }
    }
}

/// One input stream. Exactly one of `mass_rate` and `volume_rate` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub substance: String,
    pub pressure: f64,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_rate: Option<f64>,
}

impl StreamConfig {
    fn build(
        &self,
        units: UnitSystem,
        backend: &Arc<dyn PropertyBackend>,
    ) -> Result<Stream, NetworkError> {
        let flow = match (self.mass_rate, self.volume_rate) {
            (Some(mass), None) => FlowRate::Mass(MassRate::new::<kilogram_per_second>(mass)),
            (None, Some(volume)) => FlowRate::Volume(units.volume_rate(volume)),
            _ => {
                return Err(NetworkError::invalid_config(format!(
                    "stream of {} needs exactly one of mass_rate and volume_rate",
                    self.substance
                )));
            }
        };
        let inlet = FluidState::new(
            Arc::clone(backend),
            self.substance.as_str(),
            units.pressure(self.pressure),
            units.temperature(self.temperature),
        )?;
        Ok(Stream::new(inlet, flow))
    }
}

fn default_passes() -> usize {
    1
}

/// A network as plain data.
///
/// Names are validated when the network is built. Exactly one of
/// `total_ua` and `cell_ua` is set; `cell_ua` is multiplied by the number of
/// cells. With a `tolerance`, `passes` is the upper bound of a converging
/// adjustment rather than a fixed count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub units: UnitSystem,
    pub rows: usize,
    pub cols: usize,
    pub cell_kind: String,
    pub flow_order_1: String,
    pub flow_order_2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_ua: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_ua: Option<f64>,
    pub stream_1: StreamConfig,
    pub stream_2: StreamConfig,
    #[serde(default = "default_passes")]
    pub passes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl NetworkConfig {
    /// Adjustment passes described by `passes` and `tolerance`.
    #[must_use]
    pub fn iterations(&self) -> Iterations {
        match self.tolerance {
            Some(tolerance) => Iterations::UntilConverged {
                tolerance: self.units.temperature_interval(tolerance),
                max_passes: self.passes,
            },
            None => Iterations::Fixed(self.passes),
        }
    }

    /// Builds a network with both inputs connected. It still needs a
    /// [`HxNetwork::recompute`] before solving.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] for unknown names, contradictory fields or
    /// inlet states the backend rejects.
    pub fn build(&self, backend: Arc<dyn PropertyBackend>) -> Result<HxNetwork, NetworkError> {
        let shape = Shape::new(self.rows, self.cols);
        let kind: CellKind = self.cell_kind.parse()?;
        let orders: [FlowOrder; 2] = [self.flow_order_1.parse()?, self.flow_order_2.parse()?];

        let total_ua = match (self.total_ua, self.cell_ua) {
            (Some(total), None) => self.units.conductance(total),
            #[allow(clippy::cast_precision_loss)]
            (None, Some(cell)) => self.units.conductance(cell) * shape.cells() as f64,
            _ => {
                return Err(NetworkError::invalid_config(
                    "exactly one of total_ua and cell_ua is required",
                ));
            }
        };

        let mut network = HxNetwork::new(shape, kind, Conductance::from_ua(total_ua)?);
        for (id, order) in StreamId::BOTH.into_iter().zip(orders) {
            network.set_flow_order(id, order);
        }
        network.set_input(StreamId::One, self.stream_1.build(self.units, &backend)?);
        network.set_input(StreamId::Two, self.stream_2.build(self.units, &backend)?);
        network.set_iterations(self.iterations());
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use crate::support::thermo::ReferenceBackend;

    use super::*;

    fn backend() -> Arc<dyn PropertyBackend> {
        Arc::new(ReferenceBackend)
    }

    fn engineering() -> NetworkConfig {
        NetworkConfig {
            units: UnitSystem::Engineering,
            rows: 2,
            cols: 2,
            cell_kind: "CrossFlowOneRow".to_owned(),
            flow_order_1: "dr2u".to_owned(),
            flow_order_2: "ul2r".to_owned(),
            total_ua: None,
            cell_ua: Some(1.0),
            stream_1: StreamConfig {
                substance: "Water".to_owned(),
                pressure: 1.0142,
                temperature: 100.0,
                mass_rate: Some(0.83),
                volume_rate: None,
            },
            stream_2: StreamConfig {
                substance: "Water".to_owned(),
                pressure: 1.0142,
                temperature: 20.0,
                mass_rate: None,
                volume_rate: Some(3.0),
            },
            passes: 2,
            tolerance: None,
        }
    }

    #[test]
    fn json_round_trip() -> Result<(), serde_json::Error> {
        let config = engineering();
        let json = serde_json::to_string(&config)?;
        assert!(json.contains("\"units\":\"engineering\""));
        assert!(!json.contains("total_ua"));
        assert_eq!(serde_json::from_str::<NetworkConfig>(&json)?, config);
        Ok(())
    }

    #[test]
    fn defaults_when_omitted() -> Result<(), serde_json::Error> {
        let json = r#"{
            "rows": 1, "cols": 3,
            "cell_kind": "CounterFlow",
            "flow_order_1": "ul2r", "flow_order_2": "ur2l",
            "total_ua": 3000.0,
            "stream_1": {"substance": "Air", "pressure": 101325.0, "temperature": 400.0, "mass_rate": 1.0},
            "stream_2": {"substance": "Air", "pressure": 101325.0, "temperature": 300.0, "mass_rate": 1.0}
        }"#;
        let config: NetworkConfig = serde_json::from_str(json)?;
        assert_eq!(config.units, UnitSystem::Si);
        assert_eq!(config.passes, 1);
        assert_eq!(config.iterations(), Iterations::Fixed(1));
        Ok(())
    }

    #[test]
    fn builds_in_engineering_units() -> Result<(), NetworkError> {
        let mut network = engineering().build(backend())?;
        network.recompute()?;

        assert_relative_eq!(
            network.total_ua().ua().get::<watt_per_kelvin>(),
            4000.,
            max_relative = 1e-12
        );
        assert_eq!(network.flow_order(StreamId::One), FlowOrder::Dr2u);
        assert_eq!(network.iterations(), Iterations::Fixed(2));
        let hot = network.input(StreamId::One).map(|s| s.inlet().temperature());
        assert_eq!(hot, Some(ThermodynamicTemperature::new::<degree_celsius>(100.)));
        assert!(network.solve().is_ok());
        Ok(())
    }

    #[test]
    fn unknown_names() {
        let mut config = engineering();
        config.flow_order_2 = "sideways".to_owned();
        assert!(matches!(
            config.build(backend()),
            Err(NetworkError::UnknownFlowOrder { .. })
        ));

        let mut config = engineering();
        config.cell_kind = "PlateFin".to_owned();
        assert!(matches!(
            config.build(backend()),
            Err(NetworkError::UnknownCellKind { .. })
        ));
    }

    #[test]
    fn contradictory_fields() {
        let mut config = engineering();
        config.total_ua = Some(4.0);
        assert!(matches!(
            config.build(backend()),
            Err(NetworkError::InvalidConfig { .. })
        ));

        let mut config = engineering();
        config.stream_1.volume_rate = Some(1.0);
        assert!(matches!(
            config.build(backend()),
            Err(NetworkError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn tolerance_selects_converging_passes() {
        let mut config = engineering();
        config.tolerance = Some(0.001);
        config.passes = 20;
        assert!(matches!(
            config.iterations(),
            Iterations::UntilConverged { max_passes: 20, .. }
        ));
    }
}
