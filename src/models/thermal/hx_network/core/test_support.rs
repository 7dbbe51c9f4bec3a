use std::sync::Arc;

use uom::si::{
    f64::{MassRate, Pressure, ThermalConductance, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::ConstraintResult,
    hx::{Conductance, FlowRate, Stream},
    thermo::{FluidState, PropertyError, ReferenceBackend},
};

use super::{CellKind, FlowOrder, HxNetwork, NetworkError, Shape, StreamId};

pub(super) const HOT: f64 = 373.15;
pub(super) const COLD: f64 = 293.15;

/// Grid shapes covering single cells, single rows and single columns.
pub(super) const SHAPES: [(usize, usize); 6] = [(1, 1), (1, 5), (5, 1), (2, 2), (3, 4), (4, 3)];

pub(super) fn total_ua(w_per_k: f64) -> ConstraintResult<Conductance> {
    Conductance::from_ua(ThermalConductance::new::<watt_per_kelvin>(w_per_k))
}

fn state(substance: &str, pressure: f64, t_kelvin: f64) -> Result<FluidState, PropertyError> {
    FluidState::new(
        Arc::new(ReferenceBackend),
        substance,
        Pressure::new::<pascal>(pressure),
        ThermodynamicTemperature::new::<kelvin>(t_kelvin),
    )
}

/// Water stream whose inlet capacity rate is `c` W/K.
fn water(t_kelvin: f64, c: f64) -> Result<Stream, PropertyError> {
    let inlet = state("Water", 101_420.0, t_kelvin)?;
    let mass = c / inlet.cp().get::<joule_per_kilogram_kelvin>();
    Ok(Stream::new(
        inlet,
        FlowRate::Mass(MassRate::new::<kilogram_per_second>(mass)),
    ))
}

/// Hot and cold water, both at 3500 W/K.
pub(super) fn hot_and_cold_water() -> Result<[Stream; 2], PropertyError> {
    Ok([water(HOT, 3500.0)?, water(COLD, 3500.0)?])
}

/// Hot air at 2 kg/s and cold air at 1.5 kg/s.
pub(super) fn hot_and_cold_air() -> Result<[Stream; 2], PropertyError> {
    let air = |t, mass| -> Result<Stream, PropertyError> {
        Ok(Stream::new(
            state("Air", 101_325.0, t)?,
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(mass)),
        ))
    };
    Ok([air(HOT, 2.0)?, air(COLD, 1.5)?])
}

fn network(
    shape: Shape,
    kind: CellKind,
    ua: f64,
    orders: [FlowOrder; 2],
    [first, second]: [Stream; 2],
) -> Result<HxNetwork, NetworkError> {
    let mut network = HxNetwork::new(shape, kind, total_ua(ua)?);
    network.set_flow_order(StreamId::One, orders[0]);
    network.set_flow_order(StreamId::Two, orders[1]);
    network.set_input(StreamId::One, first);
    network.set_input(StreamId::Two, second);
    network.recompute()?;
    Ok(network)
}

/// Recomputed 2 × 2 cross-flow water network, 4000 W/K in total, hot stream
/// in `dr2u` and cold stream in `ul2r`.
pub(super) fn scenario() -> Result<HxNetwork, NetworkError> {
    network(
        Shape::new(2, 2),
        CellKind::CrossFlowOneRow,
        4000.0,
        [FlowOrder::Dr2u, FlowOrder::Ul2r],
        hot_and_cold_water()?,
    )
}

/// Recomputed 3 × 2 counter-flow air network with constant properties.
pub(super) fn air_network() -> Result<HxNetwork, NetworkError> {
    network(
        Shape::new(3, 2),
        CellKind::CounterCurrentFlow,
        3000.0,
        [FlowOrder::Ul2d, FlowOrder::Dr2l],
        hot_and_cold_air()?,
    )
}

/// Recomputed water network at 3500 W/K per stream.
pub(super) fn water_network(
    shape: Shape,
    kind: CellKind,
    ua: f64,
    orders: [FlowOrder; 2],
) -> Result<HxNetwork, NetworkError> {
    network(shape, kind, ua, orders, hot_and_cold_water()?)
}
