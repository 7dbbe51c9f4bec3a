//! Single-cell heat exchanger toolkit.
//!
//! A cell exchanges heat between two streams. Its performance is written per
//! stream with the P-NTU method: stream `i` has `NTU_i = UA / C_i`, capacity
//! ratio `R_i = C_i / C_other`, and effectiveness `P_i`, the fraction of the
//! inlet temperature difference by which its temperature changes. The energy
//! balance ties the two streams together through `P2 = R1 · P1`.
//!
//! This toolkit provides:
//!
//! - **Core types**: [`CapacitanceRate`], [`CapacityRatio`], [`Ntu`], [`Effectiveness`]
//! - **Conductance**: [`Conductance`], an explicit UA with an optional [`Surface`]
//! - **Streams**: [`Stream`] and [`FlowRate`], built on
//!   [`FluidState`](crate::support::thermo::FluidState)
//! - **Flow arrangements**: [`ParallelFlow`], [`CounterFlow`], [`CrossFlowOneRow`],
//!   [`ShellAndTube`]
//! - **Isolated cell evaluation**: [`functional::known_conductance_and_inlets`]
//!
//! # Example
//!
//! ```
//! use twine_hx_network::support::constraint::ConstraintResult;
//! use twine_hx_network::support::hx::{
//!     CapacitanceRate, CrossFlowOneRow,
//!     functional::{CellInlet, known_conductance_and_inlets},
//! };
//! use uom::si::{
//!     f64::{ThermalConductance, ThermodynamicTemperature},
//!     thermal_conductance::watt_per_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! fn main() -> ConstraintResult<()> {
//!     let exchange = known_conductance_and_inlets(
//!         &CrossFlowOneRow,
//!         ThermalConductance::new::<watt_per_kelvin>(1000.0),
//!         [
//!             CellInlet::new(
//!                 CapacitanceRate::new::<watt_per_kelvin>(3500.0)?,
//!                 ThermodynamicTemperature::new::<degree_celsius>(100.0),
//!             ),
//!             CellInlet::new(
//!                 CapacitanceRate::new::<watt_per_kelvin>(3500.0)?,
//!                 ThermodynamicTemperature::new::<degree_celsius>(20.0),
//!             ),
//!         ],
//!     )?;
//!
//!     let [hot_out, cold_out] = exchange.outlet_temperatures;
//!     assert!(hot_out > cold_out);
//!     Ok(())
//! }
//! ```

pub mod arrangement;
mod capacitance_rate;
mod capacity_ratio;
mod conductance;
mod effectiveness_ntu;
pub mod functional;
mod stream;

pub use arrangement::{
    CounterFlow, CrossFlowOneRow, ParallelFlow, ShellAndTube, ShellAndTubeConfigError,
};
pub use capacitance_rate::CapacitanceRate;
pub use capacity_ratio::CapacityRatio;
pub use conductance::{Conductance, Surface};
pub use effectiveness_ntu::{Effectiveness, EffectivenessRelation, Ntu};
pub use stream::{FlowRate, Stream, StreamError};
