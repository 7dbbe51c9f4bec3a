//! Heat exchanger network model.
//!
//! A network is a rows × cols grid of identical two-stream cells. Each stream
//! visits every cell once in its own [`FlowOrder`], and the cell outlet
//! temperatures are found from one linear solve per adjustment pass.
//!
//! [`HxNetworkModel`] is the [`twine_core::Model`] adapter: it takes a flat
//! [`NetworkConfig`] and returns [`NetworkResults`]. [`HxNetwork`] is the
//! stateful engine behind it, for callers that change inputs between solves,
//! inspect the grid or size a network.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_hx_network::models::thermal::hx_network::{
//!     HxNetworkModel, NetworkConfig, StreamConfig, UnitSystem,
//! };
//! use uom::si::thermodynamic_temperature::degree_celsius;
//!
//! let water = |temperature| StreamConfig {
//!     substance: "Water".to_owned(),
//!     pressure: 1.0142,
//!     temperature,
//!     mass_rate: Some(0.83),
//!     volume_rate: None,
//! };
//! let config = NetworkConfig {
//!     units: UnitSystem::Engineering,
//!     rows: 4,
//!     cols: 4,
//!     cell_kind: "CrossFlowOneRow".to_owned(),
//!     flow_order_1: "dr2u".to_owned(),
//!     flow_order_2: "ul2r".to_owned(),
//!     total_ua: Some(4.0),
//!     cell_ua: None,
//!     stream_1: water(100.0),
//!     stream_2: water(20.0),
//!     passes: 3,
//!     tolerance: None,
//! };
//!
//! let results = HxNetworkModel::default().call(&config)?;
//! let [hot, cold] = results.outlet_temperatures.map(|t| t.get::<degree_celsius>());
//! assert!(hot > 55.0 && hot < 65.0);
//! // Equal mass rates: the hot side loses about what the cold side gains.
//! assert!((hot + cold - 120.0).abs() < 0.5);
//! # Ok::<(), twine_hx_network::models::thermal::hx_network::NetworkError>(())
//! ```

mod config;
pub(crate) mod core;

pub use config::{NetworkConfig, StreamConfig, UnitSystem};
pub use self::core::{
    Adjustment, Assembly, Cell, CellKind, Corner, Direction, EvalStatus, FlowOrder, Grid,
    Horizontal, HxNetwork, Iterations, LinearSolution, NetworkError, Node, Shape, ShellLayout,
    SizedNetwork, SizingConfig, SizingError, StreamId, Vertical,
};

use std::sync::Arc;

use twine_core::Model;
use uom::si::f64::{Power, ThermodynamicTemperature};

use crate::support::thermo::{PropertyBackend, ReferenceBackend};

/// Solves a network described by a [`NetworkConfig`].
#[derive(Debug, Clone)]
pub struct HxNetworkModel {
    backend: Arc<dyn PropertyBackend>,
}

impl HxNetworkModel {
    #[must_use]
    pub fn new(backend: Arc<dyn PropertyBackend>) -> Self {
        Self { backend }
    }
}

impl Default for HxNetworkModel {
    fn default() -> Self {
        Self::new(Arc::new(ReferenceBackend))
    }
}

/// Outcome of one [`HxNetworkModel`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResults {
    /// Outlets solved from the final cell states.
    pub outlet_temperatures: [ThermodynamicTemperature; 2],
    /// Heat released by each stream, positive when it cools down.
    pub heat_rates: [Power; 2],
    /// Dimensionless inlet-to-outlet map, see
    /// [`HxNetwork::network_characteristic`].
    pub characteristic: [[f64; 2]; 2],
    /// Outlets after each adjustment pass.
    pub trajectory: Vec<[ThermodynamicTemperature; 2]>,
}

impl Model for HxNetworkModel {
    type Input = NetworkConfig;
    type Output = NetworkResults;
    type Error = NetworkError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut network = input.build(Arc::clone(&self.backend))?;
        network.recompute()?;
        network.adjust(network.iterations())?;

        Ok(NetworkResults {
            outlet_temperatures: network.solve()?.outlets,
            heat_rates: network.heat_rates()?,
            characteristic: network.network_characteristic()?,
            trajectory: network.trajectory().to_vec(),
        })
    }
}
