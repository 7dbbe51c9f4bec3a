//! Grid network of two-stream heat exchanger cells.
//!
//! Each stream snakes through the grid in its own [`FlowOrder`], passing from
//! cell to cell. With every cell's effectiveness frozen, the cell outlet
//! temperatures satisfy a linear system, which is solved in one shot. Because
//! the effectivenesses depend on temperature through the fluid properties,
//! [`HxNetwork::adjust`] alternates solving and writing temperatures back into
//! the cells.
//!
//! Structural changes (shape, cell kind, conductance, orders, inputs) mark the
//! network dirty. [`HxNetwork::recompute`] rebuilds the grid and the matrices;
//! until then every matrix consumer returns [`NetworkError::Stale`].

mod adjust;
mod assembly;
mod cell;
mod error;
mod flow_order;
mod grid;
mod report;
mod sizing;
mod solve;

#[cfg(test)]
mod test_support;

pub use adjust::{Adjustment, Iterations};
pub use assembly::{Assembly, Node};
pub use cell::{Cell, CellKind};
pub use error::NetworkError;
pub use flow_order::{Corner, Direction, FlowOrder, Horizontal, Vertical};
pub use grid::{Grid, Shape, ShellLayout};
pub use sizing::{SizedNetwork, SizingConfig, SizingError};
pub use solve::LinearSolution;

use std::fmt;

use nalgebra::DMatrix;
use uom::{
    ConstZero,
    si::f64::{Power, ThermodynamicTemperature},
};

use crate::support::hx::{Conductance, Stream};

/// One of the two streams of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    One,
    Two,
}

impl StreamId {
    pub const BOTH: [Self; 2] = [Self::One, Self::Two];

    /// Position in `[stream 1, stream 2]` arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// Evaluation state reported by [`HxNetwork::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalStatus {
    /// Inputs changed since the last recompute.
    Dirty,
    /// The network cannot be evaluated; the message says why.
    Invalid(String),
    Clean,
}

/// A rows × cols grid of identical cells between two streams.
#[derive(Debug, Clone)]
pub struct HxNetwork {
    shape: Shape,
    kind: CellKind,
    total_ua: Conductance,
    orders: [FlowOrder; 2],
    iterations: Iterations,
    inputs: [Option<Stream>; 2],
    outputs: [Option<Stream>; 2],
    grid: Grid,
    assembly: Assembly,
    trajectory: Vec<[ThermodynamicTemperature; 2]>,
    dirty: bool,
    last_error: Option<NetworkError>,
}

impl HxNetwork {
    /// Creates a network without inputs. Both streams start in `ul2r` order.
    #[must_use]
    pub fn new(shape: Shape, kind: CellKind, total_ua: Conductance) -> Self {
        let orders = [FlowOrder::default(); 2];
        Self {
            shape,
            kind,
            total_ua,
            orders,
            iterations: Iterations::default(),
            inputs: [None, None],
            outputs: [None, None],
            grid: Grid::default(),
            assembly: Assembly::new(Shape::default(), orders),
            trajectory: Vec::new(),
            dirty: true,
            last_error: None,
        }
    }

    /// Creates a cross-flow network laid out like a baffled shell.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidShellLayout`] for impossible layouts.
    pub fn from_shell_layout(
        layout: ShellLayout,
        total_ua: Conductance,
    ) -> Result<Self, NetworkError> {
        Ok(Self::new(
            Shape::try_from(layout)?,
            CellKind::CrossFlowOneRow,
            total_ua,
        ))
    }

    /// Every ordered pair of distinct flow orders.
    #[must_use]
    pub fn input_arrangements() -> Vec<[FlowOrder; 2]> {
        FlowOrder::arrangements()
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.last_error = None;
    }

    pub fn set_input(&mut self, id: StreamId, stream: Stream) {
        self.inputs[id.index()] = Some(stream);
        self.mark_dirty();
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.mark_dirty();
    }

    pub fn set_cell_kind(&mut self, kind: CellKind) {
        self.kind = kind;
        self.mark_dirty();
    }

    pub fn set_total_ua(&mut self, total_ua: Conductance) {
        self.total_ua = total_ua;
        self.mark_dirty();
    }

    pub fn set_flow_order(&mut self, id: StreamId, order: FlowOrder) {
        self.orders[id.index()] = order;
        self.mark_dirty();
    }

    /// Passes run by [`HxNetwork::eval`].
    pub fn set_iterations(&mut self, iterations: Iterations) {
        self.iterations = iterations;
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn cell_kind(&self) -> CellKind {
        self.kind
    }

    #[must_use]
    pub fn total_ua(&self) -> Conductance {
        self.total_ua
    }

    #[must_use]
    pub fn flow_order(&self, id: StreamId) -> FlowOrder {
        self.orders[id.index()]
    }

    #[must_use]
    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    #[must_use]
    pub fn input(&self, id: StreamId) -> Option<&Stream> {
        self.inputs[id.index()].as_ref()
    }

    /// Network outlet of a stream: its inlet state holds the outlet
    /// temperature after an adjustment pass.
    #[must_use]
    pub fn output(&self, id: StreamId) -> Option<&Stream> {
        self.outputs[id.index()].as_ref()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Outlet temperatures recorded by each adjustment pass since the last
    /// recompute.
    #[must_use]
    pub fn trajectory(&self) -> &[[ThermodynamicTemperature; 2]] {
        &self.trajectory
    }

    /// Rebuilds the grid, the paths and the structural matrices.
    ///
    /// Cells restart from copies of the input streams, the output streams
    /// restart as copies of the inputs and the trajectory is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputsNotDefined`] if an input is missing, or
    /// a constraint error if the conductance cannot be split.
    pub fn recompute(&mut self) -> Result<(), NetworkError> {
        let [first, second] = &self.inputs;
        let grid = Grid::fill(
            self.shape,
            self.kind,
            &self.total_ua,
            [first.as_ref(), second.as_ref()],
        )?;

        self.assembly = Assembly::new(self.shape, self.orders);
        self.grid = grid;
        self.outputs = self.inputs.clone();
        self.trajectory.clear();
        self.dirty = false;
        self.last_error = None;

        tracing::debug!(
            cells = self.grid.cells().len(),
            order_1 = %self.orders[0],
            order_2 = %self.orders[1],
            "recomputed network"
        );
        Ok(())
    }

    /// Reports whether the network can be evaluated and is up to date.
    #[must_use]
    pub fn status(&self) -> EvalStatus {
        let [Some(first), Some(second)] = &self.inputs else {
            return EvalStatus::Invalid("inputs not connected".to_owned());
        };
        if first.capacitance_rate().is_err() || second.capacitance_rate().is_err() {
            return EvalStatus::Invalid("heat capacity flow not defined".to_owned());
        }
        if let Some(error) = &self.last_error {
            return EvalStatus::Invalid(error.to_string());
        }
        if self.dirty {
            return EvalStatus::Dirty;
        }
        if self.grid.is_empty() {
            return EvalStatus::Invalid(NetworkError::EmptyGrid.to_string());
        }
        EvalStatus::Clean
    }

    /// Recomputes from the current inputs and runs the configured passes.
    ///
    /// Failures are kept and reported through the returned status.
    pub fn eval(&mut self) -> EvalStatus {
        let result = self
            .recompute()
            .and_then(|()| self.adjust(self.iterations).map(|_| ()));
        if let Err(error) = result {
            tracing::debug!(%error, "network evaluation failed");
            self.last_error = Some(error);
        }
        self.status()
    }

    fn fresh(&self) -> Result<(), NetworkError> {
        if self.dirty {
            return Err(NetworkError::Stale);
        }
        if self.grid.is_empty() {
            return Err(NetworkError::EmptyGrid);
        }
        Ok(())
    }

    fn inlet_temperatures(&self) -> Result<[ThermodynamicTemperature; 2], NetworkError> {
        match &self.inputs {
            [Some(first), Some(second)] => {
                Ok([first.inlet().temperature(), second.inlet().temperature()])
            }
            _ => Err(NetworkError::InputsNotDefined),
        }
    }

    /// The assembled paths and structural matrices.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Stale`] while the network is dirty.
    pub fn assembly(&self) -> Result<&Assembly, NetworkError> {
        if self.dirty {
            return Err(NetworkError::Stale);
        }
        Ok(&self.assembly)
    }

    /// Block effectiveness matrix from the current cell states.
    ///
    /// # Errors
    ///
    /// Fails while dirty, for an empty grid, or when a cell has no defined
    /// capacity ratio.
    pub fn phi(&self) -> Result<DMatrix<f64>, NetworkError> {
        self.fresh()?;
        self.assembly.phi(&self.grid)
    }

    /// Solves the linear system for the current cell effectivenesses without
    /// touching any state.
    ///
    /// # Errors
    ///
    /// Fails while dirty, for an empty grid, when a cell's effectiveness is
    /// undefined or when the system is singular.
    pub fn solve(&self) -> Result<LinearSolution, NetworkError> {
        let phi = self.phi()?;
        solve::solve(
            &phi,
            self.assembly.structure(),
            self.assembly.input(),
            self.assembly.output(),
            self.inlet_temperatures()?,
        )
    }

    /// The 2 × 2 matrix mapping dimensionless inlet to outlet temperatures.
    ///
    /// # Errors
    ///
    /// Same as [`HxNetwork::solve`].
    pub fn network_characteristic(&self) -> Result<[[f64; 2]; 2], NetworkError> {
        let phi = self.phi()?;
        solve::characteristic(
            &phi,
            self.assembly.structure(),
            self.assembly.input(),
            self.assembly.output(),
        )
    }

    /// Total heat released by each stream over all cells.
    ///
    /// # Errors
    ///
    /// Fails while dirty or when a mass rate cannot be derived.
    pub fn heat_rates(&self) -> Result<[Power; 2], NetworkError> {
        if self.dirty {
            return Err(NetworkError::Stale);
        }
        self.grid
            .cells()
            .iter()
            .try_fold([Power::ZERO; 2], |[q1, q2], cell| {
                let [c1, c2] = cell.heat_rates()?;
                Ok([q1 + c1, q2 + c2])
            })
    }

    /// Heat released by stream 1 in each cell, laid out as the grid.
    ///
    /// # Errors
    ///
    /// Fails while dirty or when a mass rate cannot be derived.
    pub fn heat_rate_grid(&self) -> Result<Vec<Vec<Power>>, NetworkError> {
        if self.dirty {
            return Err(NetworkError::Stale);
        }
        let cols = self.shape.cols.max(1);
        let mut rows = Vec::with_capacity(self.shape.rows);
        for row in self.grid.cells().chunks(cols) {
            rows.push(
                row.iter()
                    .map(|cell| Ok(cell.heat_rates()?[0]))
                    .collect::<Result<Vec<_>, NetworkError>>()?,
            );
        }
        Ok(rows)
    }

    /// Per stream, the inlet temperature of every cell in visiting order,
    /// followed by the temperature leaving the last cell.
    ///
    /// # Errors
    ///
    /// Fails while dirty or for an empty grid.
    pub fn flow_temperature_profile(
        &self,
    ) -> Result<[Vec<ThermodynamicTemperature>; 2], NetworkError> {
        self.fresh()?;
        let profile = |id: StreamId| -> Result<Vec<ThermodynamicTemperature>, NetworkError> {
            let cells = self
                .assembly
                .path(id)
                .iter()
                .map(|&g| {
                    self.grid
                        .cell(g)
                        .ok_or(NetworkError::MissingCell { cell: g })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let mut temperatures: Vec<_> = cells
                .iter()
                .map(|cell| cell.stream(id).inlet().temperature())
                .collect();
            if let Some(last) = cells.last() {
                temperatures.push(last.stream(id).outlet().temperature());
            }
            Ok(temperatures)
        };
        Ok([profile(StreamId::One)?, profile(StreamId::Two)?])
    }
}
