use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uom::si::f64::Power;

use crate::support::{
    constraint::ConstraintResult,
    hx::{
        CapacitanceRate, CapacityRatio, Conductance, CounterFlow, CrossFlowOneRow, Effectiveness,
        EffectivenessRelation, Ntu, ParallelFlow, ShellAndTube, Stream, StreamError,
        functional::{CellExchange, CellInlet, known_conductance_and_inlets},
    },
};

use super::{StreamId, error::NetworkError};

/// Effectiveness correlation used by every cell of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CellKind {
    ParallelFlow,
    CounterCurrentFlow,
    CrossFlowOneRow,
    ShellAndTube(ShellAndTube),
}

impl EffectivenessRelation for CellKind {
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: CapacityRatio,
    ) -> ConstraintResult<Effectiveness> {
        match self {
            Self::ParallelFlow => ParallelFlow.effectiveness(ntu, capacity_ratio),
            Self::CounterCurrentFlow => CounterFlow.effectiveness(ntu, capacity_ratio),
            Self::CrossFlowOneRow => CrossFlowOneRow.effectiveness(ntu, capacity_ratio),
            Self::ShellAndTube(shell) => shell.effectiveness(ntu, capacity_ratio),
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParallelFlow => f.write_str("ParallelFlow"),
            Self::CounterCurrentFlow => f.write_str("CounterCurrentFlow"),
            Self::CrossFlowOneRow => f.write_str("CrossFlowOneRow"),
            Self::ShellAndTube(shell) if shell.shell_passes() == 1 => f.write_str("ShellAndTube"),
            Self::ShellAndTube(shell) => write!(f, "ShellAndTube({})", shell.shell_passes()),
        }
    }
}

impl FromStr for CellKind {
    type Err = NetworkError;

    /// Accepts the [`Display`](fmt::Display) names, `CounterFlow` as an alias
    /// of `CounterCurrentFlow` and `ShellAndTube(n)` for `n` shell passes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || NetworkError::UnknownCellKind { name: s.to_owned() };
        match s.trim() {
            "ParallelFlow" => Ok(Self::ParallelFlow),
            "CounterCurrentFlow" | "CounterFlow" => Ok(Self::CounterCurrentFlow),
            "CrossFlowOneRow" => Ok(Self::CrossFlowOneRow),
            "ShellAndTube" => Ok(Self::ShellAndTube(ShellAndTube::ONE_SHELL)),
            other => {
                let passes = other
                    .strip_prefix("ShellAndTube(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|n| n.trim().parse::<u16>().ok())
                    .ok_or_else(unknown)?;
                ShellAndTube::new(passes)
                    .map(Self::ShellAndTube)
                    .map_err(|_| unknown())
            }
        }
    }
}

impl TryFrom<String> for CellKind {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellKind> for String {
    fn from(kind: CellKind) -> Self {
        kind.to_string()
    }
}

/// One two-stream heat exchanger in the grid.
///
/// All derived quantities are evaluated from the current stream states, so
/// they follow every inlet or outlet update.
#[derive(Debug, Clone)]
pub struct Cell {
    index: usize,
    kind: CellKind,
    conductance: Conductance,
    streams: [Stream; 2],
}

impl Cell {
    /// Creates the cell at row-major grid position `index`.
    #[must_use]
    pub fn new(index: usize, kind: CellKind, conductance: Conductance, streams: [Stream; 2]) -> Self {
        Self {
            index,
            kind,
            conductance,
            streams,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    #[must_use]
    pub fn conductance(&self) -> Conductance {
        self.conductance
    }

    #[must_use]
    pub fn stream(&self, id: StreamId) -> &Stream {
        &self.streams[id.index()]
    }

    pub(super) fn stream_mut(&mut self, id: StreamId) -> &mut Stream {
        &mut self.streams[id.index()]
    }

    /// Heat-capacity rates of both streams at their mean states.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::UndefinedCapacityRatio`] if either rate is not
    /// strictly positive.
    pub fn capacitance_rates(&self) -> Result<[CapacitanceRate; 2], NetworkError> {
        let rate = |stream: &Stream| {
            stream.capacitance_rate().map_err(|error| match error {
                StreamError::Capacity(source) => NetworkError::UndefinedCapacityRatio {
                    cell: self.index,
                    source,
                },
                StreamError::Property(error) => NetworkError::Property(error),
            })
        };
        Ok([rate(&self.streams[0])?, rate(&self.streams[1])?])
    }

    /// `[NTU1, NTU2]`.
    ///
    /// # Errors
    ///
    /// Fails when a capacity rate is undefined.
    pub fn ntu(&self) -> Result<[Ntu; 2], NetworkError> {
        let ua = self.conductance.ua();
        let [c1, c2] = self.capacitance_rates()?;
        Ok([c1.ntu(ua)?, c2.ntu(ua)?])
    }

    /// `[R1, R2]`, with `R1 · R2 = 1`.
    ///
    /// # Errors
    ///
    /// Fails when a capacity rate is undefined.
    pub fn capacity_ratios(&self) -> Result<[CapacityRatio; 2], NetworkError> {
        let [c1, c2] = self.capacitance_rates()?;
        Ok([c1.ratio_to(c2)?, c2.ratio_to(c1)?])
    }

    /// `[P1, P2]` from the cell's correlation.
    ///
    /// # Errors
    ///
    /// Fails when a capacity rate is undefined or the correlation leaves [0, 1].
    pub fn effectiveness(&self) -> Result<[Effectiveness; 2], NetworkError> {
        let rates = self.capacitance_rates()?;
        Ok(self.kind.for_cell(self.conductance.ua(), rates)?)
    }

    /// Evaluates the cell in isolation from its current inlets.
    ///
    /// The result is what the cell would do on its own, ignoring the network
    /// around it: outlet temperatures, effectiveness pair and the heat
    /// passed from stream 1 to stream 2.
    ///
    /// # Errors
    ///
    /// Fails when a capacity rate is undefined or the correlation leaves [0, 1].
    pub fn exchange(&self) -> Result<CellExchange, NetworkError> {
        let [c1, c2] = self.capacitance_rates()?;
        let inlets = [
            CellInlet::new(c1, self.streams[0].inlet().temperature()),
            CellInlet::new(c2, self.streams[1].inlet().temperature()),
        ];
        Ok(known_conductance_and_inlets(
            &self.kind,
            self.conductance.ua(),
            inlets,
        )?)
    }

    /// Heat released by each stream, positive when the stream cools down.
    ///
    /// # Errors
    ///
    /// Fails when a mass rate cannot be derived.
    pub fn heat_rates(&self) -> Result<[Power; 2], NetworkError> {
        Ok([
            self.streams[0].heat_rate()?,
            self.streams[1].heat_rate()?,
        ])
    }
}
