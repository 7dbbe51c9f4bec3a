use thiserror::Error;

use crate::support::{constraint::ConstraintError, hx::StreamError, thermo::PropertyError};

/// Errors raised while configuring, assembling or solving a network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// A flow order name did not match any of the eight known orders.
    #[error("unknown flow order `{name}`")]
    UnknownFlowOrder { name: String },

    /// A cell kind name did not match any known correlation.
    #[error("unknown cell kind `{name}`")]
    UnknownCellKind { name: String },

    /// The grid was filled before both input streams were defined.
    #[error("inputs not yet defined")]
    InputsNotDefined,

    /// A stream in the given cell has no positive heat-capacity rate, so its
    /// capacity ratio is undefined.
    #[error("heat capacity flow not defined in cell {cell}: {source}")]
    UndefinedCapacityRatio {
        cell: usize,
        #[source]
        source: ConstraintError,
    },

    /// A baffle and tube-pass combination that cannot be built.
    #[error("invalid shell layout: {baffles} baffles with {tube_passes} tube passes")]
    InvalidShellLayout { baffles: usize, tube_passes: usize },

    /// The grid has no cells to solve.
    #[error("grid has no cells")]
    EmptyGrid,

    /// The network changed since the last `recompute`.
    #[error("network changed since the last recompute")]
    Stale,

    /// A flattened path names a cell the grid does not hold, meaning the grid
    /// and the assembly were built from different shapes.
    #[error("grid has no cell {cell} on the assembled path")]
    MissingCell { cell: usize },

    /// `I - phi * structure` could not be inverted.
    #[error("linear system is singular")]
    SingularSystem,

    /// A configuration value is missing or contradictory.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl NetworkError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<StreamError> for NetworkError {
    fn from(error: StreamError) -> Self {
        match error {
            StreamError::Property(error) => Self::Property(error),
            StreamError::Capacity(error) => Self::Constraint(error),
        }
    }
}
