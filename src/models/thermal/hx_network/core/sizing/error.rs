use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::TemperatureInterval;

use crate::models::thermal::hx_network::core::NetworkError;

/// Errors that can occur while sizing a network.
#[derive(Debug, Error)]
pub enum SizingError {
    /// Building or solving a trial network failed.
    #[error("network solve failed")]
    Network(#[from] NetworkError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best outlet temperature residual achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
