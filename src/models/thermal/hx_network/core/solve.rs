//! Linear solve of the network in dimensionless temperatures.

use nalgebra::{DMatrix, DVector};
use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::TemperatureDifference;

use super::error::NetworkError;

/// Solved temperatures of every cell outlet and of the network outlets.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolution {
    /// Cell outlet temperatures in [0, 1], stream 1 block then stream 2 block.
    pub dimensionless: DVector<f64>,
    /// The same outlets in physical units.
    pub temperatures: Vec<ThermodynamicTemperature>,
    pub outlets: [ThermodynamicTemperature; 2],
}

/// Maps temperatures onto [0, 1] between the two network inlets.
#[derive(Debug, Clone, Copy)]
struct Scale {
    min: ThermodynamicTemperature,
    span: TemperatureInterval,
}

impl Scale {
    fn new([t1, t2]: [ThermodynamicTemperature; 2]) -> Self {
        let (min, max) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        Self {
            min,
            span: max.minus(min),
        }
    }

    fn to_dimensionless(self, t: ThermodynamicTemperature) -> f64 {
        let span = self.span.get::<delta_kelvin>();
        if span > 0. {
            t.minus(self.min).get::<delta_kelvin>() / span
        } else {
            0.
        }
    }

    fn to_physical(self, x: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(
            self.min.get::<kelvin>() + self.span.get::<delta_kelvin>() * x,
        )
    }
}

/// Solves `x = (I - phi · structure)⁻¹ · phi · input · θ`.
///
/// `θ` holds the two inlet temperatures scaled to [0, 1]; the network outlets
/// are `output · x`. Equal inlet temperatures give a uniform network.
///
/// # Errors
///
/// Returns [`NetworkError::SingularSystem`] if the system cannot be inverted
/// or yields non-finite values.
pub fn solve(
    phi: &DMatrix<f64>,
    structure: &DMatrix<f64>,
    input: &DMatrix<f64>,
    output: &DMatrix<f64>,
    inlet_temperatures: [ThermodynamicTemperature; 2],
) -> Result<LinearSolution, NetworkError> {
    let scale = Scale::new(inlet_temperatures);
    let theta = DVector::from_iterator(2, inlet_temperatures.map(|t| scale.to_dimensionless(t)));

    let system = DMatrix::identity(phi.nrows(), phi.ncols()) - phi * structure;
    let x = system
        .lu()
        .solve(&(phi * input * theta))
        .filter(|x| x.iter().all(|v| v.is_finite()))
        .ok_or(NetworkError::SingularSystem)?;

    let out = output * &x;
    Ok(LinearSolution {
        temperatures: x.iter().map(|&v| scale.to_physical(v)).collect(),
        outlets: [scale.to_physical(out[0]), scale.to_physical(out[1])],
        dimensionless: x,
    })
}

/// The 2 × 2 map from dimensionless inlet to outlet temperatures,
/// `output · (I - phi · structure)⁻¹ · phi · input`.
///
/// # Errors
///
/// Returns [`NetworkError::SingularSystem`] if the system cannot be inverted.
pub fn characteristic(
    phi: &DMatrix<f64>,
    structure: &DMatrix<f64>,
    input: &DMatrix<f64>,
    output: &DMatrix<f64>,
) -> Result<[[f64; 2]; 2], NetworkError> {
    let system = DMatrix::identity(phi.nrows(), phi.ncols()) - phi * structure;
    let response = system
        .lu()
        .solve(&(phi * input))
        .ok_or(NetworkError::SingularSystem)?;
    let m = output * response;
    Ok([[m[(0, 0)], m[(0, 1)]], [m[(1, 0)], m[(1, 1)]]])
}
