//! Problem formulation for sizing by target outlet temperature.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{ThermalConductance, ThermodynamicTemperature},
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::thermal::hx_network::core::{HxNetwork, Iterations, NetworkError},
    support::hx::Conductance,
};

use super::SizedNetwork;

/// Model adapter exposing the total conductance as the only input.
pub(super) struct SizingModel<'a> {
    template: &'a HxNetwork,
    passes: Iterations,
}

impl<'a> SizingModel<'a> {
    pub(super) fn new(template: &'a HxNetwork, passes: Iterations) -> Self {
        Self { template, passes }
    }
}

impl Model for SizingModel<'_> {
    type Input = ThermalConductance;
    type Output = SizedNetwork;
    type Error = NetworkError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let mut network = self.template.clone();
        network.set_total_ua(Conductance::from_ua(*input)?);
        network.recompute()?;
        network.adjust(self.passes)?;
        let outlets = network.solve()?.outlets;
        Ok(SizedNetwork { network, outlets })
    }
}

/// Residual `outlet_1 - target`, in kelvin.
pub(super) struct SizingProblem {
    target: ThermodynamicTemperature,
}

impl SizingProblem {
    pub(super) fn new(target: ThermodynamicTemperature) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for SizingProblem {
    type Input = ThermalConductance;
    type Output = SizedNetwork;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermalConductance::new::<watt_per_kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.outlets[0].get::<kelvin>() - self.target.get::<kelvin>()])
    }
}
