use std::ops::Deref;

use uom::si::f64::{MassRate, SpecificHeatCapacity, ThermalConductance};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

use super::{CapacityRatio, Ntu};

/// Heat-capacity rate (`m_dot * c_p`) of one stream through a cell.
///
/// A zero rate leaves the capacity ratio undefined, so the value must be
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacitanceRate(Constrained<ThermalConductance, StrictlyPositive>);

impl CapacitanceRate {
    /// Creates a [`CapacitanceRate`] from a scalar value in unit `U`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new<U>(value: f64) -> ConstraintResult<Self>
    where
        U: uom::si::thermal_conductance::Unit + uom::Conversion<f64, T = f64>,
    {
        Self::from_quantity(ThermalConductance::new::<U>(value))
    }

    /// Creates a [`CapacitanceRate`] from a quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: ThermalConductance) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Creates a [`CapacitanceRate`] from a mass flow rate and specific heat.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the product is not strictly positive.
    pub fn from_mass_rate_and_specific_heat(
        mass_rate: MassRate,
        specific_heat: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(mass_rate * specific_heat)
    }

    /// Number of transfer units this stream sees across a conductance `ua`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative.
    pub fn ntu(self, ua: ThermalConductance) -> ConstraintResult<Ntu> {
        Ntu::from_quantity(ua / *self)
    }

    /// Capacity ratio of this stream relative to `other`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ratio is not a positive number.
    pub fn ratio_to(self, other: Self) -> ConstraintResult<CapacityRatio> {
        CapacityRatio::from_capacitance_rates(self, other)
    }
}

impl Deref for CapacitanceRate {
    type Target = ThermalConductance;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
