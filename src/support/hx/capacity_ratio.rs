use std::ops::Deref;

use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

use super::CapacitanceRate;

/// Capacity ratio `R = C_self / C_other` seen by one stream of a cell.
///
/// Unlike the `C_min / C_max` convention, the ratio is directional: stream 1
/// sees `R1 = C1 / C2` and stream 2 sees `R2 = 1 / R1`. Any strictly positive
/// value is valid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacityRatio(Constrained<Ratio, StrictlyPositive>);

impl CapacityRatio {
    /// Creates a [`CapacityRatio`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Creates a [`CapacityRatio`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Ratio of `own` to `other`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quotient underflows to zero.
    pub fn from_capacitance_rates(
        own: CapacitanceRate,
        other: CapacitanceRate,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(*own / *other)
    }

    /// The ratio seen by the other stream.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the reciprocal is not a positive number.
    pub fn inverse(self) -> ConstraintResult<Self> {
        Self::new(self.get::<ratio>().recip())
    }
}

impl Deref for CapacityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
