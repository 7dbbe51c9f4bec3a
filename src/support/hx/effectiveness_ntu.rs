use std::ops::Deref;

use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};

use super::{CapacitanceRate, CapacityRatio};

/// Rounding slack tolerated at the edges of [0, 1] before a value is rejected.
const BOUND_SLACK: f64 = 1e-12;

/// A per-stream effectiveness correlation `P = f(NTU, R)`.
///
/// Both arguments describe the same stream: its NTU (`UA / C_self`) and its
/// capacity ratio (`C_self / C_other`). The other stream's effectiveness
/// follows from the energy balance, see [`EffectivenessRelation::pair`].
pub trait EffectivenessRelation {
    /// Effectiveness of the stream with the given NTU and capacity ratio.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the correlation produces a value outside [0, 1] or
    /// not a number.
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: CapacityRatio,
    ) -> ConstraintResult<Effectiveness>;

    /// Effectiveness of both streams, `[P1, P2]`.
    ///
    /// `P1` is evaluated from stream 1's NTU and `R1`, and `P2 = R1 · P1`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either value falls outside [0, 1].
    fn pair(&self, ntu_1: Ntu, ratio_1: CapacityRatio) -> ConstraintResult<[Effectiveness; 2]> {
        let p1 = self.effectiveness(ntu_1, ratio_1)?;
        let p2 = Effectiveness::bounded(ratio_1.get::<ratio>() * p1.get::<ratio>())?;
        Ok([p1, p2])
    }

    /// Effectiveness of both streams of a cell with conductance `ua`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative or a correlation leaves [0, 1].
    fn for_cell(
        &self,
        ua: ThermalConductance,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<[Effectiveness; 2]> {
        let [c1, c2] = capacitance_rates;
        self.pair(c1.ntu(ua)?, c1.ratio_to(c2)?)
    }
}

/// Effectiveness `P` of one stream: its temperature change relative to the
/// inlet temperature difference of the cell.
///
/// The effectiveness must be in the interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Creates an [`Effectiveness`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Creates an [`Effectiveness`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside the interval [0, 1].
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// Like [`Effectiveness::new`], but snaps values within rounding distance
    /// of 0 or 1 onto the bound.
    pub(crate) fn bounded(value: f64) -> ConstraintResult<Self> {
        let snapped = if (-BOUND_SLACK..0.0).contains(&value) {
            0.0
        } else if value > 1.0 && value <= 1.0 + BOUND_SLACK {
            1.0
        } else {
            value
        };
        Self::new(snapped)
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// The number of transfer units of one stream, `UA / C`.
///
/// The number of transfer units must be >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Creates an [`Ntu`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Creates an [`Ntu`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(quantity)?))
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Evaluates a raw correlation `f(ntu, r)` and checks the result.
///
/// A cell without conductance transfers nothing, whatever the arrangement.
#[inline]
pub(crate) fn effectiveness_via(
    ntu: Ntu,
    capacity_ratio: CapacityRatio,
    fn_raw: impl Fn(f64, f64) -> f64,
) -> ConstraintResult<Effectiveness> {
    let ntu = ntu.get::<ratio>();
    if ntu == 0.0 {
        return Effectiveness::new(0.0);
    }
    Effectiveness::bounded(fn_raw(ntu, capacity_ratio.get::<ratio>()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    use crate::support::{constraint::ConstraintError, hx::arrangement::CounterFlow};

    use super::*;

    #[test]
    fn rounding_noise_is_snapped() -> ConstraintResult<()> {
        assert_relative_eq!(Effectiveness::bounded(1.0 + 1e-15)?.get::<ratio>(), 1.0);
        assert_relative_eq!(Effectiveness::bounded(-1e-15)?.get::<ratio>(), 0.0);
        assert_eq!(
            Effectiveness::bounded(1.01).err(),
            Some(ConstraintError::AboveMaximum)
        );
        assert_eq!(
            Effectiveness::bounded(f64::NAN).err(),
            Some(ConstraintError::NotANumber)
        );
        Ok(())
    }

    #[test]
    fn pair_follows_energy_balance() -> ConstraintResult<()> {
        let rates = [
            CapacitanceRate::new::<watt_per_kelvin>(2000.)?,
            CapacitanceRate::new::<watt_per_kelvin>(1000.)?,
        ];
        let [p1, p2] =
            CounterFlow.for_cell(ThermalConductance::new::<watt_per_kelvin>(1500.), rates)?;

        // C1 · P1 = C2 · P2
        assert_relative_eq!(
            2000. * p1.get::<ratio>(),
            1000. * p2.get::<ratio>(),
            max_relative = 1e-12
        );
        Ok(())
    }
}
