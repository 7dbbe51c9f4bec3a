//! Type-level numeric constraints checked once, at construction.
//!
//! A [`Constrained<T, C>`] holds a value of type `T` that is known to satisfy
//! the marker constraint `C`. The network code uses these wrappers wherever a
//! physical quantity has a sign or range invariant, so that invalid values are
//! rejected where they enter rather than surfacing later as `NaN`.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: zero or greater (conductances, NTU)
//! - [`StrictlyPositive`]: greater than zero (capacity rates, tolerances)
//! - [`UnitInterval`]: closed interval `0 ≤ x ≤ 1` (effectiveness)
//!
//! Each marker also offers an associated `new()` constructor, for example
//! `StrictlyPositive::new(5.0)`.

mod non_negative;
mod strictly_positive;
mod unit_interval;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;
pub use unit_interval::{UnitBounds, UnitInterval};

/// A numeric invariant checked when a [`Constrained`] value is built.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A value of type `T` that satisfies the constraint `C`.
///
/// # Example
///
/// ```
/// use twine_hx_network::support::constraint::{Constrained, StrictlyPositive};
/// use uom::si::{f64::ThermalConductance, thermal_conductance::watt_per_kelvin};
///
/// let ua = ThermalConductance::new::<watt_per_kelvin>(1000.0);
/// let ua = Constrained::<_, StrictlyPositive>::new(ua).unwrap();
/// assert_eq!(ua.into_inner().get::<watt_per_kelvin>(), 1000.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
