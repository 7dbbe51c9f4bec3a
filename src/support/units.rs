//! Extensions to [`uom`].
//!
//! Every physical value handled by the network is a [`uom`] quantity, so unit
//! conversions happen at the edges (configuration, reports) and nowhere else.
//! This module adds the pieces [`uom`] does not ship:
//!
//! - [`SpecificEnthalpy`], used by the property backend and stream heat duties.
//! - [`TemperatureDifference`], for subtracting absolute temperatures:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::{temperature_interval, thermodynamic_temperature::kelvin};
//! use twine_hx_network::support::units::TemperatureDifference;
//!
//! let hot = ThermodynamicTemperature::new::<kelvin>(373.15);
//! let cold = ThermodynamicTemperature::new::<kelvin>(293.15);
//! let span = hot.minus(cold);
//! assert!((span.get::<temperature_interval::kelvin>() - 80.0).abs() < 1e-9);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::SpecificEnthalpy;
pub use temperature_difference::TemperatureDifference;
