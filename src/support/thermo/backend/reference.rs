use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::support::thermo::{
    PropertyError,
    fluid::{Air, ReferenceFluid, Water},
};

use super::{Properties, PropertyBackend};

/// Closed-form property backend for the fluids in [`fluid`](crate::support::thermo::fluid).
///
/// Substance names are matched case-insensitively against each fluid's
/// [`ReferenceFluid::NAME`].
///
/// # Example
///
/// ```
/// use twine_hx_network::support::thermo::{Phase, PropertyBackend, ReferenceBackend};
/// use uom::si::{
///     f64::{Pressure, ThermodynamicTemperature},
///     pressure::pascal,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let props = ReferenceBackend
///     .properties(
///         "Water",
///         Pressure::new::<pascal>(101_325.0),
///         ThermodynamicTemperature::new::<kelvin>(293.15),
///     )
///     .unwrap();
/// assert_eq!(props.phase, Phase::Liquid);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    /// Names of the substances this backend can evaluate.
    #[must_use]
    pub fn substances() -> [&'static str; 2] {
        [Water::NAME, Air::NAME]
    }
}

impl PropertyBackend for ReferenceBackend {
    fn properties(
        &self,
        substance: &str,
        pressure: Pressure,
        temperature: ThermodynamicTemperature,
    ) -> Result<Properties, PropertyError> {
        if substance.eq_ignore_ascii_case(Water::NAME) {
            Water::properties(pressure, temperature)
        } else if substance.eq_ignore_ascii_case(Air::NAME) {
            Air::properties(pressure, temperature)
        } else {
            Err(PropertyError::UnknownSubstance {
                name: substance.to_owned(),
            })
        }
    }
}
