use uom::si::{
    f64::{Area, HeatTransfer, ThermalConductance},
    thermal_conductance::watt_per_kelvin,
};

use crate::support::constraint::{Constrained, ConstraintError, ConstraintResult, NonNegative};

/// Relative disagreement between UA and `area * coefficient` tolerated silently.
const AGREEMENT: f64 = 1e-6;

/// Heat-transfer surface described by its area and overall film coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub area: Area,
    pub coefficient: HeatTransfer,
}

impl Surface {
    #[must_use]
    pub fn conductance(&self) -> ThermalConductance {
        self.area * self.coefficient
    }
}

/// Thermal conductance (UA) of a cell.
///
/// The explicit UA is authoritative. A surface may be attached for reference;
/// if its `area * coefficient` disagrees with the UA a warning is logged and
/// the UA is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conductance {
    ua: Constrained<ThermalConductance, NonNegative>,
    surface: Option<Surface>,
}

impl Conductance {
    /// Creates a conductance from an explicit UA.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative or not a number.
    pub fn from_ua(ua: ThermalConductance) -> ConstraintResult<Self> {
        Ok(Self {
            ua: NonNegative::new(ua)?,
            surface: None,
        })
    }

    /// Creates a conductance whose UA is `area * coefficient`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the product is negative or not a number.
    pub fn from_surface(surface: Surface) -> ConstraintResult<Self> {
        Ok(Self {
            ua: NonNegative::new(surface.conductance())?,
            surface: Some(surface),
        })
    }

    /// Attaches a surface, keeping the current UA.
    #[must_use]
    pub fn with_surface(mut self, surface: Surface) -> Self {
        let ua = self.ua().get::<watt_per_kelvin>();
        let from_surface = surface.conductance().get::<watt_per_kelvin>();
        if !self.agrees_with(from_surface) {
            tracing::warn!(
                ua_w_per_k = ua,
                surface_ua_w_per_k = from_surface,
                "UA disagrees with area times coefficient, keeping UA"
            );
        }
        self.surface = Some(surface);
        self
    }

    #[must_use]
    pub fn ua(&self) -> ThermalConductance {
        *self.ua.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    /// `true` when no surface is attached or the surface matches the UA.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.surface
            .is_none_or(|s| self.agrees_with(s.conductance().get::<watt_per_kelvin>()))
    }

    /// Splits the conductance equally between `parts` cells.
    ///
    /// A surface, if any, is split by area.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::Zero`] when `parts` is zero.
    pub fn split(&self, parts: usize) -> ConstraintResult<Self> {
        if parts == 0 {
            return Err(ConstraintError::Zero);
        }
        #[allow(clippy::cast_precision_loss)]
        let share = 1.0 / parts as f64;
        Ok(Self {
            ua: NonNegative::new(self.ua() * share)?,
            surface: self.surface.map(|s| Surface {
                area: s.area * share,
                coefficient: s.coefficient,
            }),
        })
    }

    fn agrees_with(&self, other_w_per_k: f64) -> bool {
        let ua = self.ua().get::<watt_per_kelvin>();
        (ua - other_w_per_k).abs() <= AGREEMENT * ua.abs().max(other_w_per_k.abs())
    }
}
