//! Shell-and-tube effectiveness.

use std::num::NonZeroU16;

use thiserror::Error;

use crate::support::{
    constraint::ConstraintResult,
    hx::{
        CapacityRatio, Effectiveness, Ntu,
        effectiveness_ntu::{EffectivenessRelation, effectiveness_via},
    },
};

use super::is_balanced;

/// Shell-and-tube exchanger with `n` shell passes in series, each shell
/// carrying an even number of tube passes.
///
/// Stream 1 is the shell side. The NTU is shared equally between shells and
/// the shells are combined as counter-flow stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellAndTube {
    shell_passes: NonZeroU16,
}

impl ShellAndTube {
    /// One shell pass.
    pub const ONE_SHELL: Self = Self {
        shell_passes: NonZeroU16::MIN,
    };

    /// Creates an arrangement with the given number of shell passes.
    ///
    /// # Errors
    ///
    /// Returns [`ShellAndTubeConfigError::ZeroShellPasses`] for zero.
    pub fn new(shell_passes: u16) -> Result<Self, ShellAndTubeConfigError> {
        NonZeroU16::new(shell_passes)
            .map(|shell_passes| Self { shell_passes })
            .ok_or(ShellAndTubeConfigError::ZeroShellPasses)
    }

    #[must_use]
    pub fn shell_passes(&self) -> u16 {
        self.shell_passes.get()
    }
}

impl Default for ShellAndTube {
    fn default() -> Self {
        Self::ONE_SHELL
    }
}

/// One shell with any even number of tube passes.
fn one_shell(ntu: f64, r: f64) -> f64 {
    let s = (1. + r * r).sqrt();
    let e = (-ntu * s).exp();
    2. / (1. + r + s * (1. + e) / (1. - e))
}

/// `n` identical shells in counter-flow series, each with effectiveness `p`.
fn in_series(p: f64, r: f64, n: i32) -> f64 {
    if is_balanced(r) {
        f64::from(n) * p / (1. + f64::from(n - 1) * p)
    } else if r < 1. {
        let y = ((1. - p) / (1. - p * r)).powi(n);
        (1. - y) / (1. - r * y)
    } else {
        let x = ((1. - p * r) / (1. - p)).powi(n);
        (x - 1.) / (x - r)
    }
}

impl EffectivenessRelation for ShellAndTube {
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: CapacityRatio,
    ) -> ConstraintResult<Effectiveness> {
        let n = self.shell_passes.get();
        effectiveness_via(ntu, capacity_ratio, |ntu, r| {
            if n == 1 {
                one_shell(ntu, r)
            } else {
                in_series(one_shell(ntu / f64::from(n), r), r, i32::from(n))
            }
        })
    }
}

/// Errors returned when constructing a [`ShellAndTube`] arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShellAndTubeConfigError {
    #[error("a shell-and-tube exchanger needs at least one shell pass")]
    ZeroShellPasses,
}
