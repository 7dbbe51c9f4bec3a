//! Counter-flow effectiveness.

use crate::support::{
    constraint::ConstraintResult,
    hx::{
        CapacityRatio, Effectiveness, Ntu,
        effectiveness_ntu::{EffectivenessRelation, effectiveness_via},
    },
};

use super::is_balanced;

/// The streams enter at opposite ends and flow against each other.
///
/// At `R = 1` the general expression is `0 / 0`; its limit `N / (1 + N)` is
/// used instead. For `R > 1` the expression is rearranged so the exponential
/// decays rather than overflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterFlow;

impl EffectivenessRelation for CounterFlow {
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: CapacityRatio,
    ) -> ConstraintResult<Effectiveness> {
        effectiveness_via(ntu, capacity_ratio, |ntu, r| {
            if is_balanced(r) {
                ntu / (1. + ntu)
            } else if r < 1. {
                let e = (-ntu * (1. - r)).exp();
                (1. - e) / (1. - r * e)
            } else {
                let e = (-ntu * (r - 1.)).exp();
                (1. - e) / (r - e)
            }
        })
    }
}
