//! Parallel-flow effectiveness.

use crate::support::{
    constraint::ConstraintResult,
    hx::{
        CapacityRatio, Effectiveness, Ntu,
        effectiveness_ntu::{EffectivenessRelation, effectiveness_via},
    },
};

/// Both streams enter at the same end and flow in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelFlow;

impl EffectivenessRelation for ParallelFlow {
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: CapacityRatio,
    ) -> ConstraintResult<Effectiveness> {
        effectiveness_via(ntu, capacity_ratio, |ntu, r| {
            (1. - (-ntu * (1. + r)).exp()) / (1. + r)
        })
    }
}
