//! Single-row cross-flow effectiveness.

use crate::support::{
    constraint::ConstraintResult,
    hx::{
        CapacityRatio, Effectiveness, Ntu,
        effectiveness_ntu::{EffectivenessRelation, effectiveness_via},
    },
};

/// One row of tubes in cross flow, with stream 1 ideally mixed across the
/// row and stream 2 unmixed.
///
/// `P1 = 1 - exp((exp(-R1·N1) - 1) / R1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossFlowOneRow;

impl EffectivenessRelation for CrossFlowOneRow {
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacity_ratio: CapacityRatio,
    ) -> ConstraintResult<Effectiveness> {
        effectiveness_via(ntu, capacity_ratio, |ntu, r| {
            1. - (((-r * ntu).exp() - 1.) / r).exp()
        })
    }
}
