//! Flow arrangements of a single cell, each a per-stream effectiveness
//! correlation `P = f(NTU, R)`.
//!
//! Every correlation is written for stream 1. The second stream's
//! effectiveness follows from `P2 = R1 · P1`.

mod counter_flow;
mod cross_flow;
mod parallel_flow;
mod shell_and_tube;

pub use counter_flow::CounterFlow;
pub use cross_flow::CrossFlowOneRow;
pub use parallel_flow::ParallelFlow;
pub use shell_and_tube::{ShellAndTube, ShellAndTubeConfigError};

/// `|R - 1|` below which the balanced-flow limit of a correlation is used.
const BALANCED: f64 = 1e-9;

fn is_balanced(capacity_ratio: f64) -> bool {
    (capacity_ratio - 1.0).abs() < BALANCED
}
