//! # Twine HX Network
//!
//! Grid networks of two-stream heat exchanger cells for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! Two streams pass through a rows × cols grid of identical cells, each
//! following its own zig-zag path. The per-cell P-NTU relations turn the
//! network into a linear system in the cell outlet temperatures, which is
//! solved directly and then refined as fluid properties follow the new
//! temperatures.
//!
//! ## Crate layout
//!
//! - [`models`]: the [`twine_core::Model`] adapter and the network engine.
//! - [`support`]: constrained quantities, single-cell correlations, streams
//!   and the fluid property seam used by the models.
//!
//! Modules in [`support`] are public because they are useful on their own,
//! but their APIs are not yet stable.

pub mod models;
pub mod support;
