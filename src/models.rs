//! Public Twine models.
//!
//! # Model structure
//!
//! Each model lives in its own module with an internal `core` submodule that
//! holds the computation. The [`twine_core::Model`] implementation is a thin
//! adapter over that core; the core types a caller needs are re-exported from
//! the model module itself.

pub mod thermal;
