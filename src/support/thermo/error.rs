use thiserror::Error;

/// Errors reported by a [`PropertyBackend`](super::PropertyBackend).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The backend does not know the requested substance.
    #[error("unknown substance: {name}")]
    UnknownSubstance { name: String },

    /// The property is undefined at the given state.
    ///
    /// For example, the specific heat capacity of a pure fluid within the vapor dome.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The requested state lies outside the substance's valid region.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provided state is invalid or inconsistent.
    #[error("invalid state: {context}")]
    InvalidState { context: String },

    /// The calculation failed due to a numerical or internal error.
    #[error("calculation error: {context}")]
    Calculation { context: String },
}
