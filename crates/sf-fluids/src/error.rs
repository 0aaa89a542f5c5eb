//! Fluid property errors.

use sf_core::CoreError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while building or evaluating a mixture.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative flow, zero pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value out of valid range.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A component name the engine cannot resolve.
    #[error("Unrecognized component '{species}'")]
    Composition { species: String },

    /// A required property could not be evaluated at the requested state.
    #[error("Property evaluation failed for {property}: {message}")]
    PropertyEvaluation {
        property: &'static str,
        message: String,
    },

    /// Backend (CoolProp) error outside of a specific property.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// Convergence failure (bubble/dew point iterations).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl From<CoreError> for FluidError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } | CoreError::Negative { what, .. } => {
                FluidError::NonPhysical { what }
            }
            CoreError::InvalidArg { what } => FluidError::InvalidArg { what },
            CoreError::Invariant { what } => FluidError::Backend { message: what },
        }
    }
}

impl From<FluidError> for CoreError {
    fn from(err: FluidError) -> Self {
        CoreError::Invariant {
            what: format!("fluid: {err}"),
        }
    }
}
