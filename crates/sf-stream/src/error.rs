//! Error types for stream construction and mixing.

use sf_core::CoreError;
use sf_fluids::FluidError;
use std::fmt;
use thiserror::Error;

/// Step of the mixing algorithm that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixStage {
    /// Total molar flow.
    Flow,
    /// Flow-weighted composition.
    Composition,
    /// Enthalpy balance.
    Energy,
    /// Phase-envelope temperature lookup.
    Envelope,
}

impl fmt::Display for MixStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MixStage::Flow => "flow",
            MixStage::Composition => "composition",
            MixStage::Energy => "energy balance",
            MixStage::Envelope => "envelope",
        };
        f.write_str(label)
    }
}

/// Errors from building or combining streams.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Property engine or input validation failure at construction.
    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A combine step failed before the mixed stream could be evaluated.
    #[error("Mixing failed at {stage} stage: {what}")]
    Mixing { stage: MixStage, what: String },
}

pub type StreamResult<T> = Result<T, StreamError>;

impl StreamError {
    pub(crate) fn mixing(stage: MixStage, what: impl Into<String>) -> Self {
        StreamError::Mixing {
            stage,
            what: what.into(),
        }
    }

    /// Stage that failed, when this is a mixing error.
    pub fn mix_stage(&self) -> Option<MixStage> {
        match self {
            StreamError::Mixing { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<StreamError> for CoreError {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Fluid(err) => err.into(),
            StreamError::InvalidArg { what } => CoreError::InvalidArg { what },
            StreamError::Mixing { stage, what } => CoreError::Invariant {
                what: format!("mixing ({stage}): {what}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixing_error_display_names_stage() {
        let err = StreamError::mixing(MixStage::Envelope, "phase envelope is empty");
        assert_eq!(
            err.to_string(),
            "Mixing failed at envelope stage: phase envelope is empty"
        );
        assert_eq!(err.mix_stage(), Some(MixStage::Envelope));
    }

    #[test]
    fn fluid_errors_convert() {
        let err: StreamError = FluidError::Composition {
            species: "Unobtainium".into(),
        }
        .into();
        assert_eq!(err.mix_stage(), None);
        assert!(err.to_string().contains("Unobtainium"));
    }

    #[test]
    fn converts_to_core_error() {
        let core: CoreError = StreamError::mixing(MixStage::Flow, "zero flow").into();
        assert!(matches!(core, CoreError::Invariant { ref what } if what.contains("flow")));
    }
}
