//! Mixing configuration.

use crate::error::{StreamError, StreamResult};
use serde::{Deserialize, Serialize};

/// How the mixer treats the order of the engine's phase envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeOrder {
    /// Sort points by saturated-liquid enthalpy before searching.
    #[default]
    Sort,
    /// Require the engine to return an ascending liquid branch; fail otherwise.
    Verify,
}

/// Configuration for [`Mixer`](crate::Mixer).
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    pub envelope_order: EnvelopeOrder,
    /// Combined molar flow must be strictly greater than this [mol/s].
    pub min_total_flow: f64,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            envelope_order: EnvelopeOrder::Sort,
            min_total_flow: 0.0,
        }
    }
}

impl MixConfig {
    pub fn validate(&self) -> StreamResult<()> {
        if !self.min_total_flow.is_finite() || self.min_total_flow < 0.0 {
            return Err(StreamError::InvalidArg {
                what: "min_total_flow must be finite and non-negative",
            });
        }
        Ok(())
    }
}
