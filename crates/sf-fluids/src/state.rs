//! Stream state: temperature, pressure and molar flow.

use crate::error::FluidResult;
use sf_core::numeric::{ensure_non_negative, ensure_positive};
use sf_core::units::{MolarFlow, Pressure, Temperature};

/// Thermodynamic state of a stream.
///
/// Temperature and pressure fix the intensive state; `flow` is the molar flow
/// rate [mol/s] carried by the stream. All three are validated on creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    t: Temperature,
    p: Pressure,
    flow: MolarFlow,
}

impl State {
    /// Create a state, requiring positive finite T and P and a non-negative flow.
    pub fn new(t: Temperature, p: Pressure, flow: MolarFlow) -> FluidResult<Self> {
        ensure_positive(t.value, "temperature")?;
        ensure_positive(p.value, "pressure")?;
        ensure_non_negative(flow, "molar flow")?;
        Ok(Self { t, p, flow })
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    /// Molar flow [mol/s].
    pub fn flow(&self) -> MolarFlow {
        self.flow
    }

    /// Same temperature and pressure, different flow.
    pub fn with_flow(self, flow: MolarFlow) -> FluidResult<Self> {
        Self::new(self.t, self.p, flow)
    }
}
