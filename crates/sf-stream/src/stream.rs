//! Material stream.

use crate::error::{StreamError, StreamResult};
use sf_core::units::{MolarFlow, Pressure, Temperature};
use sf_fluids::{Composition, PointProperties, PropertyEngine, State};
use std::fmt;

/// Properties captured from the engine when a stream is built.
pub type DerivedProperties = PointProperties;

/// A flow of a fixed mixture at a fixed state.
///
/// Streams are immutable. Properties are evaluated once in [`Stream::new`] and
/// never refreshed; operations that change composition or state return a new
/// stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    composition: Composition,
    state: State,
    properties: DerivedProperties,
}

impl Stream {
    /// Evaluate `composition` at `state` and capture the result.
    ///
    /// Fails with the engine's error when a component is unknown or a required
    /// property cannot be evaluated. Missing transport properties are not errors.
    pub fn new(
        engine: &dyn PropertyEngine,
        composition: Composition,
        state: State,
    ) -> StreamResult<Self> {
        let properties = engine.evaluate(&composition, state.pressure(), state.temperature())?;

        tracing::debug!(
            engine = engine.name(),
            components = composition.len(),
            t_k = state.temperature().value,
            p_pa = state.pressure().value,
            flow = state.flow(),
            properties = %properties.summary(),
            "stream evaluated"
        );

        Ok(Self {
            composition,
            state,
            properties,
        })
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn properties(&self) -> &DerivedProperties {
        &self.properties
    }

    pub fn temperature(&self) -> Temperature {
        self.state.temperature()
    }

    pub fn pressure(&self) -> Pressure {
        self.state.pressure()
    }

    /// Molar flow [mol/s].
    pub fn flow(&self) -> MolarFlow {
        self.state.flow()
    }

    /// Mole fraction of `name`, 0 when absent.
    pub fn fraction(&self, name: &str) -> f64 {
        self.composition.fraction(name)
    }

    pub fn component_count(&self) -> usize {
        self.composition.len()
    }

    /// Divide the stream into two with flows `ratio·F` and `(1 - ratio)·F`.
    ///
    /// Both parts keep the composition, temperature, pressure and properties of
    /// the original; every captured property is intensive, so the engine is
    /// not consulted.
    pub fn split(&self, ratio: f64) -> StreamResult<(Stream, Stream)> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(StreamError::InvalidArg {
                what: "split ratio must be in [0, 1]",
            });
        }
        let first_flow = self.flow() * ratio;
        let second_flow = self.flow() - first_flow;
        Ok((self.with_flow(first_flow)?, self.with_flow(second_flow)?))
    }

    fn with_flow(&self, flow: MolarFlow) -> StreamResult<Stream> {
        Ok(Stream {
            composition: self.composition.clone(),
            state: self.state.with_flow(flow)?,
            properties: self.properties.clone(),
        })
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.composition.names().collect();
        write!(f, "Stream containing {names:?}")
    }
}
