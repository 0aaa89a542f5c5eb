//! Isenthalpic mixing of streams.
//!
//! Mixing is split in two halves. [`blend`] is the arithmetic part: it
//! conserves molar flow, species and enthalpy and picks the lower pressure,
//! without touching the property engine. [`Mixer::combine`] then resolves the
//! mixed temperature by looking up the blended molar enthalpy on the
//! saturated-liquid branch of the mixture's phase envelope, and evaluates the
//! resulting stream.

use crate::closest::closest_index;
use crate::config::{EnvelopeOrder, MixConfig};
use crate::error::{MixStage, StreamError, StreamResult};
use crate::stream::Stream;
use sf_core::units::{MolarEnthalpy, MolarFlow, Pressure, Temperature};
use sf_fluids::{Composition, PhaseEnvelope, PropertyEngine, State};

/// Conserved quantities of two streams after mixing, before the temperature
/// is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Blend {
    pub composition: Composition,
    pub pressure: Pressure,
    /// [mol/s]
    pub flow: MolarFlow,
    /// [J/mol]
    pub h_molar: MolarEnthalpy,
}

/// Flow, species and energy balance of `a` and `b`.
///
/// Components are ordered as in `a`, followed by those only `b` carries.
/// The combined flow must be finite and strictly greater than
/// `config.min_total_flow`.
pub fn blend(a: &Stream, b: &Stream, config: &MixConfig) -> StreamResult<Blend> {
    let (flow_a, flow_b) = (a.flow(), b.flow());
    let flow = flow_a + flow_b;
    if !flow.is_finite() || flow <= config.min_total_flow {
        return Err(StreamError::mixing(
            MixStage::Flow,
            format!(
                "combined molar flow {flow} mol/s must exceed {} mol/s",
                config.min_total_flow
            ),
        ));
    }

    let mut moles: Vec<(String, f64)> = a
        .composition()
        .iter()
        .map(|(name, x)| (name.to_string(), x * flow_a + b.fraction(name) * flow_b))
        .collect();
    moles.extend(
        b.composition()
            .iter()
            .filter(|(name, _)| !a.composition().contains(name))
            .map(|(name, x)| (name.to_string(), x * flow_b)),
    );
    let composition = Composition::new(moles.into_iter().map(|(name, n)| (name, n / flow)))
        .map_err(|e| StreamError::mixing(MixStage::Composition, e.to_string()))?;

    let pressure = if a.pressure() <= b.pressure() {
        a.pressure()
    } else {
        b.pressure()
    };

    let h_molar = (a.properties().h_molar * flow_a + b.properties().h_molar * flow_b) / flow;
    if !h_molar.is_finite() {
        return Err(StreamError::mixing(
            MixStage::Energy,
            format!("mixed molar enthalpy is not finite ({h_molar})"),
        ));
    }

    Ok(Blend {
        composition,
        pressure,
        flow,
        h_molar,
    })
}

/// Combines streams with a property engine and a [`MixConfig`].
pub struct Mixer<'a> {
    engine: &'a dyn PropertyEngine,
    config: MixConfig,
}

impl<'a> Mixer<'a> {
    pub fn new(engine: &'a dyn PropertyEngine) -> Self {
        Self::with_config(engine, MixConfig::default())
    }

    pub fn with_config(engine: &'a dyn PropertyEngine, config: MixConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    /// Mix two streams into a new one. Neither input is modified.
    ///
    /// Any failure before the mixed stream is evaluated is reported as
    /// [`StreamError::Mixing`] with the stage that failed.
    pub fn combine(&self, a: &Stream, b: &Stream) -> StreamResult<Stream> {
        self.config.validate()?;
        let blend = blend(a, b, &self.config)?;
        let temperature = self.resolve_temperature(&blend.composition, blend.h_molar)?;
        let state = State::new(temperature, blend.pressure, blend.flow)
            .map_err(|e| StreamError::mixing(MixStage::Envelope, e.to_string()))?;
        Stream::new(self.engine, blend.composition, state)
    }

    /// Left fold of [`combine`](Self::combine) over `streams`.
    ///
    /// A single stream is returned as a copy; an empty input is an error.
    pub fn combine_all<'s, I>(&self, streams: I) -> StreamResult<Stream>
    where
        I: IntoIterator<Item = &'s Stream>,
    {
        let mut streams = streams.into_iter();
        let first = streams.next().ok_or(StreamError::InvalidArg {
            what: "no streams to combine",
        })?;
        streams.try_fold(first.clone(), |acc, next| self.combine(&acc, next))
    }

    /// Temperature of the envelope point whose saturated-liquid enthalpy is
    /// closest to `h_molar`.
    pub fn resolve_temperature(
        &self,
        composition: &Composition,
        h_molar: MolarEnthalpy,
    ) -> StreamResult<Temperature> {
        let envelope = self
            .engine
            .phase_envelope(composition)
            .map_err(|e| StreamError::mixing(MixStage::Envelope, e.to_string()))?;
        let envelope = self.order_envelope(envelope)?;

        let index = closest_index(&envelope.liquid_molar_enthalpies, h_molar).ok_or_else(|| {
            StreamError::mixing(MixStage::Envelope, "no usable phase envelope points")
        })?;
        let temperature = envelope.temperature_at(index).ok_or_else(|| {
            StreamError::mixing(MixStage::Envelope, "envelope temperature column too short")
        })?;

        tracing::debug!(
            engine = self.engine.name(),
            target_h = h_molar,
            matched_h = envelope.liquid_molar_enthalpies[index],
            t_k = temperature.value,
            points = envelope.len(),
            "resolved mixed temperature"
        );
        Ok(temperature)
    }

    fn order_envelope(&self, envelope: PhaseEnvelope) -> StreamResult<PhaseEnvelope> {
        envelope
            .validate()
            .map_err(|e| StreamError::mixing(MixStage::Envelope, e.to_string()))?;
        match self.config.envelope_order {
            EnvelopeOrder::Sort => Ok(envelope.sorted_by_liquid_enthalpy()),
            EnvelopeOrder::Verify => {
                let h_liquid = &envelope.liquid_molar_enthalpies;
                if !h_liquid.iter().all(|h| h.is_finite()) {
                    return Err(StreamError::mixing(
                        MixStage::Envelope,
                        "saturated-liquid enthalpies are not finite",
                    ));
                }
                if !envelope.is_liquid_branch_ascending() {
                    return Err(StreamError::mixing(
                        MixStage::Envelope,
                        "saturated-liquid enthalpies are not ascending",
                    ));
                }
                Ok(envelope)
            }
        }
    }
}

/// Mix two streams with the default configuration.
pub fn combine(engine: &dyn PropertyEngine, a: &Stream, b: &Stream) -> StreamResult<Stream> {
    Mixer::new(engine).combine(a, b)
}

/// Mix any number of streams left to right with the default configuration.
pub fn combine_all<'s, I>(engine: &dyn PropertyEngine, streams: I) -> StreamResult<Stream>
where
    I: IntoIterator<Item = &'s Stream>,
{
    Mixer::new(engine).combine_all(streams)
}
