//! CoolProp-based mixture property engine.

use crate::engine::{EngineState, Phase, PointProperties, PropertyEngine, validation};
use crate::envelope::{EnvelopePoint, PhaseEnvelope};
use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use crate::sweeps::PressureSweep;
use rfluids::io::{FluidInputPair, FluidParam};
use rfluids::native::AbstractState;
use sf_core::units::{Pressure, Temperature, kg_per_m3, mol_per_m3, pa_s, w_per_m_k};

/// CoolProp backend for mixture properties.
///
/// Component names are resolved through [`Species`] and joined into a CoolProp
/// mixture string (`"Water&Ethanol"`). Each [`create_state`](PropertyEngine::create_state)
/// call builds its own `AbstractState`, so the engine itself is stateless.
///
/// The phase envelope is traced by bubble (Q=0) and dew (Q=1) flashes along a
/// [`PressureSweep`]; pressures where either flash fails are skipped.
pub struct CoolPropEngine {
    backend: String,
    sweep: PressureSweep,
}

impl CoolPropEngine {
    /// Create an engine on the Helmholtz-energy (`HEOS`) backend.
    pub fn new() -> Self {
        Self {
            backend: "HEOS".to_string(),
            sweep: PressureSweep::default(),
        }
    }

    /// Select a different CoolProp backend (e.g. `"PR"` or `"SRK"`).
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Use a custom pressure grid for envelope tracing.
    pub fn with_sweep(mut self, sweep: PressureSweep) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Resolve a composition key to a CoolProp fluid name.
    fn resolve(name: &str) -> FluidResult<&'static str> {
        name.parse::<Species>()
            .map(|s| s.coolprop_name())
            .map_err(|_| FluidError::Composition {
                species: name.to_string(),
            })
    }
}

impl Default for CoolPropEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyEngine for CoolPropEngine {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn supports_component(&self, name: &str) -> bool {
        Self::resolve(name).is_ok()
    }

    fn create_state(&self, components: &[&str]) -> FluidResult<Box<dyn EngineState>> {
        if components.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "no components",
            });
        }

        let names = components
            .iter()
            .map(|c| Self::resolve(c))
            .collect::<FluidResult<Vec<_>>>()?;
        let fluid = names.join("&");

        let inner = AbstractState::new(&self.backend, &fluid).map_err(|e| FluidError::Backend {
            message: format!("CoolProp rejected '{fluid}' on {}: {e}", self.backend),
        })?;

        Ok(Box::new(CoolPropState {
            inner,
            components: components.iter().map(|c| c.to_string()).collect(),
            fractions_set: false,
            sweep: self.sweep.clone(),
        }))
    }
}

struct CoolPropState {
    inner: AbstractState,
    components: Vec<String>,
    fractions_set: bool,
    sweep: PressureSweep,
}

impl CoolPropState {
    fn output(&self, param: FluidParam, property: &'static str) -> FluidResult<f64> {
        self.inner
            .keyed_output(param)
            .map_err(|e| FluidError::PropertyEvaluation {
                property,
                message: e.to_string(),
            })
    }

    /// Optional output: failures are logged and reported as absent.
    fn optional_output(&self, param: FluidParam, property: &'static str) -> Option<f64> {
        match self.output(param, property) {
            Ok(v) if v.is_finite() => Some(v),
            Ok(v) => {
                tracing::debug!(property, value = v, "optional property not finite");
                None
            }
            Err(err) => {
                tracing::debug!(property, %err, "optional property unavailable");
                None
            }
        }
    }

    fn ensure_fractions(&self) -> FluidResult<()> {
        if self.fractions_set {
            Ok(())
        } else {
            Err(FluidError::InvalidArg {
                what: "mole fractions not set",
            })
        }
    }

    /// Bubble and dew flash at one pressure.
    fn saturation_point(&mut self, p_pa: f64) -> FluidResult<EnvelopePoint> {
        self.inner
            .update(FluidInputPair::PQ, p_pa, 0.0)
            .map_err(|e| FluidError::Backend {
                message: format!("bubble point at P={p_pa} Pa: {e}"),
            })?;
        let temperature = validation::required_positive(
            "bubble temperature",
            self.output(FluidParam::T, "bubble temperature")?,
        )?;
        let h_liquid = validation::required(
            "saturated liquid enthalpy",
            self.output(FluidParam::HMolar, "saturated liquid enthalpy")?,
        )?;

        self.inner
            .update(FluidInputPair::PQ, p_pa, 1.0)
            .map_err(|e| FluidError::Backend {
                message: format!("dew point at P={p_pa} Pa: {e}"),
            })?;
        let h_vapor = validation::required(
            "saturated vapor enthalpy",
            self.output(FluidParam::HMolar, "saturated vapor enthalpy")?,
        )?;

        Ok(EnvelopePoint {
            temperature,
            pressure: p_pa,
            h_liquid,
            h_vapor,
        })
    }
}

impl EngineState for CoolPropState {
    fn components(&self) -> &[String] {
        &self.components
    }

    fn set_fractions(&mut self, fractions: &[f64]) -> FluidResult<()> {
        validation::validate_fractions(&self.components, fractions)?;
        // Pure fluids carry no composition vector in CoolProp.
        if self.components.len() > 1 {
            self.inner
                .set_fractions(fractions)
                .map_err(|e| FluidError::Backend {
                    message: format!("CoolProp rejected mole fractions: {e}"),
                })?;
        }
        self.fractions_set = true;
        Ok(())
    }

    fn evaluate(&mut self, p: Pressure, t: Temperature) -> FluidResult<PointProperties> {
        self.ensure_fractions()?;
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;

        let (p_pa, t_k) = (p.value, t.value);
        self.inner
            .update(FluidInputPair::PT, p_pa, t_k)
            .map_err(|e| FluidError::PropertyEvaluation {
                property: "state",
                message: format!("PT flash at P={p_pa} Pa, T={t_k} K: {e}"),
            })?;

        let phase = Phase::from_coolprop_index(self.output(FluidParam::Phase, "phase")?);
        let vapor_quality = self
            .optional_output(FluidParam::Q, "vapor quality")
            .filter(|q| (0.0..=1.0).contains(q));

        let d_mass = validation::required_positive(
            "mass density",
            self.output(FluidParam::DMass, "mass density")?,
        )?;
        let d_molar = validation::required_positive(
            "molar density",
            self.output(FluidParam::DMolar, "molar density")?,
        )?;
        let h_mass = validation::required(
            "mass enthalpy",
            self.output(FluidParam::HMass, "mass enthalpy")?,
        )?;
        let h_molar = validation::required(
            "molar enthalpy",
            self.output(FluidParam::HMolar, "molar enthalpy")?,
        )?;
        let cp_mass = validation::required_positive(
            "mass heat capacity",
            self.output(FluidParam::CpMass, "mass heat capacity")?,
        )?;
        let cp_molar = validation::required_positive(
            "molar heat capacity",
            self.output(FluidParam::CpMolar, "molar heat capacity")?,
        )?;

        let viscosity = self
            .optional_output(FluidParam::DynamicViscosity, "viscosity")
            .map(pa_s);
        let thermal_conductivity = self
            .optional_output(FluidParam::Conductivity, "thermal conductivity")
            .map(w_per_m_k);

        Ok(PointProperties {
            phase,
            vapor_quality,
            mass_density: kg_per_m3(d_mass),
            molar_density: mol_per_m3(d_molar),
            h_mass,
            h_molar,
            cp_mass,
            cp_molar,
            viscosity,
            thermal_conductivity,
        })
    }

    fn build_phase_envelope(&mut self) -> FluidResult<PhaseEnvelope> {
        self.ensure_fractions()?;

        let pressures = self.sweep.points();
        let mut envelope = PhaseEnvelope::with_capacity(pressures.len());
        for p_pa in pressures {
            match self.saturation_point(p_pa) {
                Ok(point) => envelope.push(point),
                Err(err) => tracing::debug!(p_pa, %err, "skipping saturation point"),
            }
        }

        if envelope.is_empty() {
            return Err(FluidError::PropertyEvaluation {
                property: "phase envelope",
                message: format!(
                    "no saturation point converged for {}",
                    self.components.join("&")
                ),
            });
        }
        Ok(envelope)
    }
}
