//! Property engine traits and the point-property record they produce.

use crate::composition::Composition;
use crate::envelope::PhaseEnvelope;
use crate::error::{FluidError, FluidResult};
use sf_core::units::{
    Density, DynVisc, MolarDensity, MolarEnthalpy, MolarHeatCapacity, Pressure, SpecEnthalpy,
    SpecHeatCapacity, Temperature, ThermalCond,
};

/// Phase reported by an engine for a (P, T) point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Liquid,
    Gas,
    TwoPhase,
    Supercritical,
    SupercriticalGas,
    SupercriticalLiquid,
    CriticalPoint,
    Unknown,
}

impl Phase {
    /// Decode CoolProp's numeric phase index (`iPhase`).
    pub fn from_coolprop_index(index: f64) -> Self {
        if !index.is_finite() {
            return Phase::Unknown;
        }
        match index.round() as i64 {
            0 => Phase::Liquid,
            1 => Phase::Supercritical,
            2 => Phase::SupercriticalGas,
            3 => Phase::SupercriticalLiquid,
            4 => Phase::CriticalPoint,
            5 => Phase::Gas,
            6 => Phase::TwoPhase,
            _ => Phase::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Liquid => "liquid",
            Phase::Gas => "gas",
            Phase::TwoPhase => "two-phase",
            Phase::Supercritical => "supercritical",
            Phase::SupercriticalGas => "supercritical gas",
            Phase::SupercriticalLiquid => "supercritical liquid",
            Phase::CriticalPoint => "critical point",
            Phase::Unknown => "unknown",
        }
    }
}

/// Everything an engine reports for a single (P, T) evaluation.
///
/// Transport properties are optional: backends leave them `None` when they are
/// undefined for the resolved phase instead of failing the evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct PointProperties {
    pub phase: Phase,
    /// Vapor mole fraction, when the state is inside the two-phase dome.
    pub vapor_quality: Option<f64>,
    pub mass_density: Density,
    pub molar_density: MolarDensity,
    /// [J/kg]
    pub h_mass: SpecEnthalpy,
    /// [J/mol]
    pub h_molar: MolarEnthalpy,
    /// [J/(kg·K)]
    pub cp_mass: SpecHeatCapacity,
    /// [J/(mol·K)]
    pub cp_molar: MolarHeatCapacity,
    pub viscosity: Option<DynVisc>,
    pub thermal_conductivity: Option<ThermalCond>,
}

impl PointProperties {
    /// Return a summary string of all contained properties (for debugging).
    pub fn summary(&self) -> String {
        let opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |x| format!("{x:.3e}"));
        format!(
            "Props({},ρ={:.3}kg/m³,ρn={:.1}mol/m³,h={:.1}J/mol,cp={:.2}J/mol·K,μ={},k={})",
            self.phase.label(),
            self.mass_density.value,
            self.molar_density.value,
            self.h_molar,
            self.cp_molar,
            opt(self.viscosity.map(|v| v.value)),
            opt(self.thermal_conductivity.map(|v| v.value)),
        )
    }
}

/// A per-composition evaluation handle handed out by a [`PropertyEngine`].
///
/// The handle is created for an ordered list of components; fractions must be
/// set (aligned with that list) before evaluating.
pub trait EngineState {
    /// Component names this handle was created for, in vector order.
    fn components(&self) -> &[String];

    /// Set the mole-fraction vector.
    fn set_fractions(&mut self, fractions: &[f64]) -> FluidResult<()>;

    /// Evaluate the mixture at pressure and temperature.
    ///
    /// Fails with [`FluidError::PropertyEvaluation`] when any required property
    /// cannot be produced. Viscosity and conductivity are reported as `None`
    /// instead of failing.
    fn evaluate(&mut self, p: Pressure, t: Temperature) -> FluidResult<PointProperties>;

    /// Build the saturation curve (bubble and dew branches) for the current fractions.
    fn build_phase_envelope(&mut self) -> FluidResult<PhaseEnvelope>;
}

/// Trait for mixture property engines.
///
/// Implementations must be thread-safe (Send + Sync); each call creates a fresh
/// handle so nothing is shared between evaluations.
pub trait PropertyEngine: Send + Sync {
    /// Get the engine name (for debugging/logging).
    fn name(&self) -> &str;

    /// Create an evaluation handle for the given components.
    ///
    /// Fails with [`FluidError::Composition`] naming the first component the
    /// engine cannot resolve.
    fn create_state(&self, components: &[&str]) -> FluidResult<Box<dyn EngineState>>;

    /// Check whether the engine resolves a single component name.
    fn supports_component(&self, name: &str) -> bool {
        self.create_state(&[name]).is_ok()
    }

    /// Create a handle for `comp` with its fractions already applied.
    fn prepare(&self, comp: &Composition) -> FluidResult<Box<dyn EngineState>> {
        let names: Vec<&str> = comp.names().collect();
        let mut handle = self.create_state(&names)?;
        handle.set_fractions(&comp.fractions())?;
        Ok(handle)
    }

    /// One-shot point evaluation of a composition at (P, T).
    fn evaluate(
        &self,
        comp: &Composition,
        p: Pressure,
        t: Temperature,
    ) -> FluidResult<PointProperties> {
        self.prepare(comp)?.evaluate(p, t)
    }

    /// One-shot phase envelope for a composition.
    fn phase_envelope(&self, comp: &Composition) -> FluidResult<PhaseEnvelope> {
        self.prepare(comp)?.build_phase_envelope()
    }
}

/// Validation helpers shared by the engines.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure the fraction vector matches the component list.
    pub fn validate_fractions(components: &[String], fractions: &[f64]) -> FluidResult<()> {
        if fractions.len() != components.len() {
            return Err(FluidError::InvalidArg {
                what: "fraction vector length does not match components",
            });
        }
        if fractions.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(FluidError::NonPhysical {
                what: "mole fractions must be finite and non-negative",
            });
        }
        if fractions.iter().sum::<f64>() <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "mole fractions sum to zero",
            });
        }
        Ok(())
    }

    /// A required output must be finite.
    pub fn required(property: &'static str, value: f64) -> FluidResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FluidError::PropertyEvaluation {
                property,
                message: format!("non-finite value {value}"),
            })
        }
    }

    /// A required output must be finite and strictly positive.
    pub fn required_positive(property: &'static str, value: f64) -> FluidResult<f64> {
        let value = required(property, value)?;
        if value <= 0.0 {
            return Err(FluidError::PropertyEvaluation {
                property,
                message: format!("non-positive value {value}"),
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;
    use sf_core::units::{k, kg_per_m3, mol_per_m3, pa, pa_s};

    fn vapor_point() -> PointProperties {
        PointProperties {
            phase: Phase::Gas,
            vapor_quality: None,
            mass_density: kg_per_m3(0.59),
            molar_density: mol_per_m3(32.7),
            h_mass: 2.67e6,
            h_molar: 48_100.0,
            cp_mass: 2080.0,
            cp_molar: 37.5,
            viscosity: None,
            thermal_conductivity: None,
        }
    }

    #[test]
    fn summary_marks_missing_transport_properties() {
        let summary = vapor_point().summary();
        let prefix = format!("Props({}", Phase::Gas.label());
        assert!(summary.starts_with(&prefix));
        assert!(summary.contains("h=48100.0J/mol"));
        assert!(summary.contains("μ=-"));
        assert!(summary.contains("k=-"));

        let liquid = PointProperties {
            viscosity: Some(pa_s(2.8e-4)),
            ..vapor_point()
        };
        assert!(liquid.summary().contains("μ=2.800e-4"));
    }

    #[test]
    fn coolprop_phase_indices() {
        assert_eq!(Phase::from_coolprop_index(0.0), Phase::Liquid);
        assert_eq!(Phase::from_coolprop_index(5.0), Phase::Gas);
        assert_eq!(Phase::from_coolprop_index(6.0), Phase::TwoPhase);
        assert_eq!(Phase::from_coolprop_index(8.0), Phase::Unknown);
        assert_eq!(Phase::from_coolprop_index(f64::NAN), Phase::Unknown);
    }

    #[test]
    fn validate_positive_pressure() {
        assert!(validate_pressure(pa(101325.0)).is_ok());
        assert!(validate_pressure(pa(-100.0)).is_err());
        assert!(validate_pressure(pa(0.0)).is_err());
        assert!(validate_pressure(pa(f64::NAN)).is_err());
    }

    #[test]
    fn validate_positive_temperature() {
        assert!(validate_temperature(k(300.0)).is_ok());
        assert!(validate_temperature(k(-10.0)).is_err());
        assert!(validate_temperature(k(0.0)).is_err());
    }

    #[test]
    fn validate_fraction_vector() {
        let comps = vec!["Water".to_string(), "Ethanol".to_string()];
        assert!(validate_fractions(&comps, &[0.5, 0.5]).is_ok());
        assert!(validate_fractions(&comps, &[1.0]).is_err());
        assert!(validate_fractions(&comps, &[0.0, 0.0]).is_err());
        assert!(validate_fractions(&comps, &[0.5, f64::NAN]).is_err());
    }

    #[test]
    fn required_outputs() {
        assert_eq!(required("h", -12.5).unwrap(), -12.5);
        assert!(matches!(
            required("h", f64::NAN),
            Err(FluidError::PropertyEvaluation { property: "h", .. })
        ));
        assert!(required_positive("rho", 0.0).is_err());
    }
}
