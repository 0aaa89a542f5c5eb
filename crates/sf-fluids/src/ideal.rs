//! Ideal-mixture property engine.
//!
//! A deterministic, closed-form engine for condensable organics and water:
//!
//! - Vapor pressure from Clausius-Clapeyron anchored at the normal boiling point
//! - Bubble/dew points from Raoult's law
//! - Constant-cp enthalpies, liquid datum at 298.15 K, vaporization at each
//!   component's normal boiling point
//! - Ideal-volume liquid density, ideal-gas vapor density
//! - Liquid-only transport properties (absent for vapor and two-phase states)
//!
//! It is not a substitute for a real equation of state. It exists so stream
//! arithmetic can be exercised and reproduced without a native backend.

use crate::engine::{EngineState, Phase, PointProperties, PropertyEngine, validation};
use crate::envelope::{EnvelopePoint, PhaseEnvelope};
use crate::error::{FluidError, FluidResult};
use crate::species::Species;
use crate::sweeps::PressureSweep;
use sf_core::units::constants::{P_ATM_PA, R_UNIVERSAL, T_REF_K};
use sf_core::units::{Pressure, Temperature, kg_per_m3, mol_per_m3, pa_s, w_per_m_k};

// Temperature search bounds [K]
const T_MIN: f64 = 50.0;
const T_MAX: f64 = 2000.0;
const MAX_ITER: usize = 200;
const T_TOL: f64 = 1e-9;

/// Pure-component constants used by [`IdealMixtureEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealComponent {
    /// Molar mass [kg/mol]
    pub molar_mass: f64,
    /// Normal boiling point [K]
    pub t_boil: f64,
    /// Heat of vaporization at `t_boil` [J/mol]
    pub h_vap: f64,
    /// Liquid heat capacity [J/(mol·K)]
    pub cp_liquid: f64,
    /// Ideal-gas heat capacity [J/(mol·K)]
    pub cp_vapor: f64,
    /// Liquid molar density near 298 K [mol/m³]
    pub liquid_molar_density: f64,
    /// Liquid viscosity near 298 K [Pa·s]
    pub liquid_viscosity: f64,
    /// Liquid thermal conductivity near 298 K [W/(m·K)]
    pub liquid_conductivity: f64,
}

impl IdealComponent {
    /// Constants for condensable species; `None` for permanent gases.
    pub fn for_species(species: Species) -> Option<Self> {
        let (t_boil, h_vap, cp_liquid, cp_vapor, rho_n, mu, k_th) = match species {
            Species::Water => (373.15, 40_660.0, 75.3, 33.6, 55_345.0, 8.9e-4, 0.607),
            Species::Acetone => (329.2, 29_100.0, 125.5, 75.0, 13_507.0, 3.06e-4, 0.161),
            Species::Ethanol => (351.4, 38_560.0, 112.3, 65.6, 17_126.0, 1.074e-3, 0.171),
            Species::Methanol => (337.8, 35_210.0, 81.1, 44.1, 24_719.0, 5.44e-4, 0.203),
            Species::Benzene => (353.2, 30_720.0, 136.0, 82.4, 11_215.0, 6.04e-4, 0.141),
            Species::Toluene => (383.8, 33_180.0, 157.3, 103.7, 9_410.0, 5.6e-4, 0.131),
            Species::NHexane => (341.9, 28_850.0, 195.6, 143.1, 7_600.0, 3.0e-4, 0.120),
            Species::NHeptane => (371.6, 31_770.0, 224.7, 166.0, 6_826.0, 3.9e-4, 0.123),
            _ => return None,
        };
        Some(Self {
            molar_mass: species.molar_mass() / 1000.0,
            t_boil,
            h_vap,
            cp_liquid,
            cp_vapor,
            liquid_molar_density: rho_n,
            liquid_viscosity: mu,
            liquid_conductivity: k_th,
        })
    }

    /// Saturation pressure [Pa] at `t_k`.
    pub fn vapor_pressure(&self, t_k: f64) -> f64 {
        P_ATM_PA * (-(self.h_vap / R_UNIVERSAL) * (1.0 / t_k - 1.0 / self.t_boil)).exp()
    }

    /// Liquid molar enthalpy [J/mol] relative to liquid at 298.15 K.
    pub fn h_liquid(&self, t_k: f64) -> f64 {
        self.cp_liquid * (t_k - T_REF_K)
    }

    /// Vapor molar enthalpy [J/mol], same datum as [`h_liquid`](Self::h_liquid).
    pub fn h_vapor(&self, t_k: f64) -> f64 {
        self.h_liquid(self.t_boil) + self.h_vap + self.cp_vapor * (t_k - self.t_boil)
    }
}

/// Deterministic Raoult's-law mixture engine.
#[derive(Debug, Clone, Default)]
pub struct IdealMixtureEngine {
    sweep: PressureSweep,
}

impl IdealMixtureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom pressure grid for envelope tracing.
    pub fn with_sweep(mut self, sweep: PressureSweep) -> Self {
        self.sweep = sweep;
        self
    }

    fn resolve(name: &str) -> FluidResult<IdealComponent> {
        name.parse::<Species>()
            .ok()
            .and_then(IdealComponent::for_species)
            .ok_or_else(|| FluidError::Composition {
                species: name.to_string(),
            })
    }
}

impl PropertyEngine for IdealMixtureEngine {
    fn name(&self) -> &str {
        "IdealMixture"
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
        let data = components
            .iter()
            .map(|c| Self::resolve(c))
            .collect::<FluidResult<Vec<_>>>()?;

        Ok(Box::new(IdealState {
            components: components.iter().map(|c| c.to_string()).collect(),
            data,
            x: None,
            sweep: self.sweep.clone(),
        }))
    }
}

struct IdealState {
    components: Vec<String>,
    data: Vec<IdealComponent>,
    /// Normalized mole fractions.
    x: Option<Vec<f64>>,
    sweep: PressureSweep,
}

impl IdealState {
    fn x(&self) -> FluidResult<&[f64]> {
        self.x.as_deref().ok_or(FluidError::InvalidArg {
            what: "mole fractions not set",
        })
    }

    /// Σ x_i · f(component_i)
    fn weighted(&self, x: &[f64], f: impl Fn(&IdealComponent) -> f64) -> f64 {
        self.data.iter().zip(x).map(|(c, xi)| xi * f(c)).sum()
    }

    /// Bubble temperature: Σ x_i Psat_i(T) = P.
    fn bubble_temperature(&self, x: &[f64], p_pa: f64) -> FluidResult<f64> {
        bisect(
            |t| (self.weighted(x, |c| c.vapor_pressure(t)) / p_pa).ln(),
            "bubble temperature",
        )
    }

    /// Dew temperature: Σ x_i / Psat_i(T) = 1 / P.
    fn dew_temperature(&self, x: &[f64], p_pa: f64) -> FluidResult<f64> {
        bisect(
            |t| -(p_pa * self.weighted(x, |c| 1.0 / c.vapor_pressure(t))).ln(),
            "dew temperature",
        )
    }

    fn liquid_molar_density(&self, x: &[f64]) -> f64 {
        1.0 / self.weighted(x, |c| 1.0 / c.liquid_molar_density)
    }
}

/// Bisection over [T_MIN, T_MAX] for the sign change of `f`.
fn bisect(f: impl Fn(f64) -> f64, what: &'static str) -> FluidResult<f64> {
    let mut t_low = T_MIN;
    let mut t_high = T_MAX;

    let f_low = f(t_low);
    let f_high = f(t_high);
    if !f_low.is_finite() || !f_high.is_finite() || (f_low < 0.0) == (f_high < 0.0) {
        return Err(FluidError::OutOfRange { what });
    }
    let rising = f_low < 0.0;

    for _ in 0..MAX_ITER {
        let t_mid = 0.5 * (t_low + t_high);
        let f_mid = f(t_mid);
        if !f_mid.is_finite() {
            return Err(FluidError::ConvergenceFailed { what });
        }
        if f_mid == 0.0 || t_high - t_low < T_TOL {
            return Ok(t_mid);
        }
        if (f_mid < 0.0) == rising {
            t_low = t_mid;
        } else {
            t_high = t_mid;
        }
    }

    Ok(0.5 * (t_low + t_high))
}

impl EngineState for IdealState {
    fn components(&self) -> &[String] {
        &self.components
    }

    fn set_fractions(&mut self, fractions: &[f64]) -> FluidResult<()> {
        validation::validate_fractions(&self.components, fractions)?;
        let sum: f64 = fractions.iter().sum();
        self.x = Some(fractions.iter().map(|f| f / sum).collect());
        Ok(())
    }

    fn evaluate(&mut self, p: Pressure, t: Temperature) -> FluidResult<PointProperties> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        let x = self.x()?;
        let (p_pa, t_k) = (p.value, t.value);

        let t_bubble = self.bubble_temperature(x, p_pa)?;
        let t_dew = self.dew_temperature(x, p_pa)?;

        let (phase, quality) = if t_k < t_bubble {
            (Phase::Liquid, None)
        } else if t_k > t_dew {
            (Phase::Gas, None)
        } else if t_dew - t_bubble > T_TOL {
            (Phase::TwoPhase, Some((t_k - t_bubble) / (t_dew - t_bubble)))
        } else {
            (Phase::TwoPhase, Some(0.0))
        };
        let q = quality.unwrap_or(if phase == Phase::Gas { 1.0 } else { 0.0 });

        let molar_mass = self.weighted(x, |c| c.molar_mass);
        let h_liq = self.weighted(x, |c| c.h_liquid(t_k));
        let h_vap = self.weighted(x, |c| c.h_vapor(t_k));
        let cp_liq = self.weighted(x, |c| c.cp_liquid);
        let cp_vap = self.weighted(x, |c| c.cp_vapor);
        let rho_liq = self.liquid_molar_density(x);
        let rho_vap = p_pa / (R_UNIVERSAL * t_k);

        let h_molar = validation::required("molar enthalpy", (1.0 - q) * h_liq + q * h_vap)?;
        let cp_molar =
            validation::required_positive("molar heat capacity", (1.0 - q) * cp_liq + q * cp_vap)?;
        let d_molar = validation::required_positive(
            "molar density",
            1.0 / ((1.0 - q) / rho_liq + q / rho_vap),
        )?;

        let (viscosity, thermal_conductivity) = if phase == Phase::Liquid {
            let ln_mu = self.weighted(x, |c| c.liquid_viscosity.ln());
            let k_th = self.weighted(x, |c| c.liquid_conductivity);
            (Some(pa_s(ln_mu.exp())), Some(w_per_m_k(k_th)))
        } else {
            tracing::debug!(phase = phase.label(), "transport properties undefined");
            (None, None)
        };

        Ok(PointProperties {
            phase,
            vapor_quality: quality,
            mass_density: kg_per_m3(d_molar * molar_mass),
            molar_density: mol_per_m3(d_molar),
            h_mass: h_molar / molar_mass,
            h_molar,
            cp_mass: cp_molar / molar_mass,
            cp_molar,
            viscosity,
            thermal_conductivity,
        })
    }

    fn build_phase_envelope(&mut self) -> FluidResult<PhaseEnvelope> {
        let x = self.x()?;

        let pressures = self.sweep.points();
        let mut envelope = PhaseEnvelope::with_capacity(pressures.len());
        for p_pa in pressures {
            let point = self.bubble_temperature(x, p_pa).and_then(|t_bubble| {
                let t_dew = self.dew_temperature(x, p_pa)?;
                Ok(EnvelopePoint {
                    temperature: t_bubble,
                    pressure: p_pa,
                    h_liquid: self.weighted(x, |c| c.h_liquid(t_bubble)),
                    h_vapor: self.weighted(x, |c| c.h_vapor(t_dew)),
                })
            });
            match point {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;
    use sf_core::units::{k, pa};

    fn water() -> Composition {
        Composition::pure("Water")
    }

    #[test]
    fn water_boils_at_normal_boiling_point() {
        let engine = IdealMixtureEngine::new();
        let envelope = engine
            .phase_envelope(&water())
            .expect("water envelope should build");
        let state = IdealState {
            components: vec!["Water".into()],
            data: vec![IdealComponent::for_species(Species::Water).unwrap()],
            x: Some(vec![1.0]),
            sweep: PressureSweep::default(),
        };
        let t_b = state.bubble_temperature(&[1.0], P_ATM_PA).unwrap();
        assert!((t_b - 373.15).abs() < 1e-6, "t_b = {t_b}");
        assert_eq!(envelope.len(), 60);
    }

    #[test]
    fn subcooled_water_is_liquid_with_transport() {
        let engine = IdealMixtureEngine::new();
        let props = engine.evaluate(&water(), pa(101_325.0), k(300.0)).unwrap();

        assert_eq!(props.phase, Phase::Liquid);
        assert_eq!(props.vapor_quality, None);
        assert!((props.h_molar - 75.3 * (300.0 - T_REF_K)).abs() < 1e-9);
        assert!(props.mass_density.value > 900.0 && props.mass_density.value < 1100.0);
        assert!(props.viscosity.is_some());
        assert!(props.thermal_conductivity.is_some());
    }

    #[test]
    fn superheated_water_is_ideal_gas_without_transport() {
        let engine = IdealMixtureEngine::new();
        let props = engine.evaluate(&water(), pa(101_325.0), k(400.0)).unwrap();

        assert_eq!(props.phase, Phase::Gas);
        let expected = 101_325.0 / (R_UNIVERSAL * 400.0);
        assert!((props.molar_density.value - expected).abs() / expected < 1e-12);
        assert_eq!(props.viscosity, None);
        assert_eq!(props.thermal_conductivity, None);
    }

    #[test]
    fn binary_between_bubble_and_dew_is_two_phase() {
        let engine = IdealMixtureEngine::new();
        let comp = Composition::new([("Water", 0.5), ("Acetone", 0.5)]).unwrap();
        // Bubble point sits near acetone's boiling point, dew point near water's.
        let props = engine.evaluate(&comp, pa(101_325.0), k(350.0)).unwrap();

        assert_eq!(props.phase, Phase::TwoPhase);
        let q = props.vapor_quality.expect("two-phase state has a quality");
        assert!(q > 0.0 && q < 1.0, "q = {q}");
        assert_eq!(props.viscosity, None);
    }

    #[test]
    fn liquid_branch_is_ascending() {
        let engine = IdealMixtureEngine::new();
        let comp = Composition::new([("Water", 0.7), ("Ethanol", 0.3)]).unwrap();
        let envelope = engine.phase_envelope(&comp).unwrap();

        assert!(envelope.validate().is_ok());
        assert!(envelope.is_liquid_branch_ascending());
        assert!(envelope.temperatures.windows(2).all(|w| w[0] < w[1]));
        for point in envelope.points() {
            assert!(point.h_vapor > point.h_liquid);
        }
    }

    #[test]
    fn permanent_gas_is_rejected() {
        let engine = IdealMixtureEngine::new();
        assert!(!engine.supports_component("N2"));
        let result = engine.create_state(&["Water", "N2"]);
        assert!(matches!(
            result,
            Err(FluidError::Composition { ref species }) if species == "N2"
        ));
    }

    #[test]
    fn evaluate_requires_fractions() {
        let engine = IdealMixtureEngine::new();
        let mut handle = engine.create_state(&["Water"]).unwrap();
        let result = handle.evaluate(pa(101_325.0), k(300.0));
        assert!(matches!(result, Err(FluidError::InvalidArg { .. })));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let engine = IdealMixtureEngine::new();
        let comp = Composition::new([("Water", 0.7), ("Acetone", 0.3)]).unwrap();
        let a = engine.evaluate(&comp, pa(4e5), k(391.0)).unwrap();
        let b = engine.evaluate(&comp, pa(4e5), k(391.0)).unwrap();
        assert_eq!(a, b);
    }
}
