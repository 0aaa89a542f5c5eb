//! Phase envelope (saturation curve) data.

use crate::error::{FluidError, FluidResult};
use sf_core::units::{MolarEnthalpy, Temperature, k};

/// One saturation point: bubble temperature at a pressure, with the molar
/// enthalpies of the saturated liquid and vapor branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePoint {
    /// Saturation temperature [K]
    pub temperature: f64,
    /// Saturation pressure [Pa]
    pub pressure: f64,
    /// Saturated-liquid molar enthalpy [J/mol]
    pub h_liquid: MolarEnthalpy,
    /// Saturated-vapor molar enthalpy [J/mol]
    pub h_vapor: MolarEnthalpy,
}

impl EnvelopePoint {
    fn is_finite(&self) -> bool {
        self.temperature.is_finite()
            && self.pressure.is_finite()
            && self.h_liquid.is_finite()
            && self.h_vapor.is_finite()
    }
}

/// Saturation curve of a fixed composition, stored column-wise.
///
/// Index `i` across every column describes the same saturation point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseEnvelope {
    pub temperatures: Vec<f64>,
    pub pressures: Vec<f64>,
    pub liquid_molar_enthalpies: Vec<MolarEnthalpy>,
    pub vapor_molar_enthalpies: Vec<MolarEnthalpy>,
}

impl PhaseEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            temperatures: Vec::with_capacity(n),
            pressures: Vec::with_capacity(n),
            liquid_molar_enthalpies: Vec::with_capacity(n),
            vapor_molar_enthalpies: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, point: EnvelopePoint) {
        self.temperatures.push(point.temperature);
        self.pressures.push(point.pressure);
        self.liquid_molar_enthalpies.push(point.h_liquid);
        self.vapor_molar_enthalpies.push(point.h_vapor);
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// Point at `index`, if the columns are long enough.
    pub fn point(&self, index: usize) -> Option<EnvelopePoint> {
        Some(EnvelopePoint {
            temperature: *self.temperatures.get(index)?,
            pressure: *self.pressures.get(index)?,
            h_liquid: *self.liquid_molar_enthalpies.get(index)?,
            h_vapor: *self.vapor_molar_enthalpies.get(index)?,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = EnvelopePoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }

    /// Saturation temperature at `index` as a typed quantity.
    pub fn temperature_at(&self, index: usize) -> Option<Temperature> {
        self.temperatures.get(index).map(|&t| k(t))
    }

    /// Check that every column has the same length.
    pub fn validate(&self) -> FluidResult<()> {
        let n = self.temperatures.len();
        if self.pressures.len() != n
            || self.liquid_molar_enthalpies.len() != n
            || self.vapor_molar_enthalpies.len() != n
        {
            return Err(FluidError::InvalidArg {
                what: "phase envelope columns have different lengths",
            });
        }
        Ok(())
    }

    /// True when the saturated-liquid enthalpy column is non-decreasing.
    pub fn is_liquid_branch_ascending(&self) -> bool {
        self.liquid_molar_enthalpies
            .windows(2)
            .all(|w| w[0] <= w[1])
    }

    /// Copy of the envelope with non-finite points dropped and points ordered by
    /// ascending saturated-liquid enthalpy. Equal enthalpies keep their original
    /// relative order.
    pub fn sorted_by_liquid_enthalpy(&self) -> PhaseEnvelope {
        let mut points: Vec<EnvelopePoint> = self.points().filter(|p| p.is_finite()).collect();
        let dropped = self.len() - points.len();
        if dropped > 0 {
            tracing::warn!(dropped, "discarding non-finite phase envelope points");
        }
        points.sort_by(|a, b| a.h_liquid.total_cmp(&b.h_liquid));

        let mut sorted = PhaseEnvelope::with_capacity(points.len());
        for point in points {
            sorted.push(point);
        }
        sorted
    }
}

impl FromIterator<EnvelopePoint> for PhaseEnvelope {
    fn from_iter<I: IntoIterator<Item = EnvelopePoint>>(iter: I) -> Self {
        let mut envelope = PhaseEnvelope::new();
        for point in iter {
            envelope.push(point);
        }
        envelope
    }
}
