//! Pressure grids for envelope construction.
//!
//! Engines that trace the saturation curve point by point (bubble/dew flashes
//! at fixed pressure) walk one of these grids.

use crate::error::{FluidError, FluidResult};

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Pressure range walked when building a phase envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureSweep {
    /// First pressure [Pa]
    pub start_pa: f64,
    /// Last pressure [Pa]
    pub end_pa: f64,
    /// Number of points to generate
    pub num_points: usize,
    /// Spacing type
    pub sweep_type: SweepType,
}

impl PressureSweep {
    /// Create a sweep, validating bounds and point count.
    pub fn new(
        start_pa: f64,
        end_pa: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> FluidResult<Self> {
        if !start_pa.is_finite() || !end_pa.is_finite() || start_pa <= 0.0 || end_pa <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "sweep pressures must be positive and finite",
            });
        }
        if num_points < 2 {
            return Err(FluidError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if (start_pa - end_pa).abs() < 1e-12 {
            return Err(FluidError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        Ok(Self {
            start_pa,
            end_pa,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep.
    pub fn points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_pa];
        }

        let delta = (self.end_pa - self.start_pa) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start_pa + i as f64 * delta)
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end_pa;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_pa];
        }

        let log_start = self.start_pa.ln();
        let log_delta = (self.end_pa.ln() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();

        points[0] = self.start_pa;
        points[self.num_points - 1] = self.end_pa;
        points
    }
}

impl Default for PressureSweep {
    /// 1 kPa to 10 MPa, 60 log-spaced points.
    fn default() -> Self {
        Self {
            start_pa: 1e3,
            end_pa: 1e7,
            num_points: 60,
            sweep_type: SweepType::Logarithmic,
        }
    }
}
