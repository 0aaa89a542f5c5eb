//! sf-fluids: mixture property evaluation for streamflow.
//!
//! Provides:
//! - Species catalog (names the engines understand)
//! - Composition handling (ordered mole fractions keyed by component name)
//! - Stream state (temperature, pressure, molar flow)
//! - `PropertyEngine` / `EngineState` traits for point evaluation and phase envelopes
//! - CoolProp backend (via `rfluids`) and a deterministic ideal-mixture backend
//!
//! # Architecture
//!
//! Everything above this crate talks to a `&dyn PropertyEngine`. An engine hands out
//! an `EngineState` handle per composition: fractions are set on the handle, then it
//! is evaluated at (P, T) or asked for its bubble/dew envelope. No handle outlives the
//! call that created it, so engines hold no per-stream state.
//!
//! # Example
//!
//! ```no_run
//! use sf_core::units::{k, pa};
//! use sf_fluids::{Composition, CoolPropEngine, PropertyEngine};
//!
//! let engine = CoolPropEngine::new();
//! let comp = Composition::new([("Water", 0.7), ("Ethanol", 0.3)]).unwrap();
//! let props = engine.evaluate(&comp, pa(101_325.0), k(300.0)).unwrap();
//! println!("Density: {} kg/m³", props.mass_density.value);
//! ```

pub mod composition;
pub mod coolprop;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod ideal;
pub mod species;
pub mod state;
pub mod sweeps;

// Re-exports for ergonomics
pub use composition::Composition;
pub use coolprop::CoolPropEngine;
pub use engine::{EngineState, Phase, PointProperties, PropertyEngine};
pub use envelope::{EnvelopePoint, PhaseEnvelope};
pub use error::{FluidError, FluidResult};
pub use ideal::{IdealComponent, IdealMixtureEngine};
pub use species::Species;
pub use state::State;
pub use sweeps::{PressureSweep, SweepType};
