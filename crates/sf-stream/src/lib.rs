//! sf-stream: material streams and isenthalpic mixing.
//!
//! A [`Stream`] is an immutable snapshot: composition, state, and the derived
//! properties a [`PropertyEngine`](sf_fluids::PropertyEngine) reported for them
//! at construction. Streams are combined with [`combine`] (or a configured
//! [`Mixer`]), which conserves molar flow, species and enthalpy and resolves the
//! mixed temperature from the saturated-liquid branch of the mixture's phase
//! envelope instead of running a P-h flash.
//!
//! # Example
//!
//! ```
//! use sf_core::units::{k, pa};
//! use sf_fluids::{Composition, IdealMixtureEngine, State};
//! use sf_stream::{Stream, combine};
//!
//! let engine = IdealMixtureEngine::new();
//! let a = Stream::new(
//!     &engine,
//!     Composition::new([("Water", 0.7), ("Acetone", 0.3)]).unwrap(),
//!     State::new(k(391.0), pa(4e5), 2.0).unwrap(),
//! )
//! .unwrap();
//! let b = Stream::new(
//!     &engine,
//!     Composition::new([("Water", 0.7), ("Ethanol", 0.3)]).unwrap(),
//!     State::new(k(300.0), pa(1.01e5), 15.0).unwrap(),
//! )
//! .unwrap();
//!
//! let mixed = combine(&engine, &a, &b).unwrap();
//! assert_eq!(mixed.flow(), 17.0);
//! assert_eq!(mixed.pressure().value, 1.01e5);
//! ```

pub mod closest;
pub mod config;
pub mod error;
pub mod mix;
pub mod stream;

pub use closest::{closest, closest_index};
pub use config::{EnvelopeOrder, MixConfig};
pub use error::{MixStage, StreamError, StreamResult};
pub use mix::{Blend, Mixer, blend, combine, combine_all};
pub use stream::{DerivedProperties, Stream};
