//! sf-core: shared foundation for streamflow.
//!
//! Contains:
//! - units (uom SI types, molar aliases + constructors)
//! - numeric (Real + tolerances + float guards)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
