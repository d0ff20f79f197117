//! Caliper Units - Physical Quantity and Unit Conversion
//!
//! Unit-aware values with dimensional analysis. Conversion is linear scaling
//! through the SI base unit of each dimension, with affine offsets for
//! temperature scales.
//!
//! Categories:
//! - Length (m, cm, mm, ft, in, etc.)
//! - Mass (kg, g, lb, oz, etc.)
//! - Time (s, min, hour, day, etc.)
//! - Temperature (kelvin, degC, degF)
//! - Data (bit, B, MB, GB, etc.)
//! - Frequency (Hz, kHz, etc.)

mod convert;
mod dimension;
mod quantity;
mod unit;
mod units;

pub use convert::{convert, resolve, Conversion, UNIT_CHOICES};
pub use dimension::Dimension;
pub use quantity::Quantity;
pub use unit::{ConversionError, Unit};
pub use units::{UnitRegistry, UNITS};
