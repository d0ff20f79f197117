//! Quantity type - a value with an associated unit

use crate::unit::ConversionError;
use crate::{Dimension, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical quantity: a numeric value with an associated unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: f64,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Convert to another unit
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        let new_value = self.unit.convert_to(self.value, target)?;
        Ok(Quantity::new(new_value, target.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_value(self.value), self.unit.symbol)
    }
}

/// Format a value for display: integral values without a decimal point,
/// fractional values with float noise trimmed.
pub(crate) fn format_value(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let mut s = format!("{:.6}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNITS;

    #[test]
    fn test_display_integral() {
        let q = Quantity::new(5000.0, UNITS.get("g").unwrap().clone());
        assert_eq!(q.to_string(), "5000 g");
    }

    #[test]
    fn test_display_fractional() {
        let q = Quantity::new(2.5, UNITS.get("kg").unwrap().clone());
        assert_eq!(q.to_string(), "2.5 kg");
    }

    #[test]
    fn test_display_trims_noise() {
        assert_eq!(format_value(0.1 + 0.2), "0.3");
        assert_eq!(format_value(-1.25), "-1.25");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::new(1.0, UNITS.get("km").unwrap().clone());
        let converted = q.convert_to(UNITS.get("m").unwrap()).unwrap();
        assert!((converted.value - 1000.0).abs() < 1e-9);
        assert_eq!(converted.unit.symbol, "m");
    }

    #[test]
    fn test_compatibility() {
        let mass = Quantity::new(1.0, UNITS.get("kg").unwrap().clone());
        let length = Quantity::new(1.0, UNITS.get("m").unwrap().clone());
        assert!(!mass.is_compatible(&length));
    }
}
