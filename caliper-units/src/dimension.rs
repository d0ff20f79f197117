//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as a 5-element vector:
//! [length, mass, time, temperature, information]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the dimensions of a physical quantity as exponents of the
/// five base axes this converter supports. Information is carried as its
/// own axis so data sizes never convert into physical quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// [length, mass, time, temperature, information]
    pub exponents: [i32; 5],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0, 0, 0, 0, 0] };

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension { exponents: [1, 0, 0, 0, 0] };

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension { exponents: [0, 1, 0, 0, 0] };

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension { exponents: [0, 0, 1, 0, 0] };

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension { exponents: [0, 0, 0, 1, 0] };

    /// Information dimension [D]
    pub const INFORMATION: Dimension = Dimension { exponents: [0, 0, 0, 0, 1] };

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension { exponents: [0, 0, -1, 0, 0] };

    /// Create a new dimension from exponents
    pub fn new(exponents: [i32; 5]) -> Self {
        Dimension { exponents }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Get the dimension name if it matches a known dimension
    pub fn name(&self) -> Option<&'static str> {
        match self.exponents {
            [0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0] => Some("temperature"),
            [0, 0, 0, 0, 1] => Some("information"),
            [0, 0, -1, 0, 0] => Some("frequency"),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return write!(f, "{}", name);
        }

        let axes = ["L", "M", "T", "Θ", "D"];
        let mut parts = Vec::new();
        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp != 0 {
                if exp == 1 {
                    parts.push(axes[i].to_string());
                } else {
                    parts.push(format!("{}^{}", axes[i], exp));
                }
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_distinct_axes() {
        assert_ne!(Dimension::MASS, Dimension::LENGTH);
        assert_ne!(Dimension::INFORMATION, Dimension::DIMENSIONLESS);
    }

    #[test]
    fn test_names() {
        assert_eq!(Dimension::MASS.name(), Some("mass"));
        assert_eq!(Dimension::FREQUENCY.name(), Some("frequency"));
        assert_eq!(Dimension::new([1, 1, 0, 0, 0]).name(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::TEMPERATURE), "temperature");
        assert_eq!(format!("{}", Dimension::new([1, 0, -1, 0, 0])), "L T^-1");
    }
}
