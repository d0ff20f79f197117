//! Unit representation with conversion factors

use crate::Dimension;
use caliper_core::CaliperError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a physical unit with its dimension and conversion factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "s")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "second")
    pub name: String,
    /// The dimensional signature
    pub dimension: Dimension,
    /// Factor to convert to SI base unit (value_si = value * to_si_factor + to_si_offset)
    pub to_si_factor: f64,
    /// Offset for non-proportional units like temperature (Celsius, Fahrenheit)
    pub to_si_offset: f64,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, to_si_factor: f64, category: &str) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset: 0.0,
            category: category.to_string(),
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: f64,
        to_si_offset: f64,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset,
            category: category.to_string(),
        }
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.to_si_offset != 0.0
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI base unit
    pub fn to_si(&self, value: f64) -> f64 {
        // value_si = value * factor + offset
        value * self.to_si_factor + self.to_si_offset
    }

    /// Convert a value from SI base unit to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        // value = (value_si - offset) / factor
        (value_si - self.to_si_offset) / self.to_si_factor
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, ConversionError> {
        if !self.is_compatible(target) {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        // Convert to SI, then from SI to target
        Ok(target.from_si(self.to_si(value)))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Unknown unit symbol
    UnknownUnit(String),
    /// Units have incompatible dimensions
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::UnknownUnit(unit) => {
                write!(f, "unknown unit: '{}'", unit)
            }
            ConversionError::IncompatibleDimensions { from, to, from_dim, to_dim } => {
                write!(
                    f,
                    "cannot convert {} ({}) to {} ({}): incompatible dimensions",
                    from, from_dim, to, to_dim
                )
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<ConversionError> for CaliperError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::UnknownUnit(unit) => CaliperError::unknown_unit(unit),
            ConversionError::IncompatibleDimensions { .. } => {
                CaliperError::incompatible_dimensions(err.to_string())
            }
        }
    }
}
