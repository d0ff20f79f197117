//! The conversion operation and the fixed choice table

use crate::unit::ConversionError;
use crate::{Quantity, Unit, UNITS};
use serde::Serialize;
use std::fmt;

/// The unit choices offered by the shell: human-readable label paired with
/// the code the registry resolves. Fixed at build time, never mutated.
pub const UNIT_CHOICES: [(&str, &str); 20] = [
    ("Seconds (s)", "s"),
    ("Minutes (min)", "min"),
    ("Hours (h)", "hour"),
    ("Days (d)", "day"),
    ("Kilograms (kg)", "kg"),
    ("Grams (g)", "g"),
    ("Pounds (lb)", "lb"),
    ("Ounces (oz)", "oz"),
    ("Meters (m)", "m"),
    ("Centimeters (cm)", "cm"),
    ("Millimeters (mm)", "mm"),
    ("Feet (ft)", "ft"),
    ("Inches (in)", "in"),
    ("Celsius (°C)", "degC"),
    ("Fahrenheit (°F)", "degF"),
    ("Kelvin (K)", "kelvin"),
    ("Gigabytes (GB)", "GB"),
    ("Megabytes (MB)", "MB"),
    ("Kilohertz (kHz)", "kHz"),
    ("Hertz (Hz)", "Hz"),
];

/// Resolve a free-form code through the registry.
///
/// Codes arrive as arbitrary strings even though the shell only offers valid
/// ones, so resolution validates independently.
pub fn resolve(code: &str) -> Result<&'static Unit, ConversionError> {
    UNITS.get(code).ok_or_else(|| ConversionError::UnknownUnit(code.to_string()))
}

/// Result of a unit conversion: the input quantity and its converted form
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub from: Quantity,
    pub to: Quantity,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.from, self.to)
    }
}

/// Convert a value between two units named by code.
///
/// Pure function of its inputs and the static registry. Unknown codes and
/// dimensionally incompatible pairs are distinct, user-displayable errors.
pub fn convert(value: f64, from_code: &str, to_code: &str) -> Result<Conversion, ConversionError> {
    let from = resolve(from_code)?;
    let to = resolve(to_code)?;
    let converted = from.convert_to(value, to)?;
    Ok(Conversion {
        from: Quantity::new(value, from.clone()),
        to: Quantity::new(converted, to.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_zero_mass() {
        let result = convert(0.0, "kg", "g").unwrap();
        assert_eq!(result.to.value, 0.0);
        assert_eq!(result.to_string(), "0 kg = 0 g");
    }

    #[test]
    fn test_incompatible_dimensions() {
        let err = convert(100.0, "kg", "m").unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleDimensions { .. }));
        assert!(err.to_string().contains("incompatible dimensions"));
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(5.0, "xyz", "m").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("xyz".to_string()));
    }

    #[test]
    fn test_round_trip_all_choice_pairs() {
        // convert(v, a, b) then convert(result, b, a) returns v within
        // floating-point tolerance for every same-dimension pair
        for (_, a) in UNIT_CHOICES {
            for (_, b) in UNIT_CHOICES {
                let ua = resolve(a).unwrap();
                let ub = resolve(b).unwrap();
                if !ua.is_compatible(ub) {
                    continue;
                }
                let out = convert(7.25, a, b).unwrap();
                let back = convert(out.to.value, b, a).unwrap();
                let rel = (back.to.value - 7.25).abs() / 7.25;
                assert!(rel < TOLERANCE, "{} -> {} -> back drifted: {}", a, b, back.to.value);
            }
        }
    }

    #[test]
    fn test_temperature_anchors() {
        let freezing = convert(0.0, "degC", "degF").unwrap();
        assert!((freezing.to.value - 32.0).abs() < TOLERANCE);

        let boiling = convert(100.0, "degC", "degF").unwrap();
        assert!((boiling.to.value - 212.0).abs() < TOLERANCE);

        let absolute = convert(0.0, "degC", "kelvin").unwrap();
        assert!((absolute.to.value - 273.15).abs() < TOLERANCE);
        assert_eq!(absolute.to.unit.symbol, "K");
    }

    #[test]
    fn test_data_sizes_are_not_mass() {
        let err = convert(1.0, "GB", "kg").unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleDimensions { .. }));
    }

    #[test]
    fn test_data_conversion() {
        let result = convert(2.0, "GB", "MB").unwrap();
        assert!((result.to.value - 2000.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_frequency_conversion() {
        let result = convert(3.5, "kHz", "Hz").unwrap();
        assert!((result.to.value - 3500.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_choice_table_resolves() {
        for (label, code) in UNIT_CHOICES {
            let unit = resolve(code).unwrap();
            assert!(!label.is_empty());
            assert!(!unit.symbol.is_empty());
        }
    }

    #[test]
    fn test_display_string() {
        let result = convert(5.0, "kg", "g").unwrap();
        assert_eq!(result.to_string(), "5 kg = 5000 g");
    }

    #[test]
    fn test_mass_to_pounds() {
        let result = convert(1.0, "kg", "lb").unwrap();
        assert!((result.to.value - 2.204_622_621_848_776).abs() < 1e-6);
    }
}
