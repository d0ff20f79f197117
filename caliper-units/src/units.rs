//! Unit definitions organized by category

use crate::{Dimension, Unit};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        // Try direct lookup first
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        // Try alias lookup
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical);
        }
        None
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values().filter(|u| u.category == category).collect()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    fn register(&mut self, unit: Unit) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_data_units();
        self.register_frequency_units();
    }

    fn register_length_units(&mut self) {
        // SI length units
        self.register(Unit::new("m", "meter", Dimension::LENGTH, 1.0, "length"));
        self.register(Unit::new("km", "kilometer", Dimension::LENGTH, 1000.0, "length"));
        self.register(Unit::new("cm", "centimeter", Dimension::LENGTH, 0.01, "length"));
        self.register(Unit::new("mm", "millimeter", Dimension::LENGTH, 0.001, "length"));

        // Imperial/US length units
        self.register(Unit::new("in", "inch", Dimension::LENGTH, 0.0254, "length"));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, 0.3048, "length"));
        self.register(Unit::new("yd", "yard", Dimension::LENGTH, 0.9144, "length"));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, 1609.344, "length"));

        // Aliases
        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("metres", "m");
        self.alias("kilometer", "km");
        self.alias("kilometers", "km");
        self.alias("centimeter", "cm");
        self.alias("centimeters", "cm");
        self.alias("millimeter", "mm");
        self.alias("millimeters", "mm");
        self.alias("inch", "in");
        self.alias("inches", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("yard", "yd");
        self.alias("yards", "yd");
        self.alias("mile", "mi");
        self.alias("miles", "mi");
    }

    fn register_mass_units(&mut self) {
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, 1.0, "mass"));
        self.register(Unit::new("g", "gram", Dimension::MASS, 0.001, "mass"));
        self.register(Unit::new("mg", "milligram", Dimension::MASS, 0.000_001, "mass"));
        self.register(Unit::new("t", "tonne", Dimension::MASS, 1000.0, "mass"));

        // Imperial/US mass units
        self.register(Unit::new("lb", "pound", Dimension::MASS, 0.453_592_37, "mass"));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, 0.028_349_523_125, "mass"));

        self.alias("kilogram", "kg");
        self.alias("kilograms", "kg");
        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("milligram", "mg");
        self.alias("milligrams", "mg");
        self.alias("tonne", "t");
        self.alias("tonnes", "t");
        self.alias("pound", "lb");
        self.alias("pounds", "lb");
        self.alias("lbs", "lb");
        self.alias("ounce", "oz");
        self.alias("ounces", "oz");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", "second", Dimension::TIME, 1.0, "time"));
        self.register(Unit::new("ms", "millisecond", Dimension::TIME, 0.001, "time"));
        self.register(Unit::new("min", "minute", Dimension::TIME, 60.0, "time"));
        self.register(Unit::new("h", "hour", Dimension::TIME, 3600.0, "time"));
        self.register(Unit::new("d", "day", Dimension::TIME, 86400.0, "time"));
        self.register(Unit::new("wk", "week", Dimension::TIME, 604_800.0, "time"));

        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("sec", "s");
        self.alias("millisecond", "ms");
        self.alias("milliseconds", "ms");
        self.alias("minute", "min");
        self.alias("minutes", "min");
        self.alias("hour", "h");
        self.alias("hours", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("days", "d");
        self.alias("week", "wk");
        self.alias("weeks", "wk");
    }

    fn register_temperature_units(&mut self) {
        // Kelvin is the SI base unit
        self.register(Unit::new("K", "kelvin", Dimension::TEMPERATURE, 1.0, "temperature"));

        // Celsius: K = C + 273.15
        self.register(Unit::with_offset(
            "degC",
            "celsius",
            Dimension::TEMPERATURE,
            1.0,
            273.15,
            "temperature",
        ));

        // Fahrenheit: K = (F + 459.67) * 5/9
        self.register(Unit::with_offset(
            "degF",
            "fahrenheit",
            Dimension::TEMPERATURE,
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
            "temperature",
        ));

        self.alias("kelvin", "K");
        self.alias("C", "degC");
        self.alias("celsius", "degC");
        self.alias("°C", "degC");
        self.alias("F", "degF");
        self.alias("fahrenheit", "degF");
        self.alias("°F", "degF");
    }

    fn register_data_units(&mut self) {
        self.register(Unit::new("bit", "bit", Dimension::INFORMATION, 1.0, "data"));
        self.register(Unit::new("B", "byte", Dimension::INFORMATION, 8.0, "data"));
        self.register(Unit::new("kB", "kilobyte", Dimension::INFORMATION, 8_000.0, "data"));
        self.register(Unit::new("MB", "megabyte", Dimension::INFORMATION, 8_000_000.0, "data"));
        self.register(Unit::new("GB", "gigabyte", Dimension::INFORMATION, 8_000_000_000.0, "data"));
        self.register(Unit::new("TB", "terabyte", Dimension::INFORMATION, 8_000_000_000_000.0, "data"));

        self.alias("bits", "bit");
        self.alias("byte", "B");
        self.alias("bytes", "B");
        self.alias("kilobyte", "kB");
        self.alias("kilobytes", "kB");
        self.alias("megabyte", "MB");
        self.alias("megabytes", "MB");
        self.alias("gigabyte", "GB");
        self.alias("gigabytes", "GB");
        self.alias("terabyte", "TB");
        self.alias("terabytes", "TB");
    }

    fn register_frequency_units(&mut self) {
        self.register(Unit::new("Hz", "hertz", Dimension::FREQUENCY, 1.0, "frequency"));
        self.register(Unit::new("kHz", "kilohertz", Dimension::FREQUENCY, 1_000.0, "frequency"));
        self.register(Unit::new("MHz", "megahertz", Dimension::FREQUENCY, 1_000_000.0, "frequency"));
        self.register(Unit::new("GHz", "gigahertz", Dimension::FREQUENCY, 1_000_000_000.0, "frequency"));

        self.alias("hertz", "Hz");
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
