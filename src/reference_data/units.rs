//! Unit tables and conversions to the canonical units used by the solver:
//! atm for pressure, L for volume, K for temperature, g for mass and mol for amount.
use serde::{Deserialize, Serialize};

pub const ATM_IN_KPA: f64 = 101.325;
pub const ATM_IN_PA: f64 = 101_325.0;
pub const ATM_IN_TORR: f64 = 760.0;
pub const CELSIUS_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Pressure,
    Volume,
    Temperature,
    Mass,
    Amount,
}

impl Dimension {
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            Dimension::Pressure => "atm",
            Dimension::Volume => "L",
            Dimension::Temperature => "K",
            Dimension::Mass => "g",
            Dimension::Amount => "mol",
        }
    }
}

/// A unit recognised in question text or calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Atm,
    KiloPascal,
    Pascal,
    Torr,
    MmHg,
    Liter,
    Milliliter,
    CubicMeter,
    CubicCentimeter,
    Kelvin,
    Celsius,
    Fahrenheit,
    Gram,
    Kilogram,
    Milligram,
    Mole,
    Millimole,
    Kilomole,
}

impl Unit {
    /// Looks a unit token up, as written in free text ("kPa", "mL", "°C", "grams", ...).
    /// Tokens are matched case-insensitively except where case carries meaning.
    pub fn from_token(token: &str) -> Option<Unit> {
        let token = token.trim();
        let lower = token.to_lowercase();
        let unit = match lower.as_str() {
            "atm" | "atms" | "atmosphere" | "atmospheres" => Unit::Atm,
            "kpa" | "kilopascal" | "kilopascals" => Unit::KiloPascal,
            "pa" | "pascal" | "pascals" => Unit::Pascal,
            "torr" => Unit::Torr,
            "mmhg" => Unit::MmHg,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Milliliter,
            "m3" | "m³" => Unit::CubicMeter,
            "cm3" | "cm³" => Unit::CubicCentimeter,
            "kelvin" => Unit::Kelvin,
            // a lone lowercase k is not a kelvin sign
            "k" if token == "K" => Unit::Kelvin,
            "°c" | "ºc" | "celsius" => Unit::Celsius,
            "°f" | "ºf" | "fahrenheit" => Unit::Fahrenheit,
            "g" | "gram" | "grams" => Unit::Gram,
            "kg" | "kilogram" | "kilograms" => Unit::Kilogram,
            "mg" | "milligram" | "milligrams" => Unit::Milligram,
            "mol" | "mole" | "moles" | "mols" => Unit::Mole,
            "mmol" => Unit::Millimole,
            "kmol" => Unit::Kilomole,
            _ => return None,
        };
        Some(unit)
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Atm | Unit::KiloPascal | Unit::Pascal | Unit::Torr | Unit::MmHg => {
                Dimension::Pressure
            }
            Unit::Liter | Unit::Milliliter | Unit::CubicMeter | Unit::CubicCentimeter => {
                Dimension::Volume
            }
            Unit::Kelvin | Unit::Celsius | Unit::Fahrenheit => Dimension::Temperature,
            Unit::Gram | Unit::Kilogram | Unit::Milligram => Dimension::Mass,
            Unit::Mole | Unit::Millimole | Unit::Kilomole => Dimension::Amount,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Atm => "atm",
            Unit::KiloPascal => "kPa",
            Unit::Pascal => "Pa",
            Unit::Torr => "torr",
            Unit::MmHg => "mmHg",
            Unit::Liter => "L",
            Unit::Milliliter => "mL",
            Unit::CubicMeter => "m³",
            Unit::CubicCentimeter => "cm³",
            Unit::Kelvin => "K",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milligram => "mg",
            Unit::Mole => "mol",
            Unit::Millimole => "mmol",
            Unit::Kilomole => "kmol",
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.symbol() == self.dimension().canonical_unit()
    }

    /// Converts a value expressed in this unit to the canonical unit of its dimension
    pub fn to_canonical(&self, value: f64) -> f64 {
        match self {
            Unit::Atm => value,
            Unit::KiloPascal => value / ATM_IN_KPA,
            Unit::Pascal => value / ATM_IN_PA,
            Unit::Torr | Unit::MmHg => value / ATM_IN_TORR,
            Unit::Liter => value,
            Unit::Milliliter | Unit::CubicCentimeter => value / 1000.0,
            Unit::CubicMeter => value * 1000.0,
            Unit::Kelvin => value,
            Unit::Celsius => value + CELSIUS_OFFSET,
            Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + CELSIUS_OFFSET,
            Unit::Gram => value,
            Unit::Kilogram => value * 1000.0,
            Unit::Milligram => value / 1000.0,
            Unit::Mole => value,
            Unit::Millimole => value / 1000.0,
            Unit::Kilomole => value * 1000.0,
        }
    }

    /// Inverse of [`Unit::to_canonical`]
    pub fn from_canonical(&self, value: f64) -> f64 {
        match self {
            Unit::Atm => value,
            Unit::KiloPascal => value * ATM_IN_KPA,
            Unit::Pascal => value * ATM_IN_PA,
            Unit::Torr | Unit::MmHg => value * ATM_IN_TORR,
            Unit::Liter => value,
            Unit::Milliliter | Unit::CubicCentimeter => value * 1000.0,
            Unit::CubicMeter => value / 1000.0,
            Unit::Kelvin => value,
            Unit::Celsius => value - CELSIUS_OFFSET,
            Unit::Fahrenheit => (value - CELSIUS_OFFSET) * 9.0 / 5.0 + 32.0,
            Unit::Gram => value,
            Unit::Kilogram => value / 1000.0,
            Unit::Milligram => value * 1000.0,
            Unit::Mole => value,
            Unit::Millimole => value * 1000.0,
            Unit::Kilomole => value / 1000.0,
        }
    }
}

/// Converts between two units of the same dimension, None if dimensions differ
pub fn convert(value: f64, from: Unit, to: Unit) -> Option<f64> {
    if from.dimension() != to.dimension() {
        return None;
    }
    Some(to.from_canonical(from.to_canonical(value)))
}

/// Alternative units offered next to a calculator input expressed in `base_unit`
pub fn common_units(base_unit: &str) -> Vec<&'static str> {
    match base_unit {
        "L" => vec!["L", "mL", "m³", "cm³"],
        "atm" => vec!["atm", "Pa", "kPa", "mmHg", "torr"],
        "K" => vec!["K", "°C", "°F"],
        "g" => vec!["g", "kg", "mg"],
        "mol" => vec!["mol", "mmol", "kmol"],
        "J" => vec!["J", "kJ", "cal", "kcal"],
        "M" => vec!["M", "mM", "mol/L"],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tokens() {
        assert_eq!(Unit::from_token("kPa"), Some(Unit::KiloPascal));
        assert_eq!(Unit::from_token("mmHg"), Some(Unit::MmHg));
        assert_eq!(Unit::from_token("mL"), Some(Unit::Milliliter));
        assert_eq!(Unit::from_token("°C"), Some(Unit::Celsius));
        assert_eq!(Unit::from_token("K"), Some(Unit::Kelvin));
        assert_eq!(Unit::from_token("k"), None);
        assert_eq!(Unit::from_token("grams"), Some(Unit::Gram));
        assert_eq!(Unit::from_token("of"), None);
    }

    #[test]
    fn test_canonical_conversions() {
        assert_relative_eq!(Unit::KiloPascal.to_canonical(2.5), 2.5 / 101.325, epsilon = 1e-12);
        assert_relative_eq!(Unit::Pascal.to_canonical(101_325.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(Unit::Torr.to_canonical(380.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(Unit::Milliliter.to_canonical(250.0), 0.25, epsilon = 1e-12);
        assert_relative_eq!(Unit::CubicMeter.to_canonical(0.002), 2.0, epsilon = 1e-12);
        assert_relative_eq!(Unit::Celsius.to_canonical(25.0), 298.15, epsilon = 1e-12);
        assert_relative_eq!(Unit::Fahrenheit.to_canonical(32.0), 273.15, epsilon = 1e-12);
    }

    #[test]
    fn test_convert() {
        assert_relative_eq!(convert(1.0, Unit::Atm, Unit::Pascal).unwrap(), 101_325.0, epsilon = 1e-9);
        assert_relative_eq!(convert(760.0, Unit::MmHg, Unit::KiloPascal).unwrap(), 101.325, epsilon = 1e-9);
        assert_relative_eq!(convert(2.0, Unit::Liter, Unit::Milliliter).unwrap(), 2000.0, epsilon = 1e-9);
        assert!(convert(1.0, Unit::Atm, Unit::Liter).is_none());
        assert!(Unit::Atm.is_canonical());
        assert!(!Unit::Celsius.is_canonical());
    }
}
