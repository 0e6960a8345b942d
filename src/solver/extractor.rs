//! Variable extraction: scans question text for numbers paired with units, converts them to
//! canonical units on the spot and files them under well-known keys.
//!
//! Extraction never fails. A quantity that cannot be found is simply absent from the bag,
//! which downstream solvers read as "unknown, solve for this one".
use crate::reference_data::molmass::parse_formula;
use crate::reference_data::units::{Dimension, Unit};
use crate::solver::classifier::Topic;
use crate::solver::formatting::trimmed;
use crate::solver::question::Question;
use crate::solver::stoichiometry::target_product;
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// keys of the variable bag
pub mod keys {
    pub const PRESSURE1: &str = "pressure1";
    pub const PRESSURE2: &str = "pressure2";
    pub const VOLUME1: &str = "volume1";
    pub const VOLUME2: &str = "volume2";
    pub const TEMPERATURE1: &str = "temperature1";
    pub const TEMPERATURE2: &str = "temperature2";
    pub const MOLES: &str = "moles";
    pub const MASS: &str = "mass";
    pub const OXYGEN_MASS: &str = "oxygen_mass";
    pub const CO2_MASS: &str = "co2_mass";
    pub const WATER_MASS: &str = "water_mass";
    pub const CARBON_ATOMS: &str = "carbon_atoms";
    pub const HYDROGEN_ATOMS: &str = "hydrogen_atoms";
    pub const PH: &str = "ph";
    pub const VOLUME: &str = "volume";
    pub const TEMPERATURE_CHANGE: &str = "temperature_change";
}

static MEASUREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9.])(-?\d+(?:\.\d+)?|-?\.\d+)\s*(°\s?[CcFf]|º[CcFf]|[A-Za-z]+[³3]?)")
        .expect("measurement regex is valid")
});
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:[eE][-+]?\d+)?\b").expect("number regex is valid")
});
static HYDROCARBON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bC(\d*)H(\d*)\b").expect("hydrocarbon regex is valid"));
static HYDROCARBON_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^C(\d*)H(\d*)$").expect("hydrocarbon regex is valid"));
static PH_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bph\b").expect("ph regex is valid"));

/// Alkanes recognised by name when no formula token is written. Order matters: "methane"
/// contains "ethane".
pub const HYDROCARBON_NAMES: &[(&str, u32, u32)] = &[
    ("methane", 1, 4),
    ("ethane", 2, 6),
    ("propane", 3, 8),
    ("butane", 4, 10),
    ("pentane", 5, 12),
    ("hexane", 6, 14),
    ("heptane", 7, 16),
    ("octane", 8, 18),
];

/// A number found next to a unit, with its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// value in the canonical unit of its dimension
    pub value: f64,
    pub raw_value: f64,
    /// the number exactly as written
    pub raw_text: String,
    pub unit: Unit,
    /// byte offset of the number
    pub start: usize,
    /// byte offset right after the unit token
    pub end: usize,
}

impl Measurement {
    /// "1.5 atm", or "25 °C = 298.15 K" when a conversion took place
    pub fn display(&self) -> String {
        if self.unit.is_canonical() {
            format!("{} {}", self.raw_text, self.unit.symbol())
        } else {
            format!(
                "{} {} = {} {}",
                self.raw_text,
                self.unit.symbol(),
                trimmed(self.value),
                self.unit.dimension().canonical_unit()
            )
        }
    }
}

/// The variable bag: canonical numeric values by key, plus where each one came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantities {
    values: BTreeMap<String, f64>,
    sources: BTreeMap<String, Measurement>,
}

impl Quantities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }

    pub fn insert_measured(&mut self, key: &str, measurement: Measurement) {
        self.values.insert(key.to_string(), measurement.value);
        self.sources.insert(key.to_string(), measurement);
    }

    pub fn source(&self, key: &str) -> Option<&Measurement> {
        self.sources.get(key)
    }

    /// "P₁ = 1.5 atm" style display of a known value, falling back to the canonical value
    pub fn display(&self, key: &str, unit: &str) -> Option<String> {
        match self.sources.get(key) {
            Some(m) => Some(m.display()),
            None => self.get(key).map(|v| format!("{} {}", trimmed(v), unit)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.values
    }
}

/// A hydrocarbon CxHy detected in the question
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrocarbon {
    pub formula: String,
    pub carbon: u32,
    pub hydrogen: u32,
    pub name: Option<&'static str>,
}

impl Hydrocarbon {
    fn new(carbon: u32, hydrogen: u32, name: Option<&'static str>) -> Self {
        let formula = match (carbon, hydrogen) {
            (1, h) => format!("CH{}", h),
            (c, h) => format!("C{}H{}", c, h),
        };
        let name = name.or_else(|| {
            HYDROCARBON_NAMES
                .iter()
                .find(|(_, c, h)| *c == carbon && *h == hydrogen)
                .map(|(n, _, _)| *n)
        });
        Self {
            formula,
            carbon,
            hydrogen,
            name,
        }
    }

    /// O₂ needed per mole of fuel for complete combustion: x + y/4
    pub fn oxygen_ratio(&self) -> f64 {
        self.carbon as f64 + self.hydrogen as f64 / 4.0
    }
}

/// What a mass in the text refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Hydrocarbon,
    Oxygen,
    CarbonDioxide,
    Water,
    Unknown,
}

/// Generic decimal-number tokenizer (scientific notation accepted)
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Every number+unit pair of the text, in order of appearance
pub fn scan_measurements(text: &str) -> Vec<Measurement> {
    MEASUREMENT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps.get(1)?;
            let token = caps.get(2)?;
            let unit_token: String = token.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            let unit = Unit::from_token(&unit_token)?;
            let raw_value: f64 = number.as_str().parse().ok()?;
            Some(Measurement {
                value: unit.to_canonical(raw_value),
                raw_value,
                raw_text: number.as_str().to_string(),
                unit,
                start: number.start(),
                end: token.end(),
            })
        })
        .collect()
}

fn hydrocarbon_from_caps(carbon: &str, hydrogen: &str) -> Option<Hydrocarbon> {
    let carbon: u32 = if carbon.is_empty() { 1 } else { carbon.parse().ok()? };
    let hydrogen: u32 = if hydrogen.is_empty() { 1 } else { hydrogen.parse().ok()? };
    if carbon == 0 || hydrogen == 0 {
        return None;
    }
    Some(Hydrocarbon::new(carbon, hydrogen, None))
}

/// Finds a CxHy formula token, or failing that an alkane name
pub fn detect_hydrocarbon(question: &Question) -> Option<Hydrocarbon> {
    if let Some(caps) = HYDROCARBON_RE.captures(&question.normalized) {
        let carbon = caps.get(1).map_or("", |m| m.as_str());
        let hydrogen = caps.get(2).map_or("", |m| m.as_str());
        if let Some(h) = hydrocarbon_from_caps(carbon, hydrogen) {
            return Some(h);
        }
    }
    HYDROCARBON_NAMES
        .iter()
        .find(|(name, _, _)| question.lower.contains(name))
        .map(|(name, c, h)| Hydrocarbon::new(*c, *h, Some(name)))
}

fn strip_token(token: &str) -> &str {
    let token = token.trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '?' | '!' | '.' | '"' | '\''));
    if token.starts_with('(') && token.ends_with(')') && token.len() > 2 {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Chemical formula tokens of the text that parse with known elements, in order, deduplicated.
/// Single capitalised words ("If", "A") are not formulas.
pub fn extract_formulas(question: &Question) -> Vec<String> {
    let mut formulas: Vec<String> = Vec::new();
    for raw in question.normalized.split_whitespace() {
        let token = strip_token(raw);
        let starts_upper = token.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        let has_digit = token.chars().any(|c| c.is_ascii_digit());
        let uppercase = token.chars().filter(|c| c.is_ascii_uppercase()).count();
        if !starts_upper || (!has_digit && uppercase < 2) {
            continue;
        }
        if parse_formula(token).is_ok() && !formulas.iter().any(|f| f == token) {
            formulas.push(token.to_string());
        }
    }
    formulas
}

/// Identifies the substance named right after a measurement ("10.0 g of propane", "80 g O2")
pub fn species_after(text: &str, offset: usize) -> Species {
    let rest = text.get(offset..).unwrap_or("");
    let mut words = rest
        .split_whitespace()
        .map(strip_token)
        .filter(|w| !w.is_empty())
        .skip_while(|w| {
            matches!(
                w.to_lowercase().as_str(),
                "of" | "the" | "pure" | "gaseous" | "liquid" | "solid" | "dry"
            )
        });
    let Some(first) = words.next() else {
        return Species::Unknown;
    };
    let second = words.next().unwrap_or("");
    let lower = first.to_lowercase();
    match lower.as_str() {
        "o2" | "oxygen" => Species::Oxygen,
        "co2" => Species::CarbonDioxide,
        "carbon" if second.eq_ignore_ascii_case("dioxide") => Species::CarbonDioxide,
        "h2o" | "water" | "steam" => Species::Water,
        _ if HYDROCARBON_TOKEN_RE.is_match(first) => Species::Hydrocarbon,
        _ if HYDROCARBON_NAMES.iter().any(|(name, _, _)| lower == *name) => Species::Hydrocarbon,
        _ => Species::Unknown,
    }
}

/// Words that mark the mass right after them as an experimental (actual) yield
const YIELD_WORDS: [&str; 6] = ["actual", "collected", "obtained", "yield", "isolated", "recovered"];

/// True when one of the three words before `offset` is a yield word ("the actual yield is 35.0 g")
pub fn follows_yield_word(text: &str, offset: usize) -> bool {
    let before = text.get(..offset).unwrap_or("");
    before
        .split_whitespace()
        .rev()
        .take(3)
        .map(|w| strip_token(w).to_lowercase())
        .any(|w| YIELD_WORDS.contains(&w.as_str()))
}

fn file_two_states(
    quantities: &mut Quantities,
    first: &str,
    second: &str,
    measurement: Measurement,
) {
    if !quantities.contains(first) {
        quantities.insert_measured(first, measurement);
    } else if !quantities.contains(second) {
        quantities.insert_measured(second, measurement);
    } else {
        debug!(
            "discarding extra {:?} value {}",
            measurement.unit.dimension(),
            measurement.raw_text
        );
    }
}

/// Pressures, volumes, temperatures (two states each) and an amount in mol
pub fn extract_gas_law_variables(question: &Question) -> Quantities {
    let mut quantities = Quantities::new();
    for m in scan_measurements(&question.normalized) {
        match m.unit.dimension() {
            Dimension::Pressure => file_two_states(&mut quantities, keys::PRESSURE1, keys::PRESSURE2, m),
            Dimension::Volume => file_two_states(&mut quantities, keys::VOLUME1, keys::VOLUME2, m),
            Dimension::Temperature => {
                file_two_states(&mut quantities, keys::TEMPERATURE1, keys::TEMPERATURE2, m)
            }
            Dimension::Amount => {
                if !quantities.contains(keys::MOLES) {
                    quantities.insert_measured(keys::MOLES, m);
                }
            }
            Dimension::Mass => {}
        }
    }
    quantities
}

/// Masses attributed to species, amount in mol and hydrocarbon atom counts
pub fn extract_stoichiometry_variables(question: &Question) -> Quantities {
    let mut quantities = Quantities::new();
    let text = &question.normalized;
    for m in scan_measurements(text) {
        match m.unit.dimension() {
            Dimension::Mass => {
                let key = match species_after(text, m.end) {
                    Species::Oxygen => keys::OXYGEN_MASS,
                    Species::CarbonDioxide => keys::CO2_MASS,
                    Species::Water => keys::WATER_MASS,
                    Species::Unknown if follows_yield_word(text, m.start) => {
                        target_product(question).actual_mass_key()
                    }
                    Species::Hydrocarbon | Species::Unknown => keys::MASS,
                };
                if quantities.contains(key) {
                    debug!("discarding extra mass {} g", m.raw_text);
                } else {
                    quantities.insert_measured(key, m);
                }
            }
            Dimension::Amount => {
                if !quantities.contains(keys::MOLES) {
                    quantities.insert_measured(keys::MOLES, m);
                }
            }
            _ => {}
        }
    }
    if let Some(h) = detect_hydrocarbon(question) {
        quantities.insert(keys::CARBON_ATOMS, h.carbon as f64);
        quantities.insert(keys::HYDROGEN_ATOMS, h.hydrogen as f64);
    }
    quantities
}

pub fn extract_ph_variables(question: &Question) -> Quantities {
    let mut quantities = Quantities::new();
    if PH_WORD_RE.is_match(&question.lower) {
        if let Some(first) = extract_numbers(&question.normalized).first() {
            quantities.insert(keys::PH, *first);
        }
    }
    quantities
}

pub fn extract_concentration_variables(question: &Question) -> Quantities {
    let mut quantities = Quantities::new();
    for m in scan_measurements(&question.normalized) {
        let key = match m.unit.dimension() {
            Dimension::Amount => keys::MOLES,
            Dimension::Volume => keys::VOLUME,
            _ => continue,
        };
        if !quantities.contains(key) {
            quantities.insert_measured(key, m);
        }
    }
    if quantities.is_empty() {
        let numbers = extract_numbers(&question.normalized);
        if numbers.len() >= 2 {
            quantities.insert(keys::MOLES, numbers[0]);
            quantities.insert(keys::VOLUME, numbers[1]);
        }
    }
    quantities
}

pub fn extract_thermochemistry_variables(question: &Question) -> Quantities {
    let mut quantities = Quantities::new();
    for m in scan_measurements(&question.normalized) {
        match m.unit.dimension() {
            Dimension::Mass if !quantities.contains(keys::MASS) => {
                quantities.insert_measured(keys::MASS, m)
            }
            // a temperature change has the same size in °C and K, keep the number as written
            Dimension::Temperature if !quantities.contains(keys::TEMPERATURE_CHANGE) => {
                quantities.insert(keys::TEMPERATURE_CHANGE, m.raw_value)
            }
            _ => {}
        }
    }
    if quantities.is_empty() {
        let numbers = extract_numbers(&question.normalized);
        if numbers.len() >= 2 {
            quantities.insert(keys::MASS, numbers[0]);
            quantities.insert(keys::TEMPERATURE_CHANGE, numbers[1]);
        }
    }
    quantities
}

/// Per-topic extraction entry point
pub fn extract_variables(topic: Topic, question: &Question) -> Quantities {
    let quantities = match topic {
        Topic::GasLaws => extract_gas_law_variables(question),
        Topic::Stoichiometry => extract_stoichiometry_variables(question),
        Topic::Ph => extract_ph_variables(question),
        Topic::Concentration => extract_concentration_variables(question),
        Topic::Thermochemistry => extract_thermochemistry_variables(question),
        Topic::GeneralChemistry => Quantities::new(),
    };
    debug!("extracted {} quantities for {}", quantities.len(), topic.id());
    quantities
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn q(text: &str) -> Question {
        Question::new(text, None)
    }

    #[test]
    fn test_pressure_normalization() {
        let vars = extract_gas_law_variables(&q("A gas at 2.5 kPa occupies 3.0 L"));
        assert_relative_eq!(vars.get(keys::PRESSURE1).unwrap(), 2.5 / 101.325, epsilon = 1e-6);
        assert_relative_eq!(vars.get(keys::VOLUME1).unwrap(), 3.0, epsilon = 1e-12);

        let vars = extract_gas_law_variables(&q("from 760 torr to 50662.5 Pa"));
        assert_relative_eq!(vars.get(keys::PRESSURE1).unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(vars.get(keys::PRESSURE2).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_volume_and_temperature_normalization() {
        let vars = extract_gas_law_variables(&q("250 mL of gas at 25 °C is heated to 50°C"));
        assert_relative_eq!(vars.get(keys::VOLUME1).unwrap(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(vars.get(keys::TEMPERATURE1).unwrap(), 298.15, epsilon = 1e-9);
        assert_relative_eq!(vars.get(keys::TEMPERATURE2).unwrap(), 323.15, epsilon = 1e-9);
        assert_eq!(
            vars.source(keys::TEMPERATURE1).unwrap().display(),
            "25 °C = 298.15 K"
        );
    }

    #[test]
    fn test_boyle_extraction_keeps_order() {
        let vars = extract_gas_law_variables(&q(
            "If 2.0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?",
        ));
        assert_eq!(vars.get(keys::VOLUME1), Some(2.0));
        assert_eq!(vars.get(keys::VOLUME2), Some(0.75));
        assert_eq!(vars.get(keys::PRESSURE1), Some(1.5));
        assert!(!vars.contains(keys::PRESSURE2));
        assert!(!vars.contains(keys::TEMPERATURE1));
        assert_eq!(vars.display(keys::PRESSURE1, "atm").unwrap(), "1.5 atm");
    }

    #[test]
    fn test_third_value_is_discarded() {
        let vars = extract_gas_law_variables(&q("1 atm, 2 atm and 3 atm"));
        assert_eq!(vars.get(keys::PRESSURE1), Some(1.0));
        assert_eq!(vars.get(keys::PRESSURE2), Some(2.0));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_formula_digits_are_not_numbers() {
        let found = scan_measurements("10.0 g of propane (C3H8) gives CO2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].unit, Unit::Gram);
        assert_eq!(extract_numbers("H2O and 3.5 mol"), vec![3.5]);
        assert_eq!(extract_numbers("[H+] = 1.0e-7 M"), vec![1.0e-7]);
    }

    #[test]
    fn test_hydrocarbon_detection() {
        let h = detect_hydrocarbon(&q("10.0 g of propane (C3H8)")).unwrap();
        assert_eq!((h.carbon, h.hydrogen), (3, 8));
        assert_eq!(h.name, Some("propane"));

        let h = detect_hydrocarbon(&q("Burning CH₄ in air")).unwrap();
        assert_eq!(h.formula, "CH4");
        assert_eq!(h.name, Some("methane"));

        let h = detect_hydrocarbon(&q("combustion of ethane")).unwrap();
        assert_eq!(h.formula, "C2H6");

        assert!(detect_hydrocarbon(&q("which of these burns")).is_none());
        assert!(detect_hydrocarbon(&q("burning CH3OH")).is_none());
    }

    #[test]
    fn test_mass_attribution() {
        let vars = extract_stoichiometry_variables(&q(
            "When 12.0 g of propane (C3H8) burns in 80.0 g of O2, which is the limiting reagent and what is the percent yield if 35.0 g of CO2 is collected?",
        ));
        assert_eq!(vars.get(keys::MASS), Some(12.0));
        assert_eq!(vars.get(keys::OXYGEN_MASS), Some(80.0));
        assert_eq!(vars.get(keys::CO2_MASS), Some(35.0));
        assert_eq!(vars.get(keys::CARBON_ATOMS), Some(3.0));
        assert_eq!(vars.get(keys::HYDROGEN_ATOMS), Some(8.0));

        assert_eq!(species_after("5 g carbon dioxide", 3), Species::CarbonDioxide);
        assert_eq!(species_after("5 g of water", 3), Species::Water);
        assert_eq!(species_after("5 g of sample", 3), Species::Unknown);
    }

    #[test]
    fn test_actual_yield_phrasing() {
        let text = "When 12.0 g of propane (C3H8) burns in 80.0 g of O2, the actual yield is 35.0 g.";
        let vars = extract_stoichiometry_variables(&q(text));
        assert_eq!(vars.get(keys::MASS), Some(12.0));
        assert_eq!(vars.get(keys::OXYGEN_MASS), Some(80.0));
        assert_eq!(vars.get(keys::CO2_MASS), Some(35.0));

        let vars = extract_stoichiometry_variables(&q(
            "Burning 8.0 g of methane (CH4) gives water. The student collected 16.2 g.",
        ));
        assert_eq!(vars.get(keys::WATER_MASS), Some(16.2));

        assert!(follows_yield_word("we obtained 3 g", 12));
        assert!(!follows_yield_word("a sample of 3 g", 12));
    }

    #[test]
    fn test_formula_tokens() {
        let formulas = extract_formulas(&q("How many moles are in 36.0 g of H₂O and NaCl? If A"));
        assert_eq!(formulas, vec!["H2O".to_string(), "NaCl".to_string()]);
        assert!(extract_formulas(&q("At STP, what happens?")).is_empty());
    }

    #[test]
    fn test_other_topics() {
        let vars = extract_ph_variables(&q("What is the pH of a solution with [H+] = 0.001 M?"));
        assert_eq!(vars.get(keys::PH), Some(0.001));

        let vars = extract_concentration_variables(&q("0.50 mol of NaCl dissolved in 250 mL"));
        assert_eq!(vars.get(keys::MOLES), Some(0.5));
        assert_relative_eq!(vars.get(keys::VOLUME).unwrap(), 0.25, epsilon = 1e-12);

        let vars = extract_thermochemistry_variables(&q("Heat needed to warm 50 g of water by 20 °C"));
        assert_eq!(vars.get(keys::MASS), Some(50.0));
        assert_eq!(vars.get(keys::TEMPERATURE_CHANGE), Some(20.0));
    }
}
