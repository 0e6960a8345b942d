/// Module to calculate the atomic composition and molar mass of a chemical formula
///
/// Formulas may contain brackets with a multiplier (`Ca(NO3)2`), phase marks (`H2O(g)`)
/// and unicode subscripts (`CH₄`). Atomic masses are IUPAC conventional values, used
/// everywhere in the crate so that all worked solutions agree with each other.
use std::collections::HashMap;
use thiserror::Error;

// Define a struct to hold element data
#[derive(Debug, Clone, Copy)]
pub struct Element {
    pub name: &'static str,
    pub atomic_mass: f64,
}

pub const CARBON_MASS: f64 = 12.011;
pub const HYDROGEN_MASS: f64 = 1.008;
pub const OXYGEN_MASS: f64 = 15.999;

// Define a list of elements and their atomic masses
const ELEMENTS: &[Element] = &[
    Element { name: "H", atomic_mass: HYDROGEN_MASS },
    Element { name: "He", atomic_mass: 4.0026 },
    Element { name: "Li", atomic_mass: 6.94 },
    Element { name: "Be", atomic_mass: 9.0122 },
    Element { name: "B", atomic_mass: 10.81 },
    Element { name: "C", atomic_mass: CARBON_MASS },
    Element { name: "N", atomic_mass: 14.007 },
    Element { name: "O", atomic_mass: OXYGEN_MASS },
    Element { name: "F", atomic_mass: 18.998 },
    Element { name: "Ne", atomic_mass: 20.18 },
    Element { name: "Na", atomic_mass: 22.99 },
    Element { name: "Mg", atomic_mass: 24.305 },
    Element { name: "Al", atomic_mass: 26.982 },
    Element { name: "Si", atomic_mass: 28.085 },
    Element { name: "P", atomic_mass: 30.974 },
    Element { name: "S", atomic_mass: 32.06 },
    Element { name: "Cl", atomic_mass: 35.45 },
    Element { name: "Ar", atomic_mass: 39.948 },
    Element { name: "K", atomic_mass: 39.098 },
    Element { name: "Ca", atomic_mass: 40.078 },
    Element { name: "Sc", atomic_mass: 44.956 },
    Element { name: "Ti", atomic_mass: 47.867 },
    Element { name: "V", atomic_mass: 50.942 },
    Element { name: "Cr", atomic_mass: 51.996 },
    Element { name: "Mn", atomic_mass: 54.938 },
    Element { name: "Fe", atomic_mass: 55.845 },
    Element { name: "Co", atomic_mass: 58.933 },
    Element { name: "Ni", atomic_mass: 58.693 },
    Element { name: "Cu", atomic_mass: 63.546 },
    Element { name: "Zn", atomic_mass: 65.38 },
    Element { name: "Ga", atomic_mass: 69.723 },
    Element { name: "Ge", atomic_mass: 72.63 },
    Element { name: "As", atomic_mass: 74.922 },
    Element { name: "Se", atomic_mass: 78.971 },
    Element { name: "Br", atomic_mass: 79.904 },
    Element { name: "Kr", atomic_mass: 83.798 },
    Element { name: "Rb", atomic_mass: 85.468 },
    Element { name: "Sr", atomic_mass: 87.62 },
    Element { name: "Y", atomic_mass: 88.906 },
    Element { name: "Zr", atomic_mass: 91.224 },
    Element { name: "Nb", atomic_mass: 92.906 },
    Element { name: "Mo", atomic_mass: 95.95 },
    Element { name: "Ru", atomic_mass: 101.07 },
    Element { name: "Pd", atomic_mass: 106.42 },
    Element { name: "Ag", atomic_mass: 107.87 },
    Element { name: "Cd", atomic_mass: 112.41 },
    Element { name: "Sn", atomic_mass: 118.71 },
    Element { name: "Sb", atomic_mass: 121.76 },
    Element { name: "I", atomic_mass: 126.90 },
    Element { name: "Xe", atomic_mass: 131.29 },
    Element { name: "Cs", atomic_mass: 132.91 },
    Element { name: "Ba", atomic_mass: 137.33 },
    Element { name: "W", atomic_mass: 183.84 },
    Element { name: "Pt", atomic_mass: 195.08 },
    Element { name: "Au", atomic_mass: 196.97 },
    Element { name: "Hg", atomic_mass: 200.59 },
    Element { name: "Pb", atomic_mass: 207.2 },
    Element { name: "U", atomic_mass: 238.03 },
];

/// errors produced while parsing a chemical formula
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Formula is empty")]
    Empty,
    #[error("Unknown element '{0}'")]
    UnknownElement(String),
    #[error("Unbalanced bracket in formula '{0}'")]
    UnbalancedBracket(String),
    #[error("Malformed formula '{0}'")]
    Malformed(String),
}

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|element| element.name == symbol)
        .map(|element| element.atomic_mass)
}

/// Maps unicode subscript digits (₀–₉) to ASCII digits, so CH₄ becomes CH4
pub fn normalize_subscripts(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '₀'..='₉' => char::from(b'0' + (c as u32 - '₀' as u32) as u8),
            _ => c,
        })
        .collect()
}

fn filter_phases_marks(formula: &str) -> String {
    let mut formula = formula.to_string();
    let phases = ["(aq)", "(C)", "(c)", "(L)", "(l)", "(G)", "(g)", "(S)", "(s)"];
    for phase in phases {
        formula = formula.replace(phase, "");
    }
    formula
}

fn read_count(chars: &[char], i: &mut usize, formula: &str) -> Result<usize, FormulaError> {
    let start = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    if start == *i {
        return Ok(1);
    }
    chars[start..*i]
        .iter()
        .collect::<String>()
        .parse()
        .map_err(|_| FormulaError::Malformed(formula.to_string()))
}

// atom counts come from free text, so every sum and product is checked
fn add_atoms(
    counts: &mut HashMap<String, usize>,
    element: String,
    count: usize,
    formula: &str,
) -> Result<(), FormulaError> {
    let entry = counts.entry(element).or_insert(0);
    *entry = entry
        .checked_add(count)
        .ok_or_else(|| FormulaError::Malformed(formula.to_string()))?;
    Ok(())
}

// recursive part of the parser: reads elements until the end of formula or until the closing
// bracket of the current group, stoichiometric coefficient after a bracket multiplies the group
fn parse_group(
    chars: &[char],
    i: &mut usize,
    formula: &str,
    nested: bool,
) -> Result<HashMap<String, usize>, FormulaError> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    while *i < chars.len() {
        let c = chars[*i];
        if c == '(' || c == '[' {
            *i += 1;
            let inner = parse_group(chars, i, formula, true)?;
            let multiplier = read_count(chars, i, formula)?;
            for (element, count) in inner {
                let count = count
                    .checked_mul(multiplier)
                    .ok_or_else(|| FormulaError::Malformed(formula.to_string()))?;
                add_atoms(&mut counts, element, count, formula)?;
            }
        } else if c == ')' || c == ']' {
            if !nested {
                return Err(FormulaError::UnbalancedBracket(formula.to_string()));
            }
            *i += 1;
            return Ok(counts);
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            *i += 1;
            if *i < chars.len() && chars[*i].is_ascii_lowercase() {
                symbol.push(chars[*i]);
                *i += 1;
            }
            if atomic_mass(&symbol).is_none() {
                return Err(FormulaError::UnknownElement(symbol));
            }
            let count = read_count(chars, i, formula)?;
            add_atoms(&mut counts, symbol, count, formula)?;
        } else {
            return Err(FormulaError::Malformed(formula.to_string()));
        }
    }
    if nested {
        return Err(FormulaError::UnbalancedBracket(formula.to_string()));
    }
    Ok(counts)
}

/// Parses a chemical formula and returns a HashMap of elements and their counts
pub fn parse_formula(formula: &str) -> Result<HashMap<String, usize>, FormulaError> {
    let formula = normalize_subscripts(&formula.replace(' ', ""));
    let formula = filter_phases_marks(&formula);
    if formula.is_empty() {
        return Err(FormulaError::Empty);
    }
    let chars: Vec<char> = formula.chars().collect();
    let mut i = 0;
    let counts = parse_group(&chars, &mut i, &formula, false)?;
    if counts.is_empty() {
        return Err(FormulaError::Malformed(formula));
    }
    Ok(counts)
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(
    formula: &str,
) -> Result<(f64, HashMap<String, usize>), FormulaError> {
    let counts = parse_formula(formula)?;
    let mut molar_mass = 0.0;
    for (element, count) in &counts {
        let mass = atomic_mass(element).ok_or_else(|| FormulaError::UnknownElement(element.clone()))?;
        molar_mass += mass * *count as f64;
    }
    Ok((molar_mass, counts))
}

/// Element composition ordered as written in the formula (Hill-like order of first appearance),
/// used when a worked solution lists the elements one by one
pub fn ordered_composition(formula: &str) -> Result<Vec<(String, usize, f64)>, FormulaError> {
    let counts = parse_formula(formula)?;
    let normalized = normalize_subscripts(formula);
    let mut order: Vec<String> = Vec::new();
    let chars: Vec<char> = normalized.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_ascii_uppercase() {
            let mut symbol = chars[i].to_string();
            if i + 1 < chars.len() && chars[i + 1].is_ascii_lowercase() {
                symbol.push(chars[i + 1]);
            }
            if counts.contains_key(&symbol) && !order.contains(&symbol) {
                order.push(symbol);
            }
        }
        i += 1;
    }
    Ok(order
        .into_iter()
        .filter_map(|symbol| {
            let count = *counts.get(&symbol)?;
            let mass = atomic_mass(&symbol)?;
            Some((symbol, count, mass))
        })
        .collect())
}

/// Molar mass of a hydrocarbon CxHy
pub fn hydrocarbon_molar_mass(carbon_atoms: u32, hydrogen_atoms: u32) -> f64 {
    carbon_atoms as f64 * CARBON_MASS + hydrogen_atoms as f64 * HYDROGEN_MASS
}

pub fn co2_molar_mass() -> f64 {
    CARBON_MASS + 2.0 * OXYGEN_MASS
}

pub fn o2_molar_mass() -> f64 {
    2.0 * OXYGEN_MASS
}

pub fn h2o_molar_mass() -> f64 {
    2.0 * HYDROGEN_MASS + OXYGEN_MASS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_formula() {
        let expected_counts = HashMap::from([
            ("C".to_string(), 6),
            ("H".to_string(), 8),
            ("O".to_string(), 6),
        ]);
        assert_eq!(parse_formula("C6H8O6").unwrap(), expected_counts);

        let expected_counts = HashMap::from([
            ("Na".to_string(), 1),
            ("N".to_string(), 2),
            ("O".to_string(), 6),
        ]);
        assert_eq!(parse_formula("Na(NO3)2").unwrap(), expected_counts);

        let expected_counts = HashMap::from([("H".to_string(), 2), ("O".to_string(), 1)]);
        assert_eq!(parse_formula("H2O").unwrap(), expected_counts);

        let expected_counts = HashMap::from([
            ("C".to_string(), 5),
            ("H".to_string(), 7),
            ("O".to_string(), 2),
        ]);
        assert_eq!(parse_formula("C5H6OOH").unwrap(), expected_counts);
    }

    #[test]
    fn test_subscripts_and_phases() {
        let expected_counts = HashMap::from([("C".to_string(), 1), ("H".to_string(), 4)]);
        assert_eq!(parse_formula("CH₄").unwrap(), expected_counts);
        assert_eq!(parse_formula("CH4(g)").unwrap(), expected_counts);
        assert_eq!(normalize_subscripts("C₃H₈ + 5O₂"), "C3H8 + 5O2");
    }

    #[test]
    fn test_calculate_molar_mass() {
        let (molar_mass, _) = calculate_molar_mass("H2O(g)").unwrap();
        assert!((molar_mass - 18.01528).abs() < 1e-2);

        let (molar_mass, _) = calculate_molar_mass("NaCl").unwrap();
        assert!((molar_mass - 58.44).abs() < 1e-2);

        let (molar_mass, _) = calculate_molar_mass("C6H8O6").unwrap();
        assert!((molar_mass - 176.12).abs() < 1e-2);

        let (molar_mass, _) = calculate_molar_mass("Ca(NO3)2").unwrap();
        assert!((molar_mass - 164.09).abs() < 1e-2);
    }

    #[test]
    fn test_reference_molar_masses() {
        assert_relative_eq!(co2_molar_mass(), 44.009, epsilon = 1e-9);
        assert_relative_eq!(o2_molar_mass(), 31.998, epsilon = 1e-9);
        assert_relative_eq!(hydrocarbon_molar_mass(3, 8), 44.097, epsilon = 1e-9);
        let (propane, _) = calculate_molar_mass("C3H8").unwrap();
        assert_relative_eq!(propane, hydrocarbon_molar_mass(3, 8), epsilon = 1e-9);
    }

    #[test]
    fn test_bad_formulas() {
        assert_eq!(parse_formula(""), Err(FormulaError::Empty));
        assert_eq!(
            parse_formula("Xy2"),
            Err(FormulaError::UnknownElement("Xy".to_string()))
        );
        assert!(matches!(
            parse_formula("Ca(NO3"),
            Err(FormulaError::UnbalancedBracket(_))
        ));
        assert!(matches!(parse_formula("H2O)"), Err(FormulaError::UnbalancedBracket(_))));
        assert!(matches!(parse_formula("h2o"), Err(FormulaError::Malformed(_))));
    }

    #[test]
    fn test_oversized_counts() {
        assert!(matches!(
            parse_formula("H18446744073709551615H1"),
            Err(FormulaError::Malformed(_))
        ));
        assert!(matches!(
            parse_formula("H99999999999999999999999"),
            Err(FormulaError::Malformed(_))
        ));
        assert!(matches!(
            parse_formula("(H4294967296)4294967296"),
            Err(FormulaError::Malformed(_))
        ));
        assert_eq!(parse_formula("H2H3").unwrap()["H"], 5);
    }

    #[test]
    fn test_ordered_composition() {
        let composition = ordered_composition("H2SO4").unwrap();
        let symbols: Vec<&str> = composition.iter().map(|(s, _, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["H", "S", "O"]);
        assert_eq!(composition[2].1, 4);
    }
}
