//! # Calculators
//!
//! Manual calculators: the user supplies the numbers directly instead of a free-text question.
//! Every calculator returns the same worked [`SolverResponse`] a solved question does, so the
//! presentation layer renders both the same way.
//!
//! | id | formula |
//! |---|---|
//! | `boyles-law` | P₂ = P₁V₁/V₂ |
//! | `ph-from-concentration` | pH = -log[H⁺], pOH = 14 - pH |
//! | `concentration-from-ph` | [H⁺] = 10^(-pH) |
//! | `molarity` | M = n/V |
//! | `heat` | q = mcΔT |
//! | `molar-mass` | M = Σ(atomic mass × count) |
//! | `unit-converter` | value × factor |
//! | `faraday-electrolysis` | Q = I·t, n(e⁻) = Q/F |
//! | `half-life` | N = N₀(1/2)^(t/t₁/₂), solved for t₁/₂, N or t |
//! | `electron-configuration` | Aufbau filling order |
use crate::reference_data::molmass::ordered_composition;
use crate::reference_data::units::{Unit, convert};
use crate::solver::classifier::Topic;
use crate::solver::errors::{SolverError, checked_div, finite};
use crate::solver::extractor::{Quantities, keys};
use crate::solver::formatting::{
    MOLE_DECIMALS, RESULT_DECIMALS, fixed, latex_formula, trimmed, unicode_formula,
};
use crate::solver::gas_laws::{GasLaw, P1, P2, V1, V2};
use crate::solver::types::{Calculator, ResponseBuilder, SolutionStep, SolverResponse, Variable};
use log::debug;
use std::f64::consts::LN_2;

pub use crate::reference_data::units::common_units;

/// Worked calculators are exact arithmetic on user numbers
const CALCULATOR_CONFIDENCE: f64 = 1.0;
const PH_NEUTRAL: f64 = 7.0;
const PH_SCALE: f64 = 14.0;
const INTERPRET_ACIDITY: &str = "Determine if the solution is acidic, basic, or neutral";
/// Faraday constant in C/mol
pub const FARADAY_CONSTANT: f64 = 96485.0;
pub const MAX_ATOMIC_NUMBER: u32 = 118;

/// Subshells in Aufbau (Madelung) filling order with their capacities
const AUFBAU_ORDER: [(&str, u32); 19] = [
    ("1s", 2),
    ("2s", 2),
    ("2p", 6),
    ("3s", 2),
    ("3p", 6),
    ("4s", 2),
    ("3d", 10),
    ("4p", 6),
    ("5s", 2),
    ("4d", 10),
    ("5p", 6),
    ("6s", 2),
    ("4f", 14),
    ("5d", 10),
    ("6p", 6),
    ("7s", 2),
    ("5f", 14),
    ("6d", 10),
    ("7p", 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorKind {
    BoylesLaw,
    PhFromConcentration,
    ConcentrationFromPh,
    Molarity,
    Heat,
    MolarMass,
    UnitConverter,
    Faraday,
    HalfLife,
    ElectronConfiguration,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 10] = [
        CalculatorKind::BoylesLaw,
        CalculatorKind::PhFromConcentration,
        CalculatorKind::ConcentrationFromPh,
        CalculatorKind::Molarity,
        CalculatorKind::Heat,
        CalculatorKind::MolarMass,
        CalculatorKind::UnitConverter,
        CalculatorKind::Faraday,
        CalculatorKind::HalfLife,
        CalculatorKind::ElectronConfiguration,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CalculatorKind::BoylesLaw => "boyles-law",
            CalculatorKind::PhFromConcentration => "ph-from-concentration",
            CalculatorKind::ConcentrationFromPh => "concentration-from-ph",
            CalculatorKind::Molarity => "molarity",
            CalculatorKind::Heat => "heat",
            CalculatorKind::MolarMass => "molar-mass",
            CalculatorKind::UnitConverter => "unit-converter",
            CalculatorKind::Faraday => "faraday-electrolysis",
            CalculatorKind::HalfLife => "half-life",
            CalculatorKind::ElectronConfiguration => "electron-configuration",
        }
    }

    pub fn from_id(id: &str) -> Option<CalculatorKind> {
        CalculatorKind::ALL.into_iter().find(|k| k.id() == id)
    }

    /// Static description shown in the calculator list
    pub fn describe(&self) -> Calculator {
        let (name, description, inputs, outputs, formula, latex) = match self {
            CalculatorKind::BoylesLaw => (
                "Boyle's Law Calculator",
                "Final pressure of a gas compressed or expanded at constant temperature",
                vec![
                    Variable::new(P1.name, P1.symbol, P1.unit, "Initial pressure"),
                    Variable::new(V1.name, V1.symbol, V1.unit, "Initial volume"),
                    Variable::new(V2.name, V2.symbol, V2.unit, "Final volume"),
                ],
                vec![Variable::new(P2.name, P2.symbol, P2.unit, "Final pressure")],
                "P₂ = P₁V₁/V₂",
                "P_2 = \\frac{P_1 V_1}{V_2}",
            ),
            CalculatorKind::PhFromConcentration => (
                "pH Calculator",
                "pH and pOH from the hydrogen ion concentration",
                vec![Variable::new(
                    "Hydrogen Ion Concentration",
                    "[H⁺]",
                    "M",
                    "Molar concentration of H⁺",
                )],
                vec![
                    Variable::new("pH", "pH", "", "Negative logarithm of [H⁺]"),
                    Variable::new("pOH", "pOH", "", "14 - pH"),
                ],
                "pH = -log[H⁺]",
                "pH = -\\log[H^+]",
            ),
            CalculatorKind::ConcentrationFromPh => (
                "[H⁺] Calculator",
                "Hydrogen ion concentration from the pH",
                vec![Variable::new("pH", "pH", "", "pH of the solution")],
                vec![Variable::new(
                    "Hydrogen Ion Concentration",
                    "[H⁺]",
                    "M",
                    "Molar concentration of H⁺",
                )],
                "[H⁺] = 10^(-pH)",
                "[H^+] = 10^{-pH}",
            ),
            CalculatorKind::Molarity => (
                "Molarity Calculator",
                "Molar concentration of a solution",
                vec![
                    Variable::new("Moles of Solute", "n", "mol", "Amount of dissolved substance"),
                    Variable::new("Volume of Solution", "V", "L", "Total solution volume"),
                ],
                vec![Variable::new("Molarity", "M", "M", "Moles of solute per liter of solution")],
                "M = n/V",
                "M = \\frac{n}{V}",
            ),
            CalculatorKind::Heat => (
                "Heat Transfer Calculator",
                "Heat absorbed or released when a substance changes temperature",
                vec![
                    Variable::new("Mass", "m", "g", "Mass of the substance"),
                    Variable::new("Specific Heat", "c", "J/g°C", "Specific heat capacity"),
                    Variable::new("Temperature Change", "ΔT", "°C", "Final minus initial"),
                ],
                vec![Variable::new("Heat", "q", "J", "Heat transferred")],
                "q = mcΔT",
                "q = mc\\Delta T",
            ),
            CalculatorKind::MolarMass => (
                "Molar Mass Calculator",
                "Molar mass of a chemical formula from standard atomic weights",
                vec![Variable::new("Formula", "formula", "", "Chemical formula such as Ca(NO3)2")],
                vec![Variable::new("Molar Mass", "M", "g/mol", "Mass of one mole")],
                "M = Σ(atomic mass × count)",
                "M = \\sum_i n_i A_i",
            ),
            CalculatorKind::UnitConverter => (
                "Unit Converter",
                "Pressure, volume, temperature, mass and amount conversions",
                vec![Variable::new("Value", "x", "", "Value to convert")],
                vec![Variable::new("Converted Value", "x'", "", "Value in the target unit")],
                "x' = x × factor",
                "x' = x \\cdot f",
            ),
            CalculatorKind::Faraday => (
                "Faraday Electrolysis Calculator",
                "Charge passed and moles of electrons transferred during electrolysis",
                vec![
                    Variable::new("Current", "I", "A", "Constant current"),
                    Variable::new("Time", "t", "s", "Duration of the electrolysis"),
                ],
                vec![
                    Variable::new("Charge", "Q", "C", "Total charge passed"),
                    Variable::new("Moles of Electrons", "n(e⁻)", "mol", "Q divided by F"),
                ],
                "Q = I·t, n(e⁻) = Q/F",
                "Q = It, \\quad n_{e^-} = \\frac{Q}{F}",
            ),
            CalculatorKind::HalfLife => (
                "Half-Life Calculator",
                "Half-life, remaining amount or elapsed time from the other three",
                vec![
                    Variable::new("Initial Amount", "N₀", "", "Amount at t = 0"),
                    Variable::new("Remaining Amount", "N", "", "Amount after time t").optional(),
                    Variable::new("Elapsed Time", "t", "", "Time since t = 0").optional(),
                    Variable::new("Half-Life", "t₁/₂", "", "Time for half to decay").optional(),
                ],
                vec![Variable::new("Unknown", "t₁/₂ | N | t", "", "The quantity not given")],
                "N = N₀ × (1/2)^(t/t₁/₂)",
                "N = N_0 \\left(\\tfrac{1}{2}\\right)^{t/t_{1/2}}",
            ),
            CalculatorKind::ElectronConfiguration => (
                "Electron Configuration Builder",
                "Ground-state electron configuration by the Aufbau principle",
                vec![Variable::new("Atomic Number", "Z", "", "Electrons in the neutral atom")],
                vec![Variable::new("Configuration", "config", "", "Occupied subshells")],
                "1s 2s 2p 3s 3p 4s 3d 4p 5s 4d 5p 6s 4f 5d 6p 7s 5f 6d 7p",
                "1s^2\\,2s^2\\,2p^6 \\ldots",
            ),
        };
        Calculator {
            id: self.id().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            inputs,
            outputs,
            formula: formula.to_string(),
            latex_formula: latex.to_string(),
        }
    }
}

pub fn calculator_catalog() -> Vec<Calculator> {
    CalculatorKind::ALL.iter().map(|k| k.describe()).collect()
}

fn invalid(message: String) -> SolverError {
    SolverError::InvalidInput(message)
}

fn given(name: &str, symbol: &str, unit: &str, value: f64) -> Variable {
    Variable::new(name, symbol, unit, "Given").with_value(value)
}

fn calculated(name: &str, symbol: &str, unit: &str, value: f64) -> Variable {
    Variable::new(name, symbol, unit, "Calculated").with_value(value)
}

/// P₂ from P₁, V₁ and V₂, all positive
///
/// ```
/// use chem_solver::calculators::boyles_law;
///
/// let response = boyles_law(1.5, 2.0, 0.75).unwrap();
/// assert_eq!(response.final_answer, "P₂ = 4.00 atm");
/// ```
pub fn boyles_law(p1: f64, v1: f64, v2: f64) -> Result<SolverResponse, SolverError> {
    let mut quantities = Quantities::new();
    quantities.insert(keys::PRESSURE1, p1);
    quantities.insert(keys::VOLUME1, v1);
    quantities.insert(keys::VOLUME2, v2);
    let rearranged = GasLaw::Boyle.equation().solve_for(P2);
    let (numerator, denominator, p2) = rearranged.evaluate(&quantities)?;
    let result = fixed(p2, RESULT_DECIMALS);
    debug!("boyle calculator: P₂ = {}", p2);

    let known = format!(
        "P₁ = {} atm, V₁ = {} L, V₂ = {} L",
        trimmed(p1),
        trimmed(v1),
        trimmed(v2)
    );
    let problem = format!("Calculate P₂ from {}", known);
    Ok(ResponseBuilder::new(Topic::GasLaws.display_name(), &problem)
        .variable(P1.id, given(P1.name, P1.symbol, P1.unit, p1))
        .variable(V1.id, given(V1.name, V1.symbol, V1.unit, v1))
        .variable(V2.id, given(V2.name, V2.symbol, V2.unit, v2))
        .variable(P2.id, calculated(P2.name, P2.symbol, P2.unit, p2))
        .step(
            SolutionStep::new("Identify Given Values", "List the known quantities")
                .formula(GasLaw::Boyle.formula())
                .substitution(known),
        )
        .step(
            SolutionStep::new(
                "Apply Boyle's Law",
                "Rearrange P₁V₁ = P₂V₂ for the final pressure",
            )
            .formula(rearranged.formula())
            .latex(rearranged.latex())
            .substitution(rearranged.substitution(&quantities)),
        )
        .step(
            SolutionStep::new("Calculate the Result", "Divide the product by the final volume")
                .calculation(format!("P₂ = {} / {}", trimmed(numerator), trimmed(denominator)))
                .result(result.clone())
                .result_with_units(format!("{} atm", result)),
        )
        .final_answer(format!("P₂ = {} atm", result))
        .latex(GasLaw::Boyle.latex())
        .latex(rearranged.latex())
        .confidence(CALCULATOR_CONFIDENCE)
        .interpretation(format!("The final pressure of the gas is {} atm.", result))
        .build())
}

fn acidity(ph: f64) -> &'static str {
    let hundredths = (ph * 100.0).round();
    if hundredths < PH_NEUTRAL * 100.0 {
        "acidic"
    } else if hundredths > PH_NEUTRAL * 100.0 {
        "basic"
    } else {
        "neutral"
    }
}

fn acidity_comparison(ph: f64) -> &'static str {
    match acidity(ph) {
        "acidic" => "pH < 7",
        "basic" => "pH > 7",
        _ => "pH = 7",
    }
}

/// pH and pOH from [H⁺] in mol/L; [H⁺] must be positive
pub fn ph_from_concentration(h_concentration: f64) -> Result<SolverResponse, SolverError> {
    if h_concentration.is_nan() || h_concentration <= 0.0 {
        return Err(invalid(format!(
            "[H⁺] must be positive to take its logarithm, got {}",
            h_concentration
        )));
    }
    let ph = finite(-h_concentration.log10(), "pH")?;
    let poh = PH_SCALE - ph;
    let ph_text = fixed(ph, RESULT_DECIMALS);
    let poh_text = fixed(poh, RESULT_DECIMALS);
    let nature = acidity(ph);
    let concentration = trimmed_or_scientific(h_concentration);

    Ok(ResponseBuilder::new(
        Topic::Ph.display_name(),
        &format!("Calculate pH from [H⁺] = {} M", concentration),
    )
    .variable(
        "hConcentration",
        given("Hydrogen Ion Concentration", "[H⁺]", "M", h_concentration),
    )
    .variable("ph", calculated("pH", "pH", "", ph))
    .variable("poh", calculated("pOH", "pOH", "", poh))
    .step(
        SolutionStep::new("Identify Given Concentration", "Note the hydrogen ion concentration")
            .substitution(format!("[H⁺] = {} M", concentration))
            .result("Concentration identified"),
    )
    .step(
        SolutionStep::new("Apply pH Formula", "Use the pH definition")
            .formula("pH = -log[H⁺]")
            .latex("pH = -\\log[H^+]")
            .substitution(format!("pH = -log({})", concentration))
            .calculation(format!("pH = {}", ph_text))
            .result(format!("pH = {}", ph_text)),
    )
    .step(
        SolutionStep::new("Calculate pOH", "Use the relationship pH + pOH = 14")
            .formula("pOH = 14 - pH")
            .substitution(format!("pOH = 14 - {}", ph_text))
            .calculation(format!("pOH = {}", poh_text))
            .result(format!("pOH = {}", poh_text)),
    )
    .step(
        SolutionStep::new("Interpret Result", INTERPRET_ACIDITY)
            .substitution(acidity_comparison(ph))
            .result(format!("{} solution", capitalize(nature))),
    )
    .final_answer(format!("pH = {}, pOH = {}", ph_text, poh_text))
    .latex(format!("pH = -\\log[H^+] = -\\log({}) = {}", concentration, ph_text))
    .latex(format!("pOH = 14 - pH = 14 - {} = {}", ph_text, poh_text))
    .confidence(CALCULATOR_CONFIDENCE)
    .interpretation(format!("The solution has a pH of {}, making it {}.", ph_text, nature))
    .build())
}

/// [H⁺] in mol/L from the pH
pub fn concentration_from_ph(ph: f64) -> Result<SolverResponse, SolverError> {
    let ph = finite(ph, "pH")?;
    let concentration = finite(10f64.powf(-ph), "[H⁺]")?;
    let poh = PH_SCALE - ph;
    let concentration_text = format!("{:.4e}", concentration);
    let ph_text = trimmed(ph);

    let problem = format!("Calculate [H⁺] from pH = {}", ph_text);
    let nature = format!(
        "{} solution, pOH = {}",
        capitalize(acidity(ph)),
        fixed(poh, RESULT_DECIMALS)
    );
    Ok(ResponseBuilder::new(Topic::Ph.display_name(), &problem)
        .variable("ph", given("pH", "pH", "", ph))
        .variable(
            "hConcentration",
            calculated("Hydrogen Ion Concentration", "[H⁺]", "M", concentration),
        )
        .step(
            SolutionStep::new("Identify Given pH", "Note the pH of the solution")
                .substitution(format!("pH = {}", ph_text)),
        )
        .step(
            SolutionStep::new("Invert the pH Definition", "pH = -log[H⁺] gives [H⁺] = 10^(-pH)")
                .formula("[H⁺] = 10^(-pH)")
                .latex("[H^+] = 10^{-pH}")
                .substitution(format!("[H⁺] = 10^(-{})", ph_text))
                .calculation(format!("[H⁺] = {}", concentration_text))
                .result(concentration_text.clone())
                .result_with_units(format!("{} M", concentration_text)),
        )
        .step(
            SolutionStep::new("Interpret Result", INTERPRET_ACIDITY)
                .substitution(acidity_comparison(ph))
                .result(nature),
        )
        .final_answer(format!("[H⁺] = {} M", concentration_text))
        .latex(format!("[H^+] = 10^{{-{}}} = {}", ph_text, concentration_text))
        .confidence(CALCULATOR_CONFIDENCE)
        .interpretation(format!(
            "A pH of {} corresponds to [H⁺] = {} M.",
            ph_text, concentration_text
        ))
        .build())
}

/// M = n/V with the volume in liters
pub fn molarity(moles: f64, volume_liters: f64) -> Result<SolverResponse, SolverError> {
    if moles < 0.0 {
        return Err(invalid(format!("amount of solute cannot be negative, got {} mol", moles)));
    }
    if volume_liters.is_nan() || volume_liters <= 0.0 {
        return Err(invalid(format!("solution volume must be positive, got {} L", volume_liters)));
    }
    let molarity = checked_div(moles, volume_liters, "molarity")?;
    let result = fixed(molarity, 3);
    let n = trimmed(moles);
    let v = trimmed(volume_liters);

    Ok(ResponseBuilder::new(
        Topic::Concentration.display_name(),
        &format!("Calculate molarity of {} mol of solute in {} L of solution", n, v),
    )
    .variable(keys::MOLES, given("Moles of Solute", "n", "mol", moles))
    .variable(keys::VOLUME, given("Volume of Solution", "V", "L", volume_liters))
    .variable("molarity", calculated("Molarity", "M", "M", molarity))
    .step(
        SolutionStep::new("Identify Given Values", "List the known quantities")
            .substitution(format!("Moles = {} mol, Volume = {} L", n, v))
            .result("Given values identified"),
    )
    .step(
        SolutionStep::new("Apply Formula", "Use the molarity formula")
            .formula("M = n/V")
            .latex("M = \\frac{n}{V}")
            .substitution(format!("M = {} / {}", n, v))
            .calculation(format!("M = {}", result))
            .result(result.clone())
            .result_with_units(format!("{} M", result)),
    )
    .step(
        SolutionStep::new("Check Units", "Verify units are correct")
            .substitution("mol/L = M (molarity)")
            .result("Units are consistent"),
    )
    .final_answer(format!("{} M", result))
    .latex(format!("M = \\frac{{{}}}{{{}}} = {} \\text{{ M}}", n, v, result))
    .confidence(CALCULATOR_CONFIDENCE)
    .interpretation(format!("The molarity of the solution is {} M.", result))
    .build())
}

/// q = m·c·ΔT in joules; positive q is heat absorbed by the substance
pub fn heat(
    mass_grams: f64,
    specific_heat: f64,
    delta_t: f64,
) -> Result<SolverResponse, SolverError> {
    if mass_grams < 0.0 || specific_heat < 0.0 {
        return Err(invalid("mass and specific heat cannot be negative".to_string()));
    }
    let q = finite(mass_grams * specific_heat * delta_t, "q")?;
    let joules = fixed(q, 1);
    let kilojoules = fixed(q / 1000.0, 3);
    let (sign, direction) = if q > 0.0 {
        ("q > 0", "Heat absorbed (endothermic)")
    } else if q < 0.0 {
        ("q < 0", "Heat released (exothermic)")
    } else {
        ("q = 0", "No net heat transfer")
    };
    let (m, c, dt) = (trimmed(mass_grams), trimmed(specific_heat), trimmed(delta_t));
    let interpretation = if q == 0.0 {
        "No heat is transferred during this process.".to_string()
    } else {
        format!(
            "{} J of heat is {} during this process.",
            fixed(q.abs(), 1),
            if q > 0.0 { "absorbed" } else { "released" }
        )
    };

    let problem = "Calculate heat transfer using q = mcΔT";
    Ok(ResponseBuilder::new(Topic::Thermochemistry.display_name(), problem)
        .variable(keys::MASS, given("Mass", "m", "g", mass_grams))
        .variable("specificHeat", given("Specific Heat", "c", "J/g°C", specific_heat))
        .variable(
            keys::TEMPERATURE_CHANGE,
            given("Temperature Change", "ΔT", "°C", delta_t),
        )
        .variable("heat", calculated("Heat", "q", "J", q))
        .step(
            SolutionStep::new("Identify Given Values", "List the known quantities")
                .substitution(format!("m = {} g, c = {} J/g°C, ΔT = {} °C", m, c, dt))
                .result("Given values identified"),
        )
        .step(
            SolutionStep::new("Apply Heat Equation", "Use the heat capacity formula")
                .formula("q = mcΔT")
                .latex("q = mc\\Delta T")
                .substitution(format!("q = ({})({})({})", m, c, dt))
                .calculation(format!("q = {} J", joules))
                .result(format!("q = {} J", joules)),
        )
        .step(
            SolutionStep::new("Interpret Sign", "Determine if heat is absorbed or released")
                .substitution(sign)
                .result(direction),
        )
        .step(
            SolutionStep::new("Convert Units", "Express in kilojoules")
                .substitution(format!("q = {} J = {} kJ", joules, kilojoules))
                .result(format!("q = {} kJ", kilojoules))
                .result_with_units(format!("{} kJ", kilojoules)),
        )
        .final_answer(format!("{} J ({} kJ)", joules, kilojoules))
        .latex(format!("q = mc\\Delta T = ({})({})({}) = {} \\text{{ J}}", m, c, dt, joules))
        .confidence(CALCULATOR_CONFIDENCE)
        .interpretation(interpretation)
        .build())
}

/// Molar mass with a per-element breakdown
pub fn molar_mass(formula: &str) -> Result<SolverResponse, SolverError> {
    let composition = ordered_composition(formula)?;
    let display = unicode_formula(formula.trim());
    let mut total = 0.0;
    let mut lines = Vec::with_capacity(composition.len());
    for (symbol, count, mass) in &composition {
        let contribution = mass * *count as f64;
        total += contribution;
        lines.push(format!("{}: {} × {} = {:.3} g/mol", symbol, mass, count, contribution));
    }
    let total = finite(total, "molar mass")?;
    let result = fixed(total, RESULT_DECIMALS);
    let elements = composition
        .iter()
        .map(|(symbol, count, _)| format!("{} × {}", symbol, count))
        .collect::<Vec<_>>()
        .join(", ");
    let sum = composition
        .iter()
        .map(|(_, count, mass)| format!("{} × {}", mass, count))
        .collect::<Vec<_>>()
        .join(" + ");

    let problem = format!("Calculate the molar mass of {}", display);
    Ok(ResponseBuilder::new(Topic::GeneralChemistry.display_name(), &problem)
        .variable("formula", Variable::new("Formula", &display, "", "Given formula"))
        .variable("molarMass", calculated("Molar Mass", "M", "g/mol", total))
        .step(
            SolutionStep::new("Break Down the Formula", "Count the atoms of each element")
                .substitution(elements)
                .result(format!("{} elements", composition.len())),
        )
        .step(
            SolutionStep::new("Look Up Atomic Masses", "Multiply each atomic mass by its count")
                .calculation(lines.join("\n")),
        )
        .step(
            SolutionStep::new("Add the Contributions", "Sum the contributions of all elements")
                .formula("M = Σ(atomic mass × count)")
                .latex("M = \\sum_i n_i A_i")
                .substitution(format!("M = {}", sum))
                .calculation(format!("M = {:.3} g/mol", total))
                .result(result.clone())
                .result_with_units(format!("{} g/mol", result)),
        )
        .final_answer(format!("{} g/mol", result))
        .latex(format!("M({}) = {} \\text{{ g/mol}}", latex_formula(formula.trim()), result))
        .confidence(CALCULATOR_CONFIDENCE)
        .interpretation(format!("One mole of {} has a mass of {} g.", display, result))
        .build())
}

/// Converts between two units of the same dimension; the result is shown in scientific notation
pub fn convert_units(value: f64, from: &str, to: &str) -> Result<SolverResponse, SolverError> {
    let value = finite(value, "value")?;
    let from_unit =
        Unit::from_token(from).ok_or_else(|| invalid(format!("unknown unit '{}'", from)))?;
    let to_unit = Unit::from_token(to).ok_or_else(|| invalid(format!("unknown unit '{}'", to)))?;
    let converted = convert(value, from_unit, to_unit).ok_or_else(|| {
        invalid(format!(
            "cannot convert {} to {}: different quantities",
            from_unit.symbol(),
            to_unit.symbol()
        ))
    })?;
    let converted = finite(converted, "converted value")?;
    let canonical = from_unit.to_canonical(value);
    let canonical_unit = from_unit.dimension().canonical_unit();
    let result = format!("{:.4e}", converted);
    let (from_symbol, to_symbol) = (from_unit.symbol(), to_unit.symbol());
    let (x, base) = (trimmed(value), trimmed(canonical));

    Ok(ResponseBuilder::new(
        Topic::GeneralChemistry.display_name(),
        &format!("Convert {} {} to {}", x, from_symbol, to_symbol),
    )
    .variable("value", given("Value", "x", from_symbol, value))
    .variable("convertedValue", calculated("Converted Value", "x'", to_symbol, converted))
    .step(
        SolutionStep::new(
            "Convert to the Base Unit",
            format!("Express the value in {}", canonical_unit),
        )
        .substitution(format!("{} {} = {} {}", x, from_symbol, base, canonical_unit)),
    )
    .step(
        SolutionStep::new(
            "Convert to the Target Unit",
            format!("Express the value in {}", to_symbol),
        )
        .calculation(format!("{} {} = {} {}", base, canonical_unit, result, to_symbol))
        .result(result.clone())
        .result_with_units(format!("{} {}", result, to_symbol)),
    )
    .final_answer(format!("{} {} = {} {}", x, from_symbol, result, to_symbol))
    .confidence(CALCULATOR_CONFIDENCE)
    .build())
}

/// Q = I·t and n(e⁻) = Q/F for a constant current in amperes over a time in seconds
pub fn faraday(current: f64, time_seconds: f64) -> Result<SolverResponse, SolverError> {
    if current.is_nan() || current <= 0.0 || time_seconds.is_nan() || time_seconds <= 0.0 {
        return Err(invalid(format!(
            "current and time must be positive, got I = {} A, t = {} s",
            current, time_seconds
        )));
    }
    let charge = finite(current * time_seconds, "charge")?;
    let electrons = checked_div(charge, FARADAY_CONSTANT, "moles of electrons")?;
    let (i, t, q) = (trimmed(current), trimmed(time_seconds), trimmed(charge));
    let moles = fixed(electrons, MOLE_DECIMALS);
    debug!("faraday calculator: Q = {} C, n(e⁻) = {} mol", charge, electrons);

    Ok(ResponseBuilder::new(
        "Electrochemistry - Electrolysis",
        &format!("Calculate the charge and moles of electrons for {} A over {} s", i, t),
    )
    .variable("current", given("Current", "I", "A", current))
    .variable("time", given("Time", "t", "s", time_seconds))
    .variable("charge", calculated("Charge", "Q", "C", charge))
    .variable("molesElectrons", calculated("Moles of Electrons", "n(e⁻)", "mol", electrons))
    .step(
        SolutionStep::new("Identify Given Values", "List the known quantities")
            .substitution(format!("I = {} A, t = {} s", i, t))
            .result("Given values identified"),
    )
    .step(
        SolutionStep::new("Calculate the Charge", "Charge is current multiplied by time")
            .formula("Q = I × t")
            .latex("Q = I t")
            .substitution(format!("Q = {} A × {} s", i, t))
            .calculation(format!("Q = {} C", q))
            .result(q.clone())
            .result_with_units(format!("{} C", q)),
    )
    .step(
        SolutionStep::new(
            "Convert Charge to Moles of Electrons",
            "Divide by the Faraday constant, the charge of one mole of electrons",
        )
        .formula("n(e⁻) = Q / F")
        .latex("n_{e^-} = \\frac{Q}{F}")
        .substitution(format!("n(e⁻) = {} C / {} C/mol", q, FARADAY_CONSTANT))
        .calculation(format!("n(e⁻) = {} mol", moles))
        .result(moles.clone())
        .result_with_units(format!("{} mol", moles))
        .explanation("F = 96485 C/mol"),
    )
    .final_answer(format!("Q = {} C, n(e⁻) = {} mol", q, moles))
    .latex(format!("Q = It = ({})({}) = {} \\text{{ C}}", i, t, q))
    .latex(format!("n_{{e^-}} = \\frac{{{}}}{{96485}} = {} \\text{{ mol}}", q, moles))
    .confidence(CALCULATOR_CONFIDENCE)
    .interpretation(format!("{} C of charge transfers {} mol of electrons.", q, moles))
    .build())
}

/// Which quantity of the decay law N = N₀(1/2)^(t/t₁/₂) is unknown
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalfLifeQuery {
    HalfLife { initial: f64, remaining: f64, time: f64 },
    Remaining { initial: f64, half_life: f64, time: f64 },
    Time { initial: f64, remaining: f64, half_life: f64 },
}

impl HalfLifeQuery {
    /// Reads comma-separated `key=value` pairs with the keys `N0`, `N`, `t` and `halfLife`,
    /// e.g. "N0=1000, t=5730, N=500". A pair whose value is not a number ("t=?") is skipped.
    /// With all four given the remaining amount is recomputed.
    pub fn parse(input: &str) -> Result<HalfLifeQuery, SolverError> {
        let (mut initial, mut remaining, mut time, mut half_life) = (None, None, None, None);
        for pair in input.split(',') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let Ok(value) = value.trim().parse::<f64>() else {
                continue;
            };
            match key.trim() {
                "N0" | "N₀" => initial = Some(value),
                "N" => remaining = Some(value),
                "t" => time = Some(value),
                "halfLife" | "t1/2" | "t₁/₂" => half_life = Some(value),
                other => debug!("half-life input: ignoring key {}", other),
            }
        }
        match (initial, remaining, time, half_life) {
            (Some(initial), Some(remaining), Some(time), None) => Ok(HalfLifeQuery::HalfLife {
                initial,
                remaining,
                time,
            }),
            (Some(initial), _, Some(time), Some(half_life)) => Ok(HalfLifeQuery::Remaining {
                initial,
                half_life,
                time,
            }),
            (Some(initial), Some(remaining), None, Some(half_life)) => Ok(HalfLifeQuery::Time {
                initial,
                remaining,
                half_life,
            }),
            _ => {
                let missing = [
                    ("N₀", initial),
                    ("N", remaining),
                    ("t", time),
                    ("t₁/₂", half_life),
                ];
                Err(SolverError::missing(
                    missing.iter().filter(|(_, v)| v.is_none()).map(|(name, _)| *name),
                ))
            }
        }
    }
}

fn require_positive(value: f64, what: &str) -> Result<f64, SolverError> {
    if value.is_nan() || value <= 0.0 {
        return Err(invalid(format!("{} must be positive, got {}", what, value)));
    }
    Ok(value)
}

/// Solves the decay law for whichever of t₁/₂, N or t the query leaves out.
/// Times are in any consistent unit.
pub fn half_life(query: HalfLifeQuery) -> Result<SolverResponse, SolverError> {
    let (initial, remaining, time, half) = match query {
        HalfLifeQuery::HalfLife { initial, remaining, time } => {
            require_positive(initial, "N₀")?;
            require_positive(remaining, "N")?;
            require_positive(time, "t")?;
            if remaining >= initial {
                return Err(invalid(format!(
                    "N must be smaller than N₀ to find a half-life, got N = {}",
                    remaining
                )));
            }
            let half = checked_div(time * LN_2, (initial / remaining).ln(), "t₁/₂")?;
            (initial, remaining, time, half)
        }
        HalfLifeQuery::Remaining { initial, half_life, time } => {
            require_positive(initial, "N₀")?;
            require_positive(half_life, "t₁/₂")?;
            if time.is_nan() || time < 0.0 {
                return Err(invalid(format!("t cannot be negative, got {}", time)));
            }
            let remaining = finite(initial * 0.5f64.powf(time / half_life), "N")?;
            (initial, remaining, time, half_life)
        }
        HalfLifeQuery::Time { initial, remaining, half_life } => {
            require_positive(initial, "N₀")?;
            require_positive(remaining, "N")?;
            require_positive(half_life, "t₁/₂")?;
            if remaining > initial {
                return Err(invalid(format!(
                    "the remaining amount cannot exceed N₀, got N = {}",
                    remaining
                )));
            }
            let time = finite(half_life * (remaining / initial).ln() / 0.5f64.ln(), "t")?;
            (initial, remaining, time, half_life)
        }
    };
    let (n0, n, t, th) = (trimmed(initial), trimmed(remaining), trimmed(time), trimmed(half));
    let (title, symbol, key, value, unit, formula, latex, substitution) = match query {
        HalfLifeQuery::HalfLife { .. } => (
            "Half-life calculation",
            "t₁/₂",
            "halfLife",
            half,
            "time units",
            "t₁/₂ = t × ln(2) / ln(N₀/N)",
            "t_{1/2} = \\frac{t \\ln 2}{\\ln(N_0/N)}",
            format!("t₁/₂ = {} × 0.693 / ln({}/{})", t, n0, n),
        ),
        HalfLifeQuery::Remaining { .. } => (
            "Remaining amount calculation",
            "N",
            "remaining",
            remaining,
            "units",
            "N = N₀ × (1/2)^(t/t₁/₂)",
            "N = N_0 \\left(\\tfrac{1}{2}\\right)^{t/t_{1/2}}",
            format!("N = {} × (1/2)^({}/{})", n0, t, th),
        ),
        HalfLifeQuery::Time { .. } => (
            "Time calculation",
            "t",
            "time",
            time,
            "time units",
            "t = t₁/₂ × log₀.₅(N/N₀)",
            "t = t_{1/2} \\log_{0.5}(N/N_0)",
            format!("t = {} × log₀.₅({}/{})", th, n, n0),
        ),
    };
    let result = fixed(value, RESULT_DECIMALS);
    let half_lives = time / half;
    let known = [
        ("N₀", &n0, true),
        ("N", &n, key != "remaining"),
        ("t", &t, key != "time"),
        ("t₁/₂", &th, key != "halfLife"),
    ]
    .iter()
    .filter(|(_, _, is_given)| *is_given)
    .map(|(name, value, _)| format!("{} = {}", name, value))
    .collect::<Vec<_>>()
    .join(", ");

    let problem = format!("{}: {}", title, known);
    let quantity = |name: &str, symbol: &str, value: f64, is_unknown: bool| {
        if is_unknown {
            calculated(name, symbol, "", value)
        } else {
            given(name, symbol, "", value)
        }
    };
    Ok(ResponseBuilder::new("Nuclear Chemistry - Radioactive Decay", &problem)
        .variable("initial", quantity("Initial Amount", "N₀", initial, false))
        .variable("remaining", quantity("Remaining Amount", "N", remaining, key == "remaining"))
        .variable("time", quantity("Elapsed Time", "t", time, key == "time"))
        .variable("halfLife", quantity("Half-Life", "t₁/₂", half, key == "halfLife"))
        .step(
            SolutionStep::new("Identify Given Values", format!("The unknown is {}", symbol))
                .substitution(known)
                .result("Given values identified"),
        )
        .step(
            SolutionStep::new(
                "Apply the Decay Law",
                "Rearrange N = N₀(1/2)^(t/t₁/₂) for the unknown",
            )
            .formula(formula)
            .latex(latex)
            .substitution(substitution),
        )
        .step(
            SolutionStep::new("Calculate the Result", "Evaluate the rearranged expression")
                .calculation(format!("{} = {} {}", symbol, result, unit))
                .result(result.clone())
                .result_with_units(format!("{} {}", result, unit)),
        )
        .final_answer(format!("{} = {} {}", symbol, result, unit))
        .latex(latex)
        .confidence(CALCULATOR_CONFIDENCE)
        .interpretation(format!(
            "{} half-lives elapse, leaving {}% of the initial amount.",
            fixed(half_lives, RESULT_DECIMALS),
            fixed(remaining / initial * 100.0, RESULT_DECIMALS)
        ))
        .build())
}

fn superscript(number: u32) -> String {
    number
        .to_string()
        .chars()
        .map(|c| match c {
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '0'..='9' => char::from_u32('⁰' as u32 + (c as u32 - '0' as u32)).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// principal quantum number of a subshell label such as "4f"
fn shell(subshell: &str) -> u32 {
    subshell.chars().next().and_then(|c| c.to_digit(10)).unwrap_or(0)
}

/// Ground-state configuration of a neutral atom, subshells filled in Aufbau order
pub fn electron_configuration(atomic_number: u32) -> Result<SolverResponse, SolverError> {
    if atomic_number == 0 || atomic_number > MAX_ATOMIC_NUMBER {
        return Err(invalid(format!(
            "atomic number must be between 1 and {}, got {}",
            MAX_ATOMIC_NUMBER, atomic_number
        )));
    }
    let mut left = atomic_number;
    let mut filled: Vec<(&str, u32)> = Vec::new();
    let mut fill_lines = Vec::new();
    for (subshell, capacity) in AUFBAU_ORDER {
        if left == 0 {
            break;
        }
        let electrons = left.min(capacity);
        left -= electrons;
        filled.push((subshell, electrons));
        fill_lines.push(format!("{}: {} of {} ({} left)", subshell, electrons, capacity, left));
    }
    let config = filled
        .iter()
        .map(|(subshell, electrons)| format!("{}{}", subshell, electrons))
        .collect::<Vec<_>>()
        .join(" ");
    let pretty = filled
        .iter()
        .map(|(subshell, electrons)| format!("{}{}", subshell, superscript(*electrons)))
        .collect::<Vec<_>>()
        .join(" ");
    let latex = filled
        .iter()
        .map(|(subshell, electrons)| format!("{}^{{{}}}", subshell, electrons))
        .collect::<Vec<_>>()
        .join("\\,");
    let outer = filled.iter().map(|(subshell, _)| shell(subshell)).max().unwrap_or(1);
    let valence: u32 = filled
        .iter()
        .filter(|(subshell, _)| shell(subshell) == outer)
        .map(|(_, electrons)| electrons)
        .sum();
    debug!("electron configuration of Z = {}: {}", atomic_number, config);

    Ok(ResponseBuilder::new(
        "Atomic Structure - Electron Configuration",
        &format!("Write the electron configuration for Z = {}", atomic_number),
    )
    .variable(
        "atomicNumber",
        Variable::new("Atomic Number", "Z", "", "Given").with_value(atomic_number as f64),
    )
    .variable("configuration", Variable::new("Configuration", &pretty, "", "Ground state"))
    .step(
        SolutionStep::new("Count the Electrons", "A neutral atom has as many electrons as protons")
            .substitution(format!("Z = {} ⇒ {} electrons", atomic_number, atomic_number)),
    )
    .step(
        SolutionStep::new("Fill Subshells in Aufbau Order", "Lowest energy subshells fill first")
            .formula("1s 2s 2p 3s 3p 4s 3d 4p 5s 4d 5p 6s 4f 5d 6p 7s 5f 6d 7p")
            .calculation(fill_lines.join("\n"))
            .explanation("s holds 2, p holds 6, d holds 10 and f holds 14 electrons"),
    )
    .step(
        SolutionStep::new("Write the Configuration", "List the occupied subshells in order")
            .latex(latex.clone())
            .result(pretty.clone())
            .result_with_units(config.clone()),
    )
    .final_answer(config)
    .latex(latex)
    .confidence(CALCULATOR_CONFIDENCE)
    .interpretation(format!(
        "The outermost shell is n = {} with {} electron{}.",
        outer,
        valence,
        if valence == 1 { "" } else { "s" }
    ))
    .build())
}

fn trimmed_or_scientific(value: f64) -> String {
    if value.abs() >= 1e-4 {
        trimmed(value)
    } else {
        format!("{:e}", value)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_numbered(response: &SolverResponse) {
        for (i, step) in response.steps.iter().enumerate() {
            assert_eq!(step.step_number, i + 1);
        }
    }

    #[test]
    fn test_catalog() {
        let catalog = calculator_catalog();
        assert_eq!(catalog.len(), CalculatorKind::ALL.len());
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_id(kind.id()), Some(kind));
        }
        let boyle = &catalog[0];
        assert_eq!(boyle.id, "boyles-law");
        assert_eq!(boyle.inputs.len(), 3);
        assert_eq!(common_units("atm"), vec!["atm", "Pa", "kPa", "mmHg", "torr"]);
        assert!(common_units("furlong").is_empty());
        let json = serde_json::to_value(boyle).unwrap();
        assert_eq!(json["latexFormula"], "P_2 = \\frac{P_1 V_1}{V_2}");
    }

    #[test]
    fn test_boyles_law_calculator() {
        let response = boyles_law(1.5, 2.0, 0.75).unwrap();
        assert_eq!(response.final_answer, "P₂ = 4.00 atm");
        assert_eq!(response.steps.len(), 3);
        assert_eq!(
            response.steps[1].substitution.as_deref(),
            Some("P₂ = (1.5 atm × 2 L) / 0.75 L")
        );
        assert_numbered(&response);
        assert!(boyles_law(1.5, 2.0, 0.0).is_err());
    }

    #[test]
    fn test_ph() {
        let response = ph_from_concentration(0.001).unwrap();
        assert_eq!(response.final_answer, "pH = 3.00, pOH = 11.00");
        assert_eq!(response.steps.len(), 4);
        assert_eq!(response.steps[3].result.as_deref(), Some("Acidic solution"));
        assert_eq!(
            response.interpretation.as_deref(),
            Some("The solution has a pH of 3.00, making it acidic.")
        );
        assert_numbered(&response);

        let basic = ph_from_concentration(1e-10).unwrap();
        assert_eq!(basic.final_answer, "pH = 10.00, pOH = 4.00");
        assert_eq!(basic.steps[3].result.as_deref(), Some("Basic solution"));

        assert!(matches!(ph_from_concentration(0.0), Err(SolverError::InvalidInput(_))));
        assert!(matches!(ph_from_concentration(-1.0), Err(SolverError::InvalidInput(_))));
    }

    #[test]
    fn test_concentration_from_ph() {
        let response = concentration_from_ph(3.0).unwrap();
        assert_eq!(response.final_answer, "[H⁺] = 1.0000e-3 M");
        let concentration = response.variables["hConcentration"].value.unwrap();
        assert_relative_eq!(concentration, 1e-3, epsilon = 1e-15);
        assert!(concentration_from_ph(f64::NAN).is_err());
    }

    #[test]
    fn test_molarity() {
        let response = molarity(0.5, 2.0).unwrap();
        assert_eq!(response.final_answer, "0.250 M");
        assert_eq!(response.steps.len(), 3);
        assert!(matches!(molarity(0.5, 0.0), Err(SolverError::InvalidInput(_))));
        assert!(molarity(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_heat() {
        let response = heat(50.0, 4.184, 10.0).unwrap();
        assert_eq!(response.final_answer, "2092.0 J (2.092 kJ)");
        assert_eq!(response.steps.len(), 4);
        assert_eq!(response.steps[2].result.as_deref(), Some("Heat absorbed (endothermic)"));

        let cooling = heat(50.0, 4.184, -10.0).unwrap();
        assert_eq!(cooling.final_answer, "-2092.0 J (-2.092 kJ)");
        assert_eq!(cooling.steps[2].result.as_deref(), Some("Heat released (exothermic)"));
        assert_eq!(
            cooling.interpretation.as_deref(),
            Some("2092.0 J of heat is released during this process.")
        );
        assert!(heat(-1.0, 4.184, 10.0).is_err());
    }

    #[test]
    fn test_molar_mass() {
        let response = molar_mass("CO2").unwrap();
        assert_eq!(response.final_answer, "44.01 g/mol");
        assert_eq!(response.steps[0].substitution.as_deref(), Some("C × 1, O × 2"));
        let propane = molar_mass("C3H8").unwrap();
        assert_eq!(propane.final_answer, "44.10 g/mol");
        assert!(matches!(molar_mass("Xy2"), Err(SolverError::Formula(_))));
        assert!(molar_mass("").is_err());
    }

    #[test]
    fn test_unit_converter() {
        let response = convert_units(2.0, "atm", "Pa").unwrap();
        assert_eq!(response.final_answer, "2 atm = 2.0265e5 Pa");
        let volume = convert_units(250.0, "mL", "L").unwrap();
        assert_eq!(volume.final_answer, "250 mL = 2.5000e-1 L");
        assert!(convert_units(1.0, "atm", "L").is_err());
        assert!(convert_units(1.0, "furlong", "L").is_err());
    }

    #[test]
    fn test_faraday() {
        let response = faraday(2.0, 3600.0).unwrap();
        assert_eq!(response.final_answer, "Q = 7200 C, n(e⁻) = 0.0746 mol");
        assert_eq!(response.steps.len(), 3);
        assert_relative_eq!(
            response.variables["molesElectrons"].value.unwrap(),
            7200.0 / 96485.0,
            epsilon = 1e-12
        );
        assert_numbered(&response);
        assert!(matches!(faraday(0.0, 10.0), Err(SolverError::InvalidInput(_))));
        assert!(faraday(1.0, -5.0).is_err());
    }

    #[test]
    fn test_half_life_modes() {
        let query = HalfLifeQuery::parse("N0=1000, t=5730, N=500").unwrap();
        assert_eq!(
            query,
            HalfLifeQuery::HalfLife { initial: 1000.0, remaining: 500.0, time: 5730.0 }
        );
        let response = half_life(query).unwrap();
        assert_eq!(response.final_answer, "t₁/₂ = 5730.00 time units");
        assert_eq!(
            response.interpretation.as_deref(),
            Some("1.00 half-lives elapse, leaving 50.00% of the initial amount.")
        );
        assert_numbered(&response);

        let query = HalfLifeQuery::parse("N0=1000, halfLife=5730, t=11460").unwrap();
        let remaining = half_life(query).unwrap();
        assert_eq!(remaining.final_answer, "N = 250.00 units");
        assert_eq!(remaining.variables["remaining"].description, "Calculated");

        let query = HalfLifeQuery::parse("N0=1000, halfLife=5730, N=250").unwrap();
        let time = half_life(query).unwrap();
        assert_eq!(time.final_answer, "t = 11460.00 time units");
        assert_eq!(
            time.steps[0].substitution.as_deref(),
            Some("N₀ = 1000, N = 250, t₁/₂ = 5730")
        );
    }

    #[test]
    fn test_half_life_bad_input() {
        assert_eq!(
            HalfLifeQuery::parse("N0=1000, N=250, t=?"),
            Err(SolverError::missing(["t", "t₁/₂"]))
        );
        let growing = HalfLifeQuery::HalfLife { initial: 100.0, remaining: 200.0, time: 1.0 };
        assert!(matches!(half_life(growing), Err(SolverError::InvalidInput(_))));
        let negative = HalfLifeQuery::Remaining { initial: 100.0, half_life: -1.0, time: 1.0 };
        assert!(half_life(negative).is_err());
    }

    #[test]
    fn test_electron_configuration() {
        let sodium = electron_configuration(11).unwrap();
        assert_eq!(sodium.final_answer, "1s2 2s2 2p6 3s1");
        assert_eq!(sodium.steps[2].result.as_deref(), Some("1s² 2s² 2p⁶ 3s¹"));
        assert_eq!(
            sodium.interpretation.as_deref(),
            Some("The outermost shell is n = 3 with 1 electron.")
        );
        assert_numbered(&sodium);

        let iron = electron_configuration(26).unwrap();
        assert_eq!(iron.final_answer, "1s2 2s2 2p6 3s2 3p6 4s2 3d6");

        let oganesson = electron_configuration(MAX_ATOMIC_NUMBER).unwrap();
        assert_eq!(oganesson.final_answer.split(' ').count(), 19);
        assert!(oganesson.final_answer.ends_with("7p6"));

        assert!(electron_configuration(0).is_err());
        assert!(electron_configuration(119).is_err());
    }
}
