//! Stoichiometry solvers: hydrocarbon combustion, limiting reagent with percent yield,
//! single-substance mole conversion and the generic four-step outline.
//!
//! Combustion always follows `CxHy + (x + y/4) O2 -> x CO2 + (y/2) H2O`; molar masses come from
//! the element table in `reference_data::molmass`.
use crate::reference_data::molmass::{
    CARBON_MASS, HYDROGEN_MASS, OXYGEN_MASS, co2_molar_mass, h2o_molar_mass,
    hydrocarbon_molar_mass, o2_molar_mass, ordered_composition,
};
use crate::solver::classifier::{Analysis, ProblemType, Topic};
use crate::solver::errors::{SolverError, checked_div, finite};
use crate::solver::extractor::{
    Hydrocarbon, Quantities, detect_hydrocarbon, extract_formulas, extract_variables, keys,
};
use crate::solver::formatting::{
    MOLE_DECIMALS, RESULT_DECIMALS, fixed, latex_formula, trimmed, unicode_formula,
};
use crate::solver::question::Question;
use crate::solver::types::{ResponseBuilder, SolutionStep, SolutionSteps, SolverResponse, Variable};
use log::{debug, info};

/// Mass keys a single-substance conversion may read, in order of preference
const MASS_KEYS: [&str; 4] = [keys::MASS, keys::WATER_MASS, keys::CO2_MASS, keys::OXYGEN_MASS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombustionProduct {
    CarbonDioxide,
    Water,
}

impl CombustionProduct {
    pub fn formula(&self) -> &'static str {
        match self {
            CombustionProduct::CarbonDioxide => "CO₂",
            CombustionProduct::Water => "H₂O",
        }
    }

    pub fn molar_mass(&self) -> f64 {
        match self {
            CombustionProduct::CarbonDioxide => co2_molar_mass(),
            CombustionProduct::Water => h2o_molar_mass(),
        }
    }

    fn molar_mass_sum(&self) -> String {
        match self {
            CombustionProduct::CarbonDioxide => format!("{} + 2 × {}", CARBON_MASS, OXYGEN_MASS),
            CombustionProduct::Water => format!("2 × {} + {}", HYDROGEN_MASS, OXYGEN_MASS),
        }
    }

    /// mol of product per mol of fuel
    pub fn ratio(&self, fuel: &Hydrocarbon) -> f64 {
        match self {
            CombustionProduct::CarbonDioxide => fuel.carbon as f64,
            CombustionProduct::Water => fuel.hydrogen as f64 / 2.0,
        }
    }

    /// key under which a collected (actual) mass of this product is filed
    pub fn actual_mass_key(&self) -> &'static str {
        match self {
            CombustionProduct::CarbonDioxide => keys::CO2_MASS,
            CombustionProduct::Water => keys::WATER_MASS,
        }
    }
}

/// Water when the question asks about water and never mentions CO₂, otherwise CO₂
pub fn target_product(question: &Question) -> CombustionProduct {
    let water = question.contains_any(&["water", "h2o"]);
    let co2 = question.contains_any(&["co2", "carbon dioxide"]);
    if water && !co2 {
        CombustionProduct::Water
    } else {
        CombustionProduct::CarbonDioxide
    }
}

fn coefficient(value: f64) -> String {
    if (value - 1.0).abs() < 1e-12 {
        String::new()
    } else {
        trimmed(value)
    }
}

/// Balanced complete combustion, as (unicode, LaTeX)
pub fn balanced_combustion(fuel: &Hydrocarbon) -> (String, String) {
    let o2 = coefficient(fuel.oxygen_ratio());
    let co2 = coefficient(fuel.carbon as f64);
    let h2o = coefficient(fuel.hydrogen as f64 / 2.0);
    let unicode = format!(
        "{} + {}O₂ → {}CO₂ + {}H₂O",
        unicode_formula(&fuel.formula),
        o2,
        co2,
        h2o
    );
    let latex = format!(
        "{} + {}O_2 \\rightarrow {}CO_2 + {}H_2O",
        latex_formula(&fuel.formula),
        o2,
        co2,
        h2o
    );
    (unicode, latex)
}

fn fuel_label(fuel: &Hydrocarbon) -> String {
    match fuel.name {
        Some(name) => format!("{} ({})", unicode_formula(&fuel.formula), name),
        None => unicode_formula(&fuel.formula),
    }
}

fn fuel_molar_mass_sum(fuel: &Hydrocarbon) -> String {
    format!(
        "{} × {} + {} × {}",
        fuel.carbon, CARBON_MASS, fuel.hydrogen, HYDROGEN_MASS
    )
}

pub fn percent_yield(actual: f64, theoretical: f64) -> Result<f64, SolverError> {
    Ok(checked_div(actual, theoretical, "percent yield")? * 100.0)
}

fn positive(value: f64, what: &str) -> Result<f64, SolverError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(SolverError::InvalidInput(format!(
            "{} must be positive, got {}",
            what,
            trimmed(value)
        )))
    }
}

fn fuel_and_mass<'a>(analysis: &'a Analysis) -> Result<(&'a Hydrocarbon, f64), SolverError> {
    let fuel = analysis
        .hydrocarbon
        .as_ref()
        .ok_or_else(|| SolverError::missing(["hydrocarbon formula"]))?;
    let mass = analysis
        .quantities
        .get(keys::MASS)
        .ok_or_else(|| SolverError::missing([format!("mass of {}", unicode_formula(&fuel.formula))]))?;
    Ok((fuel, positive(mass, "fuel mass")?))
}

fn balanced_equation_step(fuel: &Hydrocarbon) -> SolutionStep {
    let (unicode, latex) = balanced_combustion(fuel);
    SolutionStep::new(
        "Write the Balanced Equation",
        format!("Balance the complete combustion of {}", fuel_label(fuel)),
    )
    .formula(unicode)
    .latex(latex)
    .explanation("CxHy + (x + y/4) O₂ → x CO₂ + (y/2) H₂O")
}

/// Adds a percent-yield step when a collected mass of the product was given
fn percent_yield_step(
    steps: &mut SolutionSteps,
    quantities: &Quantities,
    product: CombustionProduct,
    theoretical: f64,
) -> Result<Option<f64>, SolverError> {
    let Some(actual) = quantities.get(product.actual_mass_key()) else {
        return Ok(None);
    };
    let percent = percent_yield(actual, theoretical)?;
    steps.push(
        SolutionStep::new(
            "Calculate Percent Yield",
            "Compare the collected mass with the theoretical yield",
        )
        .formula("% yield = (actual / theoretical) × 100")
        .latex("\\%\\,\\text{yield} = \\frac{\\text{actual}}{\\text{theoretical}} \\times 100")
        .substitution(format!(
            "% yield = ({} g / {} g) × 100",
            trimmed(actual),
            fixed(theoretical, RESULT_DECIMALS)
        ))
        .result(format!("{}%", fixed(percent, RESULT_DECIMALS)))
        .result_with_units(format!("{}%", fixed(percent, RESULT_DECIMALS))),
    );
    Ok(Some(percent))
}

/// Mass of product from a given mass of hydrocarbon burned in excess oxygen
pub fn solve_combustion(question: &Question, analysis: &Analysis) -> Result<SolverResponse, SolverError> {
    let (fuel, mass) = fuel_and_mass(analysis)?;
    let product = target_product(question);
    let fuel_formula = unicode_formula(&fuel.formula);
    let fuel_mm = hydrocarbon_molar_mass(fuel.carbon, fuel.hydrogen);
    let product_mm = product.molar_mass();
    let n_fuel = checked_div(mass, fuel_mm, "moles of fuel")?;
    let ratio = product.ratio(fuel);
    let n_product = n_fuel * ratio;
    let m_product = finite(n_product * product_mm, "product mass")?;
    let mass_text = analysis
        .quantities
        .display(keys::MASS, "g")
        .unwrap_or_else(|| format!("{} g", trimmed(mass)));
    info!(
        "combustion of {}: {} g -> {:.4} g {}",
        fuel.formula, mass, m_product, product.formula()
    );

    let mut steps = SolutionSteps::new();
    steps
        .push(balanced_equation_step(fuel))
        .push(
            SolutionStep::new("Calculate Molar Masses", "Sum the atomic masses of each compound")
                .formula("M = Σ (atomic mass × count)")
                .calculation(format!(
                    "M({}) = {} = {} g/mol; M({}) = {} = {} g/mol",
                    fuel_formula,
                    fuel_molar_mass_sum(fuel),
                    fixed(fuel_mm, 3),
                    product.formula(),
                    product.molar_mass_sum(),
                    fixed(product_mm, 3)
                )),
        )
        .push(
            SolutionStep::new(
                "Convert Given Mass to Moles",
                format!("Use n = m/M to find the moles of {}", fuel_formula),
            )
            .formula("n = m / M")
            .latex("n = \\frac{m}{M}")
            .substitution(format!("n({}) = {} / {} g/mol", fuel_formula, mass_text, fixed(fuel_mm, 3)))
            .result(format!("{} mol", fixed(n_fuel, MOLE_DECIMALS))),
        )
        .push(
            SolutionStep::new(
                format!("Use Mole Ratio to Find {} Moles", product.formula()),
                format!(
                    "From the balanced equation, 1 mol of {} produces {} mol of {}",
                    fuel_formula,
                    trimmed(ratio),
                    product.formula()
                ),
            )
            .calculation(format!(
                "n({}) = {} mol × {}",
                product.formula(),
                fixed(n_fuel, MOLE_DECIMALS),
                trimmed(ratio)
            ))
            .result(format!("{} mol", fixed(n_product, MOLE_DECIMALS))),
        )
        .push(
            SolutionStep::new(
                format!("Convert {} Moles to Mass", product.formula()),
                "Multiply the moles by the molar mass",
            )
            .formula("m = n × M")
            .latex("m = n \\times M")
            .substitution(format!(
                "m({}) = {} mol × {} g/mol",
                product.formula(),
                fixed(n_product, MOLE_DECIMALS),
                fixed(product_mm, 3)
            ))
            .result(fixed(m_product, RESULT_DECIMALS))
            .result_with_units(format!("{} g", fixed(m_product, RESULT_DECIMALS))),
        );
    let percent = percent_yield_step(&mut steps, &analysis.quantities, product, m_product)?;

    let mut final_answer = format!(
        "{} produced = {} g",
        product.formula(),
        fixed(m_product, RESULT_DECIMALS)
    );
    if let Some(p) = percent {
        final_answer.push_str(&format!("; percent yield = {}%", fixed(p, RESULT_DECIMALS)));
    }

    let (_, equation_latex) = balanced_combustion(fuel);
    Ok(ResponseBuilder::new(
        format!("{} - Combustion", Topic::Stoichiometry.display_name()),
        &question.text,
    )
    .steps(steps)
    .variable(
        "reactantMass",
        Variable::new("Hydrocarbon Mass", "m", "g", "Given mass of hydrocarbon").with_value(mass),
    )
    .variable(
        "reactantFormula",
        Variable::new("Hydrocarbon", &fuel_formula, "", "Detected hydrocarbon formula"),
    )
    .variable(
        "molarMassReactant",
        Variable::new("Molar Mass (Reactant)", "M", "g/mol", "Molar mass of hydrocarbon")
            .with_value(fuel_mm),
    )
    .variable(
        "molesReactant",
        Variable::new("Moles (Reactant)", "n", "mol", "Calculated moles of hydrocarbon")
            .with_value(n_fuel)
            .optional(),
    )
    .variable(
        "molesProduct",
        Variable::new(
            &format!("Moles ({})", product.formula()),
            &format!("n_{}", product.formula()),
            "mol",
            "Calculated moles of product",
        )
        .with_value(n_product)
        .optional(),
    )
    .variable(
        "massProduct",
        Variable::new(
            &format!("Mass of {}", product.formula()),
            &format!("m_{}", product.formula()),
            "g",
            "Calculated mass of product",
        )
        .with_value(m_product)
        .optional(),
    )
    .final_answer(final_answer)
    .latex(equation_latex)
    .latex("n = \\frac{m}{M}")
    .latex("m = n \\times M")
    .confidence(0.95)
    .interpretation(format!(
        "Complete combustion of {} of {}, asking for the mass of {} formed",
        mass_text,
        fuel_label(fuel),
        product.formula()
    ))
    .build())
}

/// Limiting reagent between a hydrocarbon and O₂, theoretical yield and optional percent yield
pub fn solve_limiting_reagent(
    question: &Question,
    analysis: &Analysis,
) -> Result<SolverResponse, SolverError> {
    let (fuel, mass) = fuel_and_mass(analysis)?;
    let quantities = &analysis.quantities;
    let o2_mass = quantities
        .get(keys::OXYGEN_MASS)
        .ok_or_else(|| SolverError::missing(["mass of O₂"]))?;
    let o2_mass = positive(o2_mass, "oxygen mass")?;
    let product = target_product(question);
    let fuel_formula = unicode_formula(&fuel.formula);
    let fuel_mm = hydrocarbon_molar_mass(fuel.carbon, fuel.hydrogen);
    let o2_mm = o2_molar_mass();
    let n_fuel = checked_div(mass, fuel_mm, "moles of fuel")?;
    let n_o2 = checked_div(o2_mass, o2_mm, "moles of oxygen")?;
    let o2_ratio = fuel.oxygen_ratio();
    let required_o2 = n_fuel * o2_ratio;
    let fuel_limits = n_o2 >= required_o2;
    let ratio = product.ratio(fuel);
    let n_product = if fuel_limits {
        n_fuel * ratio
    } else {
        n_o2 * ratio / o2_ratio
    };
    let theoretical = finite(n_product * product.molar_mass(), "theoretical yield")?;
    let (limiting, excess_text) = if fuel_limits {
        (
            fuel_label(fuel),
            format!(
                "O₂ left over = {} − {} = {} mol",
                fixed(n_o2, MOLE_DECIMALS),
                fixed(required_o2, MOLE_DECIMALS),
                fixed(n_o2 - required_o2, MOLE_DECIMALS)
            ),
        )
    } else {
        let fuel_used = n_o2 / o2_ratio;
        (
            "O₂".to_string(),
            format!(
                "{} left over = {} − {} = {} mol",
                fuel_formula,
                fixed(n_fuel, MOLE_DECIMALS),
                fixed(fuel_used, MOLE_DECIMALS),
                fixed(n_fuel - fuel_used, MOLE_DECIMALS)
            ),
        )
    };
    debug!(
        "O2 required {:.4} mol, available {:.4} mol, limiting {}",
        required_o2, n_o2, limiting
    );

    let mass_text = quantities
        .display(keys::MASS, "g")
        .unwrap_or_else(|| format!("{} g", trimmed(mass)));
    let o2_text = quantities
        .display(keys::OXYGEN_MASS, "g")
        .unwrap_or_else(|| format!("{} g", trimmed(o2_mass)));
    let comparison = if fuel_limits {
        format!(
            "O₂ available ({} mol) ≥ O₂ required ({} mol), so {} runs out first",
            fixed(n_o2, MOLE_DECIMALS),
            fixed(required_o2, MOLE_DECIMALS),
            fuel_formula
        )
    } else {
        format!(
            "O₂ available ({} mol) < O₂ required ({} mol), so O₂ runs out first",
            fixed(n_o2, MOLE_DECIMALS),
            fixed(required_o2, MOLE_DECIMALS)
        )
    };
    let yield_calculation = if fuel_limits {
        format!(
            "n({}) = {} mol × {} = {} mol",
            product.formula(),
            fixed(n_fuel, MOLE_DECIMALS),
            trimmed(ratio),
            fixed(n_product, MOLE_DECIMALS)
        )
    } else {
        format!(
            "n({}) = {} mol × {} / {} = {} mol",
            product.formula(),
            fixed(n_o2, MOLE_DECIMALS),
            trimmed(ratio),
            trimmed(o2_ratio),
            fixed(n_product, MOLE_DECIMALS)
        )
    };

    let mut steps = SolutionSteps::new();
    steps
        .push(balanced_equation_step(fuel))
        .push(
            SolutionStep::new("Convert Masses to Moles", "Use n = m/M for both reactants")
                .formula("n = m / M")
                .latex("n = \\frac{m}{M}")
                .substitution(format!(
                    "n({}) = {} / {} g/mol; n(O₂) = {} / {} g/mol",
                    fuel_formula,
                    mass_text,
                    fixed(fuel_mm, 3),
                    o2_text,
                    fixed(o2_mm, 3)
                ))
                .result(format!(
                    "n({}) = {} mol, n(O₂) = {} mol",
                    fuel_formula,
                    fixed(n_fuel, MOLE_DECIMALS),
                    fixed(n_o2, MOLE_DECIMALS)
                )),
        )
        .push(
            SolutionStep::new(
                "Compare Required and Available O₂",
                format!("Each mol of {} needs {} mol of O₂", fuel_formula, trimmed(o2_ratio)),
            )
            .calculation(format!(
                "O₂ required = {} mol × {} = {} mol",
                fixed(n_fuel, MOLE_DECIMALS),
                trimmed(o2_ratio),
                fixed(required_o2, MOLE_DECIMALS)
            ))
            .result(comparison),
        )
        .push(
            SolutionStep::new(
                "Identify the Limiting Reagent",
                "The reactant that is consumed first caps the yield",
            )
            .calculation(excess_text)
            .result(format!("{} is the limiting reagent", limiting)),
        )
        .push(
            SolutionStep::new(
                "Calculate Theoretical Yield",
                format!("Use the limiting reagent's moles to find the {} formed", product.formula()),
            )
            .formula("m = n × M")
            .latex("m = n \\times M")
            .calculation(yield_calculation)
            .substitution(format!(
                "m({}) = {} mol × {} g/mol",
                product.formula(),
                fixed(n_product, MOLE_DECIMALS),
                fixed(product.molar_mass(), 3)
            ))
            .result(fixed(theoretical, RESULT_DECIMALS))
            .result_with_units(format!("{} g", fixed(theoretical, RESULT_DECIMALS))),
        );
    let percent = percent_yield_step(&mut steps, quantities, product, theoretical)?;

    let mut final_answer = format!(
        "Limiting reagent: {}; theoretical yield of {} = {} g",
        limiting,
        product.formula(),
        fixed(theoretical, RESULT_DECIMALS)
    );
    if let Some(p) = percent {
        final_answer.push_str(&format!("; percent yield = {}%", fixed(p, RESULT_DECIMALS)));
    }

    let (_, equation_latex) = balanced_combustion(fuel);
    let mut builder = ResponseBuilder::new(
        format!("{} - Limiting Reagent", Topic::Stoichiometry.display_name()),
        &question.text,
    )
    .steps(steps)
    .variable(
        "reactantMass",
        Variable::new("Hydrocarbon Mass", "m", "g", "Given mass of hydrocarbon").with_value(mass),
    )
    .variable(
        "oxygenMass",
        Variable::new("Oxygen Mass", "m_O₂", "g", "Given mass of O₂").with_value(o2_mass),
    )
    .variable(
        "requiredOxygen",
        Variable::new("Required O₂", "n_O₂", "mol", "O₂ needed to burn all of the fuel")
            .with_value(required_o2)
            .optional(),
    )
    .variable(
        "theoreticalYield",
        Variable::new("Theoretical Yield", "m_theo", "g", "Maximum mass of product")
            .with_value(theoretical)
            .optional(),
    );
    if let Some(p) = percent {
        builder = builder.variable(
            "percentYield",
            Variable::new("Percent Yield", "%", "%", "Actual over theoretical yield")
                .with_value(p)
                .optional(),
        );
    }
    Ok(builder
        .final_answer(final_answer)
        .latex(equation_latex)
        .latex("n = \\frac{m}{M}")
        .latex("\\%\\,\\text{yield} = \\frac{\\text{actual}}{\\text{theoretical}} \\times 100")
        .confidence(0.95)
        .interpretation(format!(
            "{} of {} reacting with {} of O₂; find the limiting reagent and the {} yield",
            mass_text,
            fuel_label(fuel),
            o2_text,
            product.formula()
        ))
        .build())
}

/// g -> mol (or mol -> g) for the single formula named in the question
pub fn solve_mole_conversion(
    question: &Question,
    analysis: &Analysis,
) -> Result<SolverResponse, SolverError> {
    let formula = analysis
        .formulas
        .first()
        .ok_or_else(|| SolverError::missing(["chemical formula"]))?;
    let pretty = unicode_formula(formula);
    let composition = ordered_composition(formula)?;
    let molar_mass: f64 = composition
        .iter()
        .map(|(_, count, mass)| *count as f64 * mass)
        .sum();
    let breakdown = composition
        .iter()
        .map(|(symbol, count, mass)| format!("{} × {} ({})", count, mass, symbol))
        .collect::<Vec<_>>()
        .join(" + ");
    let atoms = composition
        .iter()
        .map(|(symbol, count, _)| format!("{} {}", count, symbol))
        .collect::<Vec<_>>()
        .join(", ");
    let quantities = &analysis.quantities;
    let mass_key = MASS_KEYS.iter().copied().find(|k| quantities.contains(k));

    let mut steps = SolutionSteps::new();
    steps
        .push(
            SolutionStep::new("Identify the Substance", format!("The substance is {}", pretty))
                .result(atoms),
        )
        .push(
            SolutionStep::new("Calculate Molar Mass", "Sum the atomic masses of every atom")
                .formula("M = Σ (atomic mass × count)")
                .calculation(format!("M({}) = {}", pretty, breakdown))
                .result(format!("{} g/mol", fixed(molar_mass, 3))),
        );

    let builder = ResponseBuilder::new(
        format!("{} - Mole Conversion", Topic::Stoichiometry.display_name()),
        &question.text,
    )
    .variable(
        "molarMass",
        Variable::new("Molar Mass", "M", "g/mol", &format!("Molar mass of {}", pretty))
            .with_value(molar_mass),
    );

    let (builder, final_answer, interpretation) = match (mass_key, quantities.get(keys::MOLES)) {
        (Some(key), _) => {
            let mass = positive(quantities.get(key).unwrap_or_default(), "mass")?;
            let moles = checked_div(mass, molar_mass, "moles")?;
            let mass_text = quantities.display(key, "g").unwrap_or_else(|| format!("{} g", trimmed(mass)));
            steps.push(
                SolutionStep::new("Convert Mass to Moles", "Divide the mass by the molar mass")
                    .formula("n = m / M")
                    .latex("n = \\frac{m}{M}")
                    .substitution(format!("n = {} / {} g/mol", mass_text, fixed(molar_mass, 3)))
                    .result(fixed(moles, MOLE_DECIMALS))
                    .result_with_units(format!("{} mol", fixed(moles, MOLE_DECIMALS))),
            );
            (
                builder
                    .variable("mass", Variable::new("Mass", "m", "g", "Given mass").with_value(mass))
                    .variable(
                        "moles",
                        Variable::new("Moles", "n", "mol", "Calculated amount")
                            .with_value(moles)
                            .optional(),
                    )
                    .latex("n = \\frac{m}{M}"),
                format!("{} of {} = {} mol", mass_text, pretty, fixed(moles, MOLE_DECIMALS)),
                format!("Convert {} of {} to moles", mass_text, pretty),
            )
        }
        (None, Some(moles)) => {
            let moles = positive(moles, "amount")?;
            let mass = finite(moles * molar_mass, "mass")?;
            steps.push(
                SolutionStep::new("Convert Moles to Mass", "Multiply the moles by the molar mass")
                    .formula("m = n × M")
                    .latex("m = n \\times M")
                    .substitution(format!("m = {} mol × {} g/mol", trimmed(moles), fixed(molar_mass, 3)))
                    .result(fixed(mass, RESULT_DECIMALS))
                    .result_with_units(format!("{} g", fixed(mass, RESULT_DECIMALS))),
            );
            (
                builder
                    .variable("moles", Variable::new("Moles", "n", "mol", "Given amount").with_value(moles))
                    .variable(
                        "mass",
                        Variable::new("Mass", "m", "g", "Calculated mass")
                            .with_value(mass)
                            .optional(),
                    )
                    .latex("m = n \\times M"),
                format!("{} mol of {} = {} g", trimmed(moles), pretty, fixed(mass, RESULT_DECIMALS)),
                format!("Convert {} mol of {} to grams", trimmed(moles), pretty),
            )
        }
        (None, None) => return Err(SolverError::missing([format!("mass or moles of {}", pretty)])),
    };

    Ok(builder
        .steps(steps)
        .final_answer(final_answer)
        .confidence(0.90)
        .interpretation(interpretation)
        .build())
}

/// The four-step outline returned when no specific stoichiometry archetype applies
pub fn generic_outline(question: &Question) -> SolverResponse {
    ResponseBuilder::new(Topic::Stoichiometry.display_name(), &question.text)
        .step(
            SolutionStep::new("Write Balanced Equation", "Write the balanced chemical equation for the reaction")
                .explanation("A balanced equation shows the mole relationships between reactants and products"),
        )
        .step(
            SolutionStep::new("Convert to Moles", "Convert given mass to moles using molar mass")
                .formula("n = m/MM")
                .latex("n = \\frac{m}{MM}")
                .explanation("Moles = mass ÷ molar mass"),
        )
        .step(
            SolutionStep::new("Use Stoichiometry", "Use mole ratios from balanced equation")
                .explanation("The coefficients in the balanced equation give mole ratios"),
        )
        .step(
            SolutionStep::new("Convert to Desired Units", "Convert moles back to mass if needed")
                .formula("m = n × MM")
                .latex("m = n \\times MM")
                .explanation("Mass = moles × molar mass"),
        )
        .final_answer("See calculation steps above")
        .latex("n = \\frac{m}{MM}")
        .latex("m = n \\times MM")
        .confidence(0.80)
        .interpretation("A stoichiometry question without a recognised reaction archetype")
        .build()
}

/// Archetype of a stoichiometry question
pub fn pick_problem_type(
    question: &Question,
    quantities: &Quantities,
    hydrocarbon: Option<&Hydrocarbon>,
    formulas: &[String],
) -> ProblemType {
    if hydrocarbon.is_some() && quantities.contains(keys::MASS) {
        if quantities.contains(keys::OXYGEN_MASS) {
            return ProblemType::LimitingReagent;
        }
        if question.contains_any(&["combust", "burn", "oxygen", "o2", "co2", "carbon dioxide"]) {
            return ProblemType::Combustion;
        }
    }
    let has_amount = MASS_KEYS.iter().any(|k| quantities.contains(k)) || quantities.contains(keys::MOLES);
    if formulas.len() == 1 && has_amount {
        return ProblemType::MoleConversion;
    }
    ProblemType::BasicStoichiometry
}

pub fn analyze(question: &Question) -> Analysis {
    let quantities = extract_variables(Topic::Stoichiometry, question);
    let hydrocarbon = detect_hydrocarbon(question);
    let formulas = extract_formulas(question);
    let problem_type = pick_problem_type(question, &quantities, hydrocarbon.as_ref(), &formulas);
    let mut analysis = Analysis::new(Topic::Stoichiometry, problem_type, quantities);
    analysis.hydrocarbon = hydrocarbon;
    analysis.formulas = formulas;
    analysis
}

pub fn solve_stoichiometry(question: &Question, analysis: &Analysis) -> Result<SolverResponse, SolverError> {
    match analysis.problem_type {
        ProblemType::Combustion => solve_combustion(question, analysis),
        ProblemType::LimitingReagent => solve_limiting_reagent(question, analysis),
        ProblemType::MoleConversion => solve_mole_conversion(question, analysis),
        _ => Ok(generic_outline(question)),
    }
}
