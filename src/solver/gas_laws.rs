//! Gas-law solvers.
//!
//! Every law is written once as an equation `∏left_num / ∏left_den = ∏right_num / ∏right_den`
//! over named slots. Solving for a slot rearranges that equation symbolically, so the
//! displayed formula, the substitution line and the arithmetic all come from the same terms.
//!
//! Values are read from the variable bag already converted to atm, L, K and mol.
use crate::solver::classifier::{Analysis, ProblemType, Topic};
use crate::solver::errors::{SolverError, checked_div, finite};
use crate::solver::extractor::{Quantities, extract_variables, keys};
use crate::solver::formatting::{MOLE_DECIMALS, RESULT_DECIMALS, fixed, trimmed};
use crate::solver::question::Question;
use crate::solver::types::{ResponseBuilder, SolutionStep, SolverResponse, Variable};
use log::{debug, info, warn};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// R in L·atm/(mol·K)
pub const GAS_CONSTANT: f64 = 0.08206;
pub const GAS_CONSTANT_UNIT: &str = "L·atm/(mol·K)";

/// A quantity of a gas-law equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// key in the variable bag
    pub key: &'static str,
    /// key in the response variable map
    pub id: &'static str,
    pub symbol: &'static str,
    pub latex: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub quantity: &'static str,
    pub second_state: bool,
}

const fn slot(
    key: &'static str,
    id: &'static str,
    symbol: &'static str,
    latex: &'static str,
    name: &'static str,
    unit: &'static str,
    quantity: &'static str,
    second_state: bool,
) -> Slot {
    Slot { key, id, symbol, latex, name, unit, quantity, second_state }
}

pub const P1: Slot = slot(keys::PRESSURE1, "pressure1", "P₁", "P_1", "Initial Pressure", "atm", "pressure", false);
pub const P2: Slot = slot(keys::PRESSURE2, "pressure2", "P₂", "P_2", "Final Pressure", "atm", "pressure", true);
pub const V1: Slot = slot(keys::VOLUME1, "volume1", "V₁", "V_1", "Initial Volume", "L", "volume", false);
pub const V2: Slot = slot(keys::VOLUME2, "volume2", "V₂", "V_2", "Final Volume", "L", "volume", true);
pub const T1: Slot = slot(keys::TEMPERATURE1, "temperature1", "T₁", "T_1", "Initial Temperature", "K", "temperature", false);
pub const T2: Slot = slot(keys::TEMPERATURE2, "temperature2", "T₂", "T_2", "Final Temperature", "K", "temperature", true);
pub const P: Slot = slot(keys::PRESSURE1, "pressure", "P", "P", "Pressure", "atm", "pressure", false);
pub const V: Slot = slot(keys::VOLUME1, "volume", "V", "V", "Volume", "L", "volume", false);
pub const T: Slot = slot(keys::TEMPERATURE1, "temperature", "T", "T", "Temperature", "K", "temperature", false);
pub const N: Slot = slot(keys::MOLES, "moles", "n", "n", "Amount of Gas", "mol", "amount", false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Var(Slot),
    GasConstant,
}

impl Term {
    fn symbol(&self) -> &'static str {
        match self {
            Term::Var(s) => s.symbol,
            Term::GasConstant => "R",
        }
    }

    fn latex(&self) -> &'static str {
        match self {
            Term::Var(s) => s.latex,
            Term::GasConstant => "R",
        }
    }
}

/// `∏left_num / ∏left_den = ∏right_num / ∏right_den`
#[derive(Debug)]
pub struct Equation {
    left_num: &'static [Term],
    left_den: &'static [Term],
    right_num: &'static [Term],
    right_den: &'static [Term],
}

const BOYLE: Equation = Equation {
    left_num: &[Term::Var(P1), Term::Var(V1)],
    left_den: &[],
    right_num: &[Term::Var(P2), Term::Var(V2)],
    right_den: &[],
};
const CHARLES: Equation = Equation {
    left_num: &[Term::Var(V1)],
    left_den: &[Term::Var(T1)],
    right_num: &[Term::Var(V2)],
    right_den: &[Term::Var(T2)],
};
const GAY_LUSSAC: Equation = Equation {
    left_num: &[Term::Var(P1)],
    left_den: &[Term::Var(T1)],
    right_num: &[Term::Var(P2)],
    right_den: &[Term::Var(T2)],
};
const COMBINED: Equation = Equation {
    left_num: &[Term::Var(P1), Term::Var(V1)],
    left_den: &[Term::Var(T1)],
    right_num: &[Term::Var(P2), Term::Var(V2)],
    right_den: &[Term::Var(T2)],
};
const IDEAL: Equation = Equation {
    left_num: &[Term::Var(P), Term::Var(V)],
    left_den: &[],
    right_num: &[Term::Var(N), Term::GasConstant, Term::Var(T)],
    right_den: &[],
};

fn concat(a: &[Term], b: &[Term]) -> Vec<Term> {
    a.iter().chain(b.iter()).copied().collect()
}

impl Equation {
    fn terms(&self) -> impl Iterator<Item = &Term> {
        self.left_num
            .iter()
            .chain(self.left_den)
            .chain(self.right_num)
            .chain(self.right_den)
    }

    /// Slots in display order, without the gas constant
    pub fn slots(&self) -> Vec<Slot> {
        self.terms()
            .filter_map(|t| match t {
                Term::Var(s) => Some(*s),
                Term::GasConstant => None,
            })
            .collect()
    }

    /// Isolates `unknown` on the left-hand side
    pub fn solve_for(&self, unknown: Slot) -> Rearrangement {
        let target = Term::Var(unknown);
        let without = |terms: &[Term]| -> Vec<Term> {
            terms.iter().copied().filter(|t| *t != target).collect()
        };
        let (numerator, denominator) = if self.left_num.contains(&target) {
            (
                concat(self.right_num, self.left_den),
                concat(self.right_den, &without(self.left_num)),
            )
        } else if self.left_den.contains(&target) {
            (
                concat(self.left_num, self.right_den),
                concat(self.right_num, &without(self.left_den)),
            )
        } else if self.right_num.contains(&target) {
            (
                concat(self.left_num, self.right_den),
                concat(self.left_den, &without(self.right_num)),
            )
        } else {
            (
                concat(self.right_num, self.left_den),
                concat(self.left_num, &without(self.right_den)),
            )
        };
        Rearrangement {
            unknown,
            numerator,
            denominator,
        }
    }
}

/// `unknown = ∏numerator / ∏denominator`
#[derive(Debug, Clone, PartialEq)]
pub struct Rearrangement {
    pub unknown: Slot,
    pub numerator: Vec<Term>,
    pub denominator: Vec<Term>,
}

fn render(terms: &[Term], separator: &str, item: impl Fn(&Term) -> String) -> String {
    let text = terms.iter().map(item).collect::<Vec<_>>().join(separator);
    if terms.len() > 1 && separator != " " {
        format!("({})", text)
    } else {
        text
    }
}

impl Rearrangement {
    fn with_sides(&self, item: impl Fn(&Term) -> String) -> String {
        let numerator = render(&self.numerator, " × ", &item);
        if self.denominator.is_empty() {
            format!("{} = {}", self.unknown.symbol, numerator)
        } else {
            let denominator = render(&self.denominator, " × ", &item);
            format!("{} = {} / {}", self.unknown.symbol, numerator, denominator)
        }
    }

    /// "P₂ = (P₁ × V₁) / V₂"
    pub fn formula(&self) -> String {
        self.with_sides(|t| t.symbol().to_string())
    }

    /// "P_2 = \frac{P_1 V_1}{V_2}"
    pub fn latex(&self) -> String {
        let numerator = render(&self.numerator, " ", |t| t.latex().to_string());
        if self.denominator.is_empty() {
            format!("{} = {}", self.unknown.latex, numerator)
        } else {
            let denominator = render(&self.denominator, " ", |t| t.latex().to_string());
            format!("{} = \\frac{{{}}}{{{}}}", self.unknown.latex, numerator, denominator)
        }
    }

    /// "P₂ = (1.5 atm × 2.0 L) / 0.75 L"
    pub fn substitution(&self, quantities: &Quantities) -> String {
        self.with_sides(|t| display_term(t, quantities))
    }

    fn product(terms: &[Term], quantities: &Quantities) -> Result<f64, SolverError> {
        let mut product = 1.0;
        for term in terms {
            product *= match term {
                Term::GasConstant => GAS_CONSTANT,
                Term::Var(s) => {
                    let value = quantities
                        .get(s.key)
                        .ok_or_else(|| SolverError::missing([s.symbol]))?;
                    if value <= 0.0 {
                        return Err(SolverError::InvalidInput(format!(
                            "{} must be positive in a gas law, got {} {}",
                            s.symbol,
                            trimmed(value),
                            s.unit
                        )));
                    }
                    value
                }
            };
        }
        finite(product, "product of known values")
    }

    /// (numerator, denominator, result)
    pub fn evaluate(&self, quantities: &Quantities) -> Result<(f64, f64, f64), SolverError> {
        let numerator = Self::product(&self.numerator, quantities)?;
        let denominator = Self::product(&self.denominator, quantities)?;
        let result = checked_div(numerator, denominator, self.unknown.symbol)?;
        Ok((numerator, denominator, result))
    }
}

fn display_term(term: &Term, quantities: &Quantities) -> String {
    match term {
        Term::GasConstant => format!("{} {}", GAS_CONSTANT, GAS_CONSTANT_UNIT),
        Term::Var(s) => match quantities.source(s.key) {
            Some(m) if m.unit.is_canonical() => format!("{} {}", m.raw_text, s.unit),
            _ => format!(
                "{} {}",
                quantities.get(s.key).map(trimmed).unwrap_or_else(|| "?".to_string()),
                s.unit
            ),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasLaw {
    Boyle,
    Charles,
    GayLussac,
    Combined,
    Ideal,
}

impl GasLaw {
    pub fn from_problem_type(problem_type: ProblemType) -> Option<GasLaw> {
        match problem_type {
            ProblemType::BoylesLaw => Some(GasLaw::Boyle),
            ProblemType::CharlesLaw => Some(GasLaw::Charles),
            ProblemType::GayLussacsLaw => Some(GasLaw::GayLussac),
            ProblemType::CombinedGasLaw => Some(GasLaw::Combined),
            ProblemType::IdealGasLaw => Some(GasLaw::Ideal),
            _ => None,
        }
    }

    pub fn problem_type(&self) -> ProblemType {
        match self {
            GasLaw::Boyle => ProblemType::BoylesLaw,
            GasLaw::Charles => ProblemType::CharlesLaw,
            GasLaw::GayLussac => ProblemType::GayLussacsLaw,
            GasLaw::Combined => ProblemType::CombinedGasLaw,
            GasLaw::Ideal => ProblemType::IdealGasLaw,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GasLaw::Boyle => "Boyle's Law",
            GasLaw::Charles => "Charles's Law",
            GasLaw::GayLussac => "Gay-Lussac's Law",
            GasLaw::Combined => "Combined Gas Law",
            GasLaw::Ideal => "Ideal Gas Law",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            GasLaw::Boyle => "P₁V₁ = P₂V₂",
            GasLaw::Charles => "V₁/T₁ = V₂/T₂",
            GasLaw::GayLussac => "P₁/T₁ = P₂/T₂",
            GasLaw::Combined => "P₁V₁/T₁ = P₂V₂/T₂",
            GasLaw::Ideal => "PV = nRT",
        }
    }

    pub fn latex(&self) -> &'static str {
        match self {
            GasLaw::Boyle => "P_1V_1 = P_2V_2",
            GasLaw::Charles => "\\frac{V_1}{T_1} = \\frac{V_2}{T_2}",
            GasLaw::GayLussac => "\\frac{P_1}{T_1} = \\frac{P_2}{T_2}",
            GasLaw::Combined => "\\frac{P_1V_1}{T_1} = \\frac{P_2V_2}{T_2}",
            GasLaw::Ideal => "PV = nRT",
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            GasLaw::Boyle => "This is a Boyle's Law problem since temperature is constant",
            GasLaw::Charles => "This is a Charles's Law problem since pressure is constant",
            GasLaw::GayLussac => "This is a Gay-Lussac's Law problem since volume is constant",
            GasLaw::Combined => {
                "This is a Combined Gas Law problem since pressure, volume and temperature all change"
            }
            GasLaw::Ideal => "This is an Ideal Gas Law problem since the amount of gas is involved",
        }
    }

    fn statement(&self) -> &'static str {
        match self {
            GasLaw::Boyle => {
                "Boyle's Law states that pressure and volume are inversely proportional at constant temperature"
            }
            GasLaw::Charles => {
                "Charles's Law states that volume and absolute temperature are directly proportional at constant pressure"
            }
            GasLaw::GayLussac => {
                "Gay-Lussac's Law states that pressure and absolute temperature are directly proportional at constant volume"
            }
            GasLaw::Combined => "The combined gas law relates P, V and T for a fixed amount of gas",
            GasLaw::Ideal => "The ideal gas law relates pressure, volume, amount and temperature of a gas",
        }
    }

    pub fn equation(&self) -> &'static Equation {
        match self {
            GasLaw::Boyle => &BOYLE,
            GasLaw::Charles => &CHARLES,
            GasLaw::GayLussac => &GAY_LUSSAC,
            GasLaw::Combined => &COMBINED,
            GasLaw::Ideal => &IDEAL,
        }
    }

    /// Unknown assumed when every slot already has a value and the question names none
    pub fn default_unknown(&self) -> Slot {
        match self {
            GasLaw::Boyle | GasLaw::Charles | GasLaw::Combined => V2,
            GasLaw::GayLussac => P2,
            GasLaw::Ideal => P,
        }
    }
}

static GAY_LUSSAC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gay[\s-]?lussac").expect("gay-lussac regex is valid"));
static IDEAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ideal gas|pv\s*=\s*nrt").expect("ideal gas regex is valid"));
static CONSTANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:constant|fixed|unchanged)\s+(pressure|volume|temperature)|(pressure|volume|temperature)\s+(?:is\s+|remains\s+|stays\s+|was\s+)?(?:held\s+|kept\s+)?(?:constant|fixed|unchanged)",
    )
    .expect("constant cue regex is valid")
});
static STATE_ASKED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(new|final|resulting|initial|original|starting)\s+(pressure|volume|temperature)")
        .expect("state regex is valid")
});
static QUANTITY_ASKED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:what is|what will|what was|find|calculate|determine|how many)[^.?]*?\b(pressure|volume|temperature|moles?|amount)",
    )
    .expect("asked quantity regex is valid")
});

/// Quantities the question declares constant ("at constant temperature", "pressure is held constant")
pub fn constant_cues(question: &Question) -> HashSet<String> {
    CONSTANT_RE
        .captures_iter(&question.lower)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Chooses the law from explicit names, the quantities present and constant cues
pub fn pick_gas_law(question: &Question, quantities: &Quantities) -> GasLaw {
    let lower = &question.lower;
    if lower.contains("boyle") {
        return GasLaw::Boyle;
    }
    if lower.contains("charles") {
        return GasLaw::Charles;
    }
    if GAY_LUSSAC_RE.is_match(lower) {
        return GasLaw::GayLussac;
    }
    if lower.contains("combined gas law") {
        return GasLaw::Combined;
    }

    let has = |a: &str, b: &str| quantities.contains(a) || quantities.contains(b);
    let has_p = has(keys::PRESSURE1, keys::PRESSURE2);
    let has_v = has(keys::VOLUME1, keys::VOLUME2);
    let has_t = has(keys::TEMPERATURE1, keys::TEMPERATURE2);
    let has_n = quantities.contains(keys::MOLES);
    let second_state = [keys::PRESSURE2, keys::VOLUME2, keys::TEMPERATURE2]
        .iter()
        .any(|k| quantities.contains(k));

    if IDEAL_RE.is_match(lower) || (has_p && has_v && has_t && has_n) || (has_n && !second_state) {
        return GasLaw::Ideal;
    }
    let constant = constant_cues(question);
    if has_p && has_v && has_t && constant.is_empty() {
        return GasLaw::Combined;
    }
    if has_v && has_t && (constant.contains("pressure") || !has_p) {
        return GasLaw::Charles;
    }
    if has_p && has_t && (constant.contains("volume") || !has_v) {
        return GasLaw::GayLussac;
    }
    GasLaw::Boyle
}

/// Slot the question explicitly asks for ("what is the new pressure?")
fn asked_slot(law: GasLaw, question: &Question) -> Option<Slot> {
    let slots = law.equation().slots();
    let (state, quantity) = if let Some(c) = STATE_ASKED_RE.captures(&question.lower) {
        let second = matches!(&c[1], "new" | "final" | "resulting");
        (Some(second), c[2].to_string())
    } else {
        let c = QUANTITY_ASKED_RE.captures(&question.lower)?;
        (None, c[1].to_string())
    };
    let quantity = match quantity.as_str() {
        "mole" | "moles" | "amount" => "amount",
        other => other,
    };
    slots
        .iter()
        .find(|s| s.quantity == quantity && s.second_state == state.unwrap_or(true))
        .or_else(|| slots.iter().find(|s| s.quantity == quantity))
        .copied()
}

/// The unknown: the only missing slot, or for an over-determined question the asked-for
/// quantity (else the law's default). More than one missing slot cannot be solved.
pub fn choose_unknown(
    law: GasLaw,
    question: &Question,
    quantities: &Quantities,
) -> Result<Slot, SolverError> {
    let missing: Vec<Slot> = law
        .equation()
        .slots()
        .into_iter()
        .filter(|s| !quantities.contains(s.key))
        .collect();
    match missing.as_slice() {
        [only] => Ok(*only),
        [] => {
            let unknown = asked_slot(law, question).unwrap_or_else(|| law.default_unknown());
            warn!(
                "all quantities of {} are given, recomputing {}",
                law.name(),
                unknown.symbol
            );
            Ok(unknown)
        }
        _ => Err(SolverError::missing(missing.iter().map(|s| s.symbol))),
    }
}

fn final_answer(law: GasLaw, unknown: Slot, value: &str) -> String {
    match (law, unknown.quantity) {
        (GasLaw::Ideal, "amount") => format!("The amount of gas is {} mol", value),
        (GasLaw::Ideal, quantity) => {
            format!("The {} of the gas is {} {}", quantity, value, unknown.unit)
        }
        (_, quantity) if unknown.second_state => {
            format!("The new {} of the gas will be {} {}", quantity, value, unknown.unit)
        }
        (_, quantity) => format!("The initial {} of the gas was {} {}", quantity, value, unknown.unit),
    }
}

/// Worked five-step solution for the law selected during classification
pub fn solve_gas_law(question: &Question, analysis: &Analysis) -> Result<SolverResponse, SolverError> {
    let quantities = &analysis.quantities;
    let law = GasLaw::from_problem_type(analysis.problem_type)
        .unwrap_or_else(|| pick_gas_law(question, quantities));
    let unknown = choose_unknown(law, question, quantities)?;
    let rearranged = law.equation().solve_for(unknown);
    let (numerator, denominator, value) = rearranged.evaluate(quantities)?;
    let decimals = if unknown.quantity == "amount" { MOLE_DECIMALS } else { RESULT_DECIMALS };
    let shown = fixed(value, decimals);
    info!("{}: {} = {} {}", law.name(), unknown.symbol, shown, unknown.unit);

    let givens: Vec<Slot> = law
        .equation()
        .slots()
        .into_iter()
        .filter(|s| *s != unknown)
        .collect();
    let given_text = givens
        .iter()
        .filter_map(|s| quantities.display(s.key, s.unit).map(|d| format!("{} = {}", s.symbol, d)))
        .collect::<Vec<_>>()
        .join(", ");
    debug!("given values: {}", given_text);

    let calculation = if rearranged.denominator.is_empty() {
        format!("{} = {}", unknown.symbol, trimmed(numerator))
    } else {
        format!("{} = {} / {}", unknown.symbol, trimmed(numerator), trimmed(denominator))
    };

    let mut builder = ResponseBuilder::new(
        format!("{} - {}", Topic::GasLaws.display_name(), law.name()),
        &question.text,
    )
    .step(
        SolutionStep::new("Identify the Gas Law", law.reason())
            .formula(law.formula())
            .latex(law.latex())
            .explanation(law.statement()),
    )
    .step(
        SolutionStep::new("Identify Given Values", "Extract the known variables from the problem")
            .substitution(given_text.clone())
            .result(format!("We need to find {}", unknown.symbol)),
    )
    .step(
        SolutionStep::new(
            "Rearrange the Formula",
            format!("Solve {} for the unknown {}", law.name(), unknown.symbol),
        )
        .formula(rearranged.formula())
        .latex(rearranged.latex())
        .explanation(format!("Isolate {} on one side of the equation", unknown.symbol)),
    )
    .step(
        SolutionStep::new("Substitute Values", "Insert the known values into the formula")
            .substitution(rearranged.substitution(quantities)),
    )
    .step(
        SolutionStep::new("Calculate the Result", "Perform the arithmetic")
            .calculation(calculation)
            .result(shown.clone())
            .result_with_units(format!("{} {}", shown, unknown.unit))
            .explanation(format!("{} = {} {}", unknown.symbol, shown, unknown.unit)),
    )
    .final_answer(final_answer(law, unknown, &shown))
    .latex(law.latex())
    .latex(rearranged.latex())
    .confidence(0.95)
    .interpretation(format!(
        "{} with {} unknown, given {}",
        law.name(),
        unknown.symbol,
        given_text
    ));

    for s in &givens {
        if let Some(v) = quantities.get(s.key) {
            builder = builder.variable(s.id, Variable::new(s.name, s.symbol, s.unit, s.name).with_value(v));
        }
    }
    builder = builder.variable(
        unknown.id,
        Variable::new(unknown.name, unknown.symbol, unknown.unit, &format!("{} (calculated)", unknown.name))
            .with_value(value)
            .optional(),
    );
    if law == GasLaw::Ideal {
        builder = builder.variable(
            "gasConstant",
            Variable::new("Gas Constant", "R", GAS_CONSTANT_UNIT, "Universal gas constant")
                .with_value(GAS_CONSTANT)
                .optional(),
        );
    }
    Ok(builder.build())
}

/// Gas-law classification: extract the bag, then pick the law
pub fn analyze(question: &Question) -> Analysis {
    let quantities = extract_variables(Topic::GasLaws, question);
    let law = pick_gas_law(question, &quantities);
    Analysis::new(Topic::GasLaws, law.problem_type(), quantities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solve(text: &str) -> Result<SolverResponse, SolverError> {
        let question = Question::new(text, None);
        let analysis = analyze(&question);
        solve_gas_law(&question, &analysis)
    }

    fn law_of(text: &str) -> GasLaw {
        let question = Question::new(text, None);
        pick_gas_law(&question, &extract_variables(Topic::GasLaws, &question))
    }

    #[test]
    fn test_rearrangements() {
        let r = BOYLE.solve_for(P2);
        assert_eq!(r.formula(), "P₂ = (P₁ × V₁) / V₂");
        assert_eq!(r.latex(), "P_2 = \\frac{P_1 V_1}{V_2}");
        assert_eq!(BOYLE.solve_for(V1).formula(), "V₁ = (P₂ × V₂) / P₁");
        assert_eq!(CHARLES.solve_for(V2).formula(), "V₂ = (V₁ × T₂) / T₁");
        assert_eq!(CHARLES.solve_for(T2).formula(), "T₂ = (V₂ × T₁) / V₁");
        assert_eq!(CHARLES.solve_for(T1).formula(), "T₁ = (V₁ × T₂) / V₂");
        assert_eq!(GAY_LUSSAC.solve_for(P2).formula(), "P₂ = (P₁ × T₂) / T₁");
        assert_eq!(COMBINED.solve_for(V2).formula(), "V₂ = (P₁ × V₁ × T₂) / (T₁ × P₂)");
        assert_eq!(IDEAL.solve_for(P).formula(), "P = (n × R × T) / V");
        assert_eq!(IDEAL.solve_for(N).formula(), "n = (P × V) / (R × T)");
        assert_eq!(IDEAL.solve_for(T).latex(), "T = \\frac{P V}{n R}");
    }

    #[test]
    fn test_law_selection() {
        assert_eq!(
            law_of("If 2.0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?"),
            GasLaw::Boyle
        );
        assert_eq!(
            law_of("A gas occupies 2.50 L at 300 K. What volume will it occupy at 450 K if the pressure is held constant?"),
            GasLaw::Charles
        );
        assert_eq!(law_of("A tank at 2.0 atm and 300 K is heated to 450 K"), GasLaw::GayLussac);
        assert_eq!(
            law_of("A gas at 1.0 atm, 2.0 L and 300 K is changed to 2.0 atm and 400 K"),
            GasLaw::Combined
        );
        assert_eq!(law_of("2.00 mol of gas in 5.00 L at 300 K"), GasLaw::Ideal);
        assert_eq!(law_of("Use Charles law with 2 atm and 3 atm"), GasLaw::Charles);
        assert_eq!(law_of("Nothing numeric here"), GasLaw::Boyle);

        let cues = constant_cues(&Question::new("at constant pressure while the volume remains fixed", None));
        assert!(cues.contains("pressure"));
        assert!(cues.contains("volume"));
    }

    #[test]
    fn test_boyle_worked_solution() {
        let response = solve(
            "If 2.0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?",
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.detected_topic, "Gas Laws - Boyle's Law");
        assert_eq!(response.steps.len(), 5);
        assert!(response.final_answer.contains("4.00 atm"));
        assert_eq!(response.steps[1].substitution.as_deref(), Some("P₁ = 1.5 atm, V₁ = 2.0 L, V₂ = 0.75 L"));
        assert_eq!(response.steps[3].substitution.as_deref(), Some("P₂ = (1.5 atm × 2.0 L) / 0.75 L"));
        assert_eq!(response.steps[4].calculation.as_deref(), Some("P₂ = 3 / 0.75"));
        assert_relative_eq!(response.variables["pressure2"].value.unwrap(), 4.0, epsilon = 1e-9);
        assert_eq!(response.confidence, 0.95);
    }

    #[test]
    fn test_other_laws() {
        let response = solve(
            "A gas occupies 2.50 L at 300 K. What volume will it occupy at 450 K if the pressure is held constant?",
        )
        .unwrap();
        assert_eq!(response.final_answer, "The new volume of the gas will be 3.75 L");

        let response = solve("A tank at 2.0 atm and 300 K is heated to 450 K. What is the new pressure?").unwrap();
        assert_eq!(response.final_answer, "The new pressure of the gas will be 3.00 atm");

        let response =
            solve("A gas at 1.0 atm, 2.0 L and 300 K is changed to 2.0 atm and 400 K. What is the new volume?")
                .unwrap();
        assert!(response.final_answer.ends_with("1.33 L"));

        let response = solve("A 5.00 L container holds 2.00 mol of an ideal gas at 300 K. What is the pressure in atm?")
            .unwrap();
        assert_eq!(response.detected_topic, "Gas Laws - Ideal Gas Law");
        assert_eq!(response.final_answer, "The pressure of the gas is 9.85 atm");
        assert!(response.variables.contains_key("gasConstant"));
    }

    #[test]
    fn test_celsius_is_converted_before_solving() {
        let response = solve("A gas occupies 1.00 L at 27 °C. What volume does it occupy at 127 °C at constant pressure?")
            .unwrap();
        // 1.00 × 400.15 / 300.15
        assert_eq!(response.final_answer, "The new volume of the gas will be 1.33 L");
        assert!(response.steps[1].substitution.as_deref().unwrap().contains("27 °C = 300.15 K"));
    }

    #[test]
    fn test_unknown_selection() {
        let err = solve("A gas at 1.5 atm").unwrap_err();
        assert_eq!(err, SolverError::missing(["V₁", "P₂", "V₂"]));

        // over-determined: the asked quantity is recomputed
        let response = solve(
            "2.0 L of gas at 1.5 atm is compressed to 0.75 L and reaches 9.9 atm at constant temperature. What is the final pressure?",
        )
        .unwrap();
        assert!(response.final_answer.contains("4.00 atm"));
    }

    #[test]
    fn test_non_positive_values_are_rejected() {
        let err = solve("If 0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?")
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput(_)));
    }
}
