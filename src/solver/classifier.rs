//! Question classification.
//!
//! A question is mapped to one topic by walking [`TOPIC_RULES`] in order; the first rule whose
//! predicate matches wins, and a question matching nothing is general chemistry. Questions that
//! match several topics therefore always land on the earliest one: stoichiometry is checked
//! before gas laws so that "how many grams of CO2 are produced ..." is not sent to the gas-law
//! solvers just because it mentions a gas.
//!
//! A non-empty topic hint short-circuits the rule walk when it names a topic.
use crate::reference_data::units::Dimension;
use crate::solver::extractor::{Hydrocarbon, Quantities, scan_measurements};
use crate::solver::handlers::{TopicHandler, TopicSolver};
use crate::solver::question::Question;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    GasLaws,
    Stoichiometry,
    Ph,
    Concentration,
    Thermochemistry,
    GeneralChemistry,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::GasLaws,
        Topic::Stoichiometry,
        Topic::Ph,
        Topic::Concentration,
        Topic::Thermochemistry,
        Topic::GeneralChemistry,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Topic::GasLaws => "gas-laws",
            Topic::Stoichiometry => "stoichiometry",
            Topic::Ph => "ph",
            Topic::Concentration => "concentration",
            Topic::Thermochemistry => "thermochemistry",
            Topic::GeneralChemistry => "general-chemistry",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::GasLaws => "Gas Laws",
            Topic::Stoichiometry => "Stoichiometry",
            Topic::Ph => "pH and Acids/Bases",
            Topic::Concentration => "Concentration",
            Topic::Thermochemistry => "Thermochemistry",
            Topic::GeneralChemistry => "General Chemistry",
        }
    }

    pub fn from_id(id: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn handler(&self) -> TopicHandler {
        TopicHandler::for_topic(*self)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A named law or method within a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemType {
    BoylesLaw,
    CharlesLaw,
    GayLussacsLaw,
    CombinedGasLaw,
    IdealGasLaw,
    Combustion,
    LimitingReagent,
    MoleConversion,
    BasicStoichiometry,
    PhCalculation,
    Molarity,
    HeatCalculation,
    General,
}

impl ProblemType {
    pub fn id(&self) -> &'static str {
        match self {
            ProblemType::BoylesLaw => "boyles-law",
            ProblemType::CharlesLaw => "charles-law",
            ProblemType::GayLussacsLaw => "gay-lussacs-law",
            ProblemType::CombinedGasLaw => "combined-gas-law",
            ProblemType::IdealGasLaw => "ideal-gas-law",
            ProblemType::Combustion => "combustion",
            ProblemType::LimitingReagent => "limiting-reagent",
            ProblemType::MoleConversion => "mole-conversion",
            ProblemType::BasicStoichiometry => "basic-stoichiometry",
            ProblemType::PhCalculation => "ph-calculation",
            ProblemType::Molarity => "molarity",
            ProblemType::HeatCalculation => "heat-calculation",
            ProblemType::General => "general",
        }
    }
}

/// Outcome of classification: topic, problem type and the extracted variable bag
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub topic: Topic,
    pub problem_type: ProblemType,
    pub quantities: Quantities,
    pub hydrocarbon: Option<Hydrocarbon>,
    pub formulas: Vec<String>,
}

impl Analysis {
    pub fn new(topic: Topic, problem_type: ProblemType, quantities: Quantities) -> Self {
        Self {
            topic,
            problem_type,
            quantities,
            hydrocarbon: None,
            formulas: Vec::new(),
        }
    }
}

/// One entry of the ordered classification table
#[derive(Clone, Copy)]
pub struct TopicRule {
    pub topic: Topic,
    pub matches: fn(&Question) -> bool,
}

impl fmt::Debug for TopicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicRule").field("topic", &self.topic).finish()
    }
}

/// Classification priority. The first matching rule wins.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule { topic: Topic::Stoichiometry, matches: is_stoichiometry },
    TopicRule { topic: Topic::GasLaws, matches: is_gas_laws },
    TopicRule { topic: Topic::Ph, matches: is_ph },
    TopicRule { topic: Topic::Concentration, matches: is_concentration },
    TopicRule { topic: Topic::Thermochemistry, matches: is_thermochemistry },
];

/// Hint substrings and the topic they select, checked in order
pub const HINT_TABLE: &[(&str, Topic)] = &[
    ("stoich", Topic::Stoichiometry),
    ("gas", Topic::GasLaws),
    ("ph", Topic::Ph),
    ("concentration", Topic::Concentration),
    ("molarity", Topic::Concentration),
    ("thermo", Topic::Thermochemistry),
];

const STOICHIOMETRY_KEYWORDS: &[&str] = &[
    "mole", "gram", "react", "produce", "yield", "limiting", "excess", "combustion", "burn",
];
const CONCENTRATION_KEYWORDS: &[&str] = &[
    "molarity", "molality", "concentration", "solution", "solute", "solvent", "ppm", "dilut",
];
const THERMOCHEMISTRY_KEYWORDS: &[&str] = &[
    "heat", "enthalpy", "temperature change", "calorimet", "joule", "calorie",
    "specific heat", "exothermic", "endothermic",
];
const GAS_STATE_WORDS: &[&str] = &["pressure", "volume", "temperature"];

static GAS_LAW_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"boyle|charles|gay[\s-]?lussac|combined gas law|ideal gas|pv\s*=\s*nrt")
        .expect("gas law regex is valid")
});
static GAS_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgas(?:es)?\b").expect("gas regex is valid"));
static PH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bp(?:o)?h\b|acid|\bbases?\b|\bbasic\b|\bh\+|\boh-|hydroxide|hydrogen ion")
        .expect("ph regex is valid")
});

pub fn is_stoichiometry(question: &Question) -> bool {
    question.contains_any(STOICHIOMETRY_KEYWORDS)
}

/// An explicit law name or PV=nRT, or a pressure unit together with a volume or temperature
/// unit, or the word "gas" together with pressure, volume or temperature
pub fn is_gas_laws(question: &Question) -> bool {
    if GAS_LAW_NAME_RE.is_match(&question.lower) {
        return true;
    }
    let dimensions: Vec<Dimension> = scan_measurements(&question.normalized)
        .iter()
        .map(|m| m.unit.dimension())
        .collect();
    let has = |d: Dimension| dimensions.contains(&d);
    if has(Dimension::Pressure) && (has(Dimension::Volume) || has(Dimension::Temperature)) {
        return true;
    }
    GAS_WORD_RE.is_match(&question.lower) && question.contains_any(GAS_STATE_WORDS)
}

pub fn is_ph(question: &Question) -> bool {
    PH_RE.is_match(&question.lower)
}

pub fn is_concentration(question: &Question) -> bool {
    question.contains_any(CONCENTRATION_KEYWORDS)
}

pub fn is_thermochemistry(question: &Question) -> bool {
    question.contains_any(THERMOCHEMISTRY_KEYWORDS)
}

/// Topic named by a hint, None when the hint is absent or names nothing
pub fn topic_from_hint(hint: Option<&str>) -> Option<Topic> {
    let hint = hint?.trim().to_lowercase();
    if hint.is_empty() {
        return None;
    }
    HINT_TABLE
        .iter()
        .find(|(needle, _)| hint.contains(needle))
        .map(|(_, topic)| *topic)
}

/// Topic of a question: hint first, then the ordered rule table, then general chemistry
pub fn select_topic(question: &Question) -> Topic {
    if let Some(topic) = topic_from_hint(question.hint.as_deref()) {
        debug!("topic {} taken from hint", topic);
        return topic;
    }
    TOPIC_RULES
        .iter()
        .find(|rule| (rule.matches)(question))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::GeneralChemistry)
}

/// Full classification of an already prepared question
pub fn classify_question(question: &Question) -> Analysis {
    let topic = select_topic(question);
    let analysis = topic.handler().analyze(question);
    info!(
        "question classified as {} / {}",
        analysis.topic.id(),
        analysis.problem_type.id()
    );
    analysis
}

/// `classify(question, hint) -> {topic, problemType, variables}`
pub fn classify(question: &str, hint: Option<&str>) -> Analysis {
    classify_question(&Question::new(question, hint))
}
