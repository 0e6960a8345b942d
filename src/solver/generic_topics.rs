//! Outline solvers for pH, concentration and thermochemistry, and the general-chemistry fallback.
//!
//! These paths name the governing formula and leave the arithmetic to the reader; the manual
//! calculators in `crate::calculators` do the actual computation for these topics.
use crate::solver::classifier::{Analysis, ProblemType, Topic};
use crate::solver::extractor::{Quantities, extract_variables, keys};
use crate::solver::question::Question;
use crate::solver::types::{ResponseBuilder, SolutionStep, SolverResponse, Variable};

/// Fixed content of a two-step outline
#[derive(Debug, Clone, Copy)]
pub struct Outline {
    pub topic: Topic,
    pub title: &'static str,
    pub description: &'static str,
    pub formula: &'static str,
    pub latex: &'static str,
    pub explanation: &'static str,
    pub substitution: &'static str,
    pub result: &'static str,
    pub interpretation: &'static str,
}

pub const PH_OUTLINE: Outline = Outline {
    topic: Topic::Ph,
    title: "Identify the pH Relationship",
    description: "Use the relationship between pH and [H+]",
    formula: "pH = -log[H+]",
    latex: "pH = -\\log[H^+]",
    explanation: "pH is the negative logarithm of hydrogen ion concentration",
    substitution: "Substitute the given values",
    result: "Calculate the result",
    interpretation: "This problem involves pH calculations using logarithms.",
};

pub const CONCENTRATION_OUTLINE: Outline = Outline {
    topic: Topic::Concentration,
    title: "Identify Concentration Formula",
    description: "Use the molarity formula",
    formula: "M = n/V",
    latex: "M = \\frac{n}{V}",
    explanation: "Molarity = moles of solute ÷ liters of solution",
    substitution: "Substitute known values",
    result: "Calculate the concentration",
    interpretation: "This problem involves calculating solution concentration.",
};

pub const THERMOCHEMISTRY_OUTLINE: Outline = Outline {
    topic: Topic::Thermochemistry,
    title: "Identify Heat Formula",
    description: "Use the heat capacity equation",
    formula: "q = mcΔT",
    latex: "q = mc\\Delta T",
    explanation: "Heat = mass × specific heat × temperature change",
    substitution: "Substitute known values",
    result: "Calculate the heat",
    interpretation: "This problem involves heat calculations using specific heat capacity.",
};

fn outline_for(topic: Topic) -> Option<&'static Outline> {
    match topic {
        Topic::Ph => Some(&PH_OUTLINE),
        Topic::Concentration => Some(&CONCENTRATION_OUTLINE),
        Topic::Thermochemistry => Some(&THERMOCHEMISTRY_OUTLINE),
        _ => None,
    }
}

/// Variables found in the text, attached to the outline for reference
fn found_variables(quantities: &Quantities) -> Vec<(&'static str, Variable)> {
    let catalog: [(&str, &str, &str, &str); 5] = [
        (keys::PH, "pH", "", "pH value"),
        (keys::MOLES, "n", "mol", "Amount of solute"),
        (keys::VOLUME, "V", "L", "Volume of solution"),
        (keys::MASS, "m", "g", "Mass"),
        (keys::TEMPERATURE_CHANGE, "ΔT", "K", "Temperature change"),
    ];
    catalog
        .iter()
        .filter_map(|(key, symbol, unit, description)| {
            let value = quantities.get(key)?;
            Some((*key, Variable::new(description, symbol, unit, description).with_value(value)))
        })
        .collect()
}

pub fn solve_outline(outline: &Outline, question: &Question, analysis: &Analysis) -> SolverResponse {
    let mut builder = ResponseBuilder::new(outline.topic.display_name(), &question.text)
        .step(
            SolutionStep::new(outline.title, outline.description)
                .formula(outline.formula)
                .explanation(outline.explanation),
        )
        .step(
            SolutionStep::new("Apply Formula", "Calculate using the given values")
                .substitution(outline.substitution)
                .result(outline.result),
        )
        .final_answer("See calculation steps above")
        .latex(outline.latex)
        .confidence(0.85)
        .interpretation(outline.interpretation);
    for (key, variable) in found_variables(&analysis.quantities) {
        builder = builder.variable(key, variable);
    }
    builder.build()
}

/// Low-confidence response for questions no topic rule recognises
pub fn solve_general(question: &Question) -> SolverResponse {
    ResponseBuilder::new(Topic::GeneralChemistry.display_name(), &question.text)
        .step(
            SolutionStep::new("Analyze the Problem", "This appears to be a general chemistry question")
                .explanation("Please provide more specific details or try rephrasing your question"),
        )
        .final_answer("Unable to determine specific solution approach")
        .confidence(0.30)
        .interpretation("This question needs more specific information to provide a detailed solution.")
        .build()
}

pub fn analyze(topic: Topic, question: &Question) -> Analysis {
    let problem_type = match topic {
        Topic::Ph => ProblemType::PhCalculation,
        Topic::Concentration => ProblemType::Molarity,
        Topic::Thermochemistry => ProblemType::HeatCalculation,
        _ => ProblemType::General,
    };
    Analysis::new(topic, problem_type, extract_variables(topic, question))
}

pub fn solve_topic(question: &Question, analysis: &Analysis) -> SolverResponse {
    match outline_for(analysis.topic) {
        Some(outline) => solve_outline(outline, question, analysis),
        None => solve_general(question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(topic: Topic, text: &str) -> SolverResponse {
        let question = Question::new(text, None);
        solve_topic(&question, &analyze(topic, &question))
    }

    #[test]
    fn test_ph_outline() {
        let response = solve(Topic::Ph, "What is the pH of a solution with [H+] = 0.001 M?");
        assert_eq!(response.detected_topic, "pH and Acids/Bases");
        assert_eq!(response.steps.len(), 2);
        assert_eq!(response.steps[0].formula.as_deref(), Some("pH = -log[H+]"));
        assert_eq!(response.steps[1].step_number, 2);
        assert_eq!(response.latex_equations, vec!["pH = -\\log[H^+]".to_string()]);
        assert_eq!(response.confidence, 0.85);
        assert_eq!(response.variables["ph"].value, Some(0.001));
    }

    #[test]
    fn test_concentration_and_heat_outlines() {
        let response = solve(Topic::Concentration, "0.50 mol of NaCl dissolved in 250 mL of solution");
        assert_eq!(response.detected_topic, "Concentration");
        assert_eq!(response.steps[0].title, "Identify Concentration Formula");
        assert_eq!(response.variables.len(), 2);

        let response = solve(Topic::Thermochemistry, "Heat needed to warm 50 g of water by 20 °C");
        assert_eq!(response.steps[0].formula.as_deref(), Some("q = mcΔT"));
        assert_eq!(response.final_answer, "See calculation steps above");
    }

    #[test]
    fn test_general_fallback() {
        let response = solve(Topic::GeneralChemistry, "Why is the sky blue?");
        assert!(response.success);
        assert_eq!(response.detected_topic, "General Chemistry");
        assert_eq!(response.steps.len(), 1);
        assert_eq!(response.final_answer, "Unable to determine specific solution approach");
        assert_eq!(response.confidence, 0.30);
        assert!(response.latex_equations.is_empty());
    }
}
