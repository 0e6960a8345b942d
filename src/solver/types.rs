//! Data model shared by the solver, the calculators and the example library.
//! All types serialize with camelCase field names; optional fields are skipped when empty.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named physical quantity with a display symbol and unit.
/// Used as calculator input metadata and as part of a solved response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub unit: String,
    pub description: String,
    pub required: bool,
}

impl Variable {
    pub fn new(name: &str, symbol: &str, unit: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            value: None,
            unit: unit.to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// One unit of pedagogical explanation inside a worked solution
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionStep {
    pub step_number: usize,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_with_units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl SolutionStep {
    /// step number is assigned when the step is pushed into [`SolutionSteps`]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn latex(mut self, latex: impl Into<String>) -> Self {
        self.latex_formula = Some(latex.into());
        self
    }

    pub fn substitution(mut self, substitution: impl Into<String>) -> Self {
        self.substitution = Some(substitution.into());
        self
    }

    pub fn calculation(mut self, calculation: impl Into<String>) -> Self {
        self.calculation = Some(calculation.into());
        self
    }

    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn result_with_units(mut self, result: impl Into<String>) -> Self {
        self.result_with_units = Some(result.into());
        self
    }

    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// Ordered step sequence. Numbering is owned by the collection: steps are numbered
/// 1, 2, 3 ... in push order, so a sequence never has gaps or duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSteps {
    steps: Vec<SolutionStep>,
}

impl SolutionSteps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut step: SolutionStep) -> &mut Self {
        step.step_number = self.steps.len() + 1;
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_vec(self) -> Vec<SolutionStep> {
        self.steps
    }
}

impl FromIterator<SolutionStep> for SolutionSteps {
    fn from_iter<I: IntoIterator<Item = SolutionStep>>(iter: I) -> Self {
        let mut steps = SolutionSteps::new();
        for step in iter {
            steps.push(step);
        }
        steps
    }
}

/// Result of one solve call. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResponse {
    pub success: bool,
    pub detected_topic: String,
    pub canonical_problem: String,
    pub variables: BTreeMap<String, Variable>,
    pub steps: Vec<SolutionStep>,
    pub final_answer: String,
    pub latex_equations: Vec<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarifying_questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

/// Builder used by every solver path; `build` is the only way steps get into a response
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    detected_topic: String,
    canonical_problem: String,
    variables: BTreeMap<String, Variable>,
    steps: SolutionSteps,
    final_answer: String,
    latex_equations: Vec<String>,
    confidence: f64,
    clarifying_questions: Vec<String>,
    error: Option<String>,
    interpretation: Option<String>,
}

impl ResponseBuilder {
    pub fn new(detected_topic: impl Into<String>, canonical_problem: &str) -> Self {
        Self {
            detected_topic: detected_topic.into(),
            canonical_problem: canonical_problem.to_string(),
            variables: BTreeMap::new(),
            steps: SolutionSteps::new(),
            final_answer: String::new(),
            latex_equations: Vec::new(),
            confidence: 0.0,
            clarifying_questions: Vec::new(),
            error: None,
            interpretation: None,
        }
    }

    pub fn variable(mut self, key: &str, variable: Variable) -> Self {
        self.variables.insert(key.to_string(), variable);
        self
    }

    pub fn step(mut self, step: SolutionStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: SolutionSteps) -> Self {
        for step in steps.into_vec() {
            self.steps.push(step);
        }
        self
    }

    pub fn final_answer(mut self, answer: impl Into<String>) -> Self {
        self.final_answer = answer.into();
        self
    }

    pub fn latex(mut self, equation: impl Into<String>) -> Self {
        self.latex_equations.push(equation.into());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn clarifying_question(mut self, question: impl Into<String>) -> Self {
        self.clarifying_questions.push(question.into());
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn interpretation(mut self, interpretation: impl Into<String>) -> Self {
        self.interpretation = Some(interpretation.into());
        self
    }

    pub fn build(self) -> SolverResponse {
        let clarifying_questions = if self.clarifying_questions.is_empty() {
            None
        } else {
            Some(self.clarifying_questions)
        };
        SolverResponse {
            success: self.error.is_none(),
            detected_topic: self.detected_topic,
            canonical_problem: self.canonical_problem,
            variables: self.variables,
            steps: self.steps.into_vec(),
            final_answer: self.final_answer,
            latex_equations: self.latex_equations,
            confidence: self.confidence,
            clarifying_questions,
            error: self.error,
            interpretation: self.interpretation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Pre-baked question/answer pair from the example library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleProblem {
    pub id: String,
    pub topic_id: String,
    pub title: String,
    pub question: String,
    pub variables: BTreeMap<String, Variable>,
    pub solution: Vec<SolutionStep>,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

/// Static description of a manual calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculator {
    pub id: String,
    pub name: String,
    pub description: String,
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
    pub formula: String,
    pub latex_formula: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_numbered_in_push_order() {
        let mut steps = SolutionSteps::new();
        steps
            .push(SolutionStep::new("First", "a"))
            .push(SolutionStep::new("Second", "b"));
        let steps: SolutionSteps = steps
            .into_vec()
            .into_iter()
            .chain(std::iter::once(SolutionStep::new("Third", "c")))
            .collect();
        let numbers: Vec<usize> = steps.into_vec().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = ResponseBuilder::new("Gas Laws", "q")
            .step(SolutionStep::new("Identify", "d").formula("PV = nRT"))
            .final_answer("done")
            .confidence(0.95)
            .build();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["detectedTopic"], "Gas Laws");
        assert_eq!(json["canonicalProblem"], "q");
        assert_eq!(json["steps"][0]["stepNumber"], 1);
        assert_eq!(json["steps"][0]["formula"], "PV = nRT");
        assert!(json["steps"][0].get("latexFormula").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_error_marks_response_unsuccessful() {
        let response = ResponseBuilder::new("Gas Laws", "q")
            .error("missing data")
            .clarifying_question("What is P₂?")
            .build();
        assert!(!response.success);
        assert_eq!(response.clarifying_questions.unwrap().len(), 1);
    }
}
