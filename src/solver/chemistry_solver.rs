//! The question-solving service object.
use crate::solver::classifier::{Analysis, classify_question};
use crate::solver::errors::SolverError;
use crate::solver::handlers::TopicSolver;
use crate::solver::question::Question;
use crate::solver::types::{ResponseBuilder, SolutionStep, SolverResponse};
use log::{debug, warn};

/// Confidence attached to a response that could not be solved
pub const FAILURE_CONFIDENCE: f64 = 0.30;

/// Stateless: every call works on its own question, so one instance can be shared freely
#[derive(Debug, Clone, Copy, Default)]
pub struct ChemistrySolver;

impl ChemistrySolver {
    pub fn new() -> Self {
        ChemistrySolver
    }

    pub fn classify(&self, question: &str, hint: Option<&str>) -> Analysis {
        classify_question(&Question::new(question, hint))
    }

    /// Classifies and solves, surfacing missing data and invalid numbers as errors
    pub fn try_solve(&self, question: &str, hint: Option<&str>) -> Result<SolverResponse, SolverError> {
        let question = Question::new(question, hint);
        let analysis = classify_question(&question);
        debug!(
            "solving {} with {} quantities",
            analysis.problem_type.id(),
            analysis.quantities.len()
        );
        analysis.topic.handler().solve(&question, &analysis)
    }

    /// Always returns a well-formed response; failures come back with `success == false`
    pub fn solve(&self, question: &str, hint: Option<&str>) -> SolverResponse {
        match self.try_solve(question, hint) {
            Ok(response) => response,
            Err(err) => {
                warn!("could not solve question: {}", err);
                let analysis = self.classify(question, hint);
                failure_response(question, &analysis, &err)
            }
        }
    }
}

fn failure_response(question: &str, analysis: &Analysis, err: &SolverError) -> SolverResponse {
    let mut builder = ResponseBuilder::new(analysis.topic.display_name(), question)
        .step(
            SolutionStep::new("Review the Given Data", err.to_string())
                .explanation("The problem cannot be solved with the information extracted from the text"),
        )
        .final_answer("Unable to solve the problem with the given information")
        .confidence(FAILURE_CONFIDENCE)
        .error(err.to_string());
    match err {
        SolverError::InsufficientData { missing } => {
            for m in missing {
                builder = builder.clarifying_question(format!("What is the value of {}?", m));
            }
        }
        SolverError::InvalidInput(_) => {
            builder = builder.clarifying_question("Can you check the numbers given in the question?");
        }
        SolverError::Formula(_) => {
            builder = builder.clarifying_question("Can you check the chemical formula in the question?");
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_become_responses() {
        let solver = ChemistrySolver::new();
        let response = solver.solve("A gas at 1.5 atm and 300 K", Some("gas"));
        assert!(!response.success);
        assert!(response.error.as_deref().unwrap().starts_with("Insufficient data"));
        assert_eq!(response.confidence, FAILURE_CONFIDENCE);
        assert_eq!(response.steps.len(), 1);
        assert!(!response.clarifying_questions.unwrap().is_empty());
        assert!(solver.try_solve("A gas at 1.5 atm and 300 K", Some("gas")).is_err());
    }

    #[test]
    fn test_invalid_numbers_become_responses() {
        let response = ChemistrySolver::new().solve(
            "If 0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?",
            None,
        );
        assert!(!response.success);
        assert!(response.error.unwrap().starts_with("Invalid input"));
    }
}
