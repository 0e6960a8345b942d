/// Free-text chemistry question solver: classification, variable extraction and
/// step-by-step worked solutions.
pub mod chemistry_solver;
pub mod classifier;
pub mod errors;
pub mod extractor;
pub mod formatting;
pub mod gas_laws;
pub mod generic_topics;
pub mod handlers;
pub mod question;
pub mod stoichiometry;
pub mod types;

#[cfg(test)]
mod solver_tests;

pub use chemistry_solver::ChemistrySolver;
pub use classifier::{Analysis, ProblemType, Topic, classify};
pub use errors::SolverError;
pub use types::{Calculator, Difficulty, ExampleProblem, SolutionStep, SolverResponse, Variable};
