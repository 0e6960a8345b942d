//! # chem_solver
//!
//! Solves free-text chemistry questions with step-by-step worked solutions.
//!
//! ```
//! use chem_solver::solver::ChemistrySolver;
//!
//! let solver = ChemistrySolver::new();
//! let response = solver.solve(
//!     "If 2.0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?",
//!     None,
//! );
//! assert!(response.final_answer.contains("4.00 atm"));
//! ```
pub mod calculators;
pub mod cli;
pub mod reference_data;
pub mod settings;
pub mod solver;
pub mod utils;
