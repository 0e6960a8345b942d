use crate::reference_data::molmass::FormulaError;
use thiserror::Error;

/// error types for the solver paths
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    /// more than one quantity of a formula is unknown
    #[error("Insufficient data: missing {}", .missing.join(", "))]
    InsufficientData { missing: Vec<String> },
    /// zero denominators, logarithms of non-positive numbers and non-finite results
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),
}

impl SolverError {
    pub fn missing<S: Into<String>>(missing: impl IntoIterator<Item = S>) -> Self {
        SolverError::InsufficientData {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }
}

/// Rejects NaN and infinite results before they reach a display string
pub fn finite(value: f64, what: &str) -> Result<f64, SolverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::InvalidInput(format!(
            "{} is not a finite number",
            what
        )))
    }
}

/// Division guarded against zero denominators
pub fn checked_div(numerator: f64, denominator: f64, what: &str) -> Result<f64, SolverError> {
    if denominator == 0.0 {
        return Err(SolverError::InvalidInput(format!(
            "{} would divide by zero",
            what
        )));
    }
    finite(numerator / denominator, what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards() {
        assert_eq!(checked_div(3.0, 0.75, "P₂"), Ok(4.0));
        assert!(matches!(
            checked_div(3.0, 0.0, "P₂"),
            Err(SolverError::InvalidInput(_))
        ));
        assert!(finite(f64::NAN, "x").is_err());
        let err = SolverError::missing(["P₂", "V₂"]);
        assert_eq!(err.to_string(), "Insufficient data: missing P₂, V₂");
    }
}
