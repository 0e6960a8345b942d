//! Terminal rendering of worked solutions with prettytable
use crate::solver::types::{ExampleProblem, SolutionStep, SolverResponse, Variable};
use prettytable::{Cell, Row, Table, row};
use std::collections::BTreeMap;

fn or_blank(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

/// One row per step: number, title, formula, substitution, calculation and result
pub fn steps_table(steps: &[SolutionStep]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["#", "Step", "Formula", "Substitution", "Calculation", "Result"]);
    for step in steps {
        let title = if step.description.is_empty() {
            step.title.clone()
        } else {
            format!("{}\n{}", step.title, step.description)
        };
        let result = step
            .result_with_units
            .as_deref()
            .or(step.result.as_deref())
            .unwrap_or("");
        table.add_row(Row::new(vec![
            Cell::new(&step.step_number.to_string()),
            Cell::new(&title),
            Cell::new(or_blank(&step.formula)),
            Cell::new(or_blank(&step.substitution)),
            Cell::new(or_blank(&step.calculation)),
            Cell::new(result),
        ]));
    }
    table
}

pub fn variables_table(variables: &BTreeMap<String, Variable>) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Symbol", "Name", "Value", "Unit"]);
    for variable in variables.values() {
        let value = variable
            .value
            .map(|v| format!("{}", v))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![variable.symbol, variable.name, value, variable.unit]);
    }
    table
}

pub fn render_response(response: &SolverResponse, show_latex: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Topic: {}\n", response.detected_topic));
    out.push_str(&format!("Problem: {}\n", response.canonical_problem));
    if !response.variables.is_empty() {
        out.push_str(&variables_table(&response.variables).to_string());
    }
    out.push_str(&steps_table(&response.steps).to_string());
    out.push_str(&format!("Answer: {}\n", response.final_answer));
    if let Some(interpretation) = &response.interpretation {
        out.push_str(&format!("{}\n", interpretation));
    }
    if let Some(error) = &response.error {
        out.push_str(&format!("Error: {}\n", error));
    }
    if let Some(questions) = &response.clarifying_questions {
        for question in questions {
            out.push_str(&format!("  ? {}\n", question));
        }
    }
    if show_latex && !response.latex_equations.is_empty() {
        out.push_str("LaTeX:\n");
        for equation in &response.latex_equations {
            out.push_str(&format!("  {}\n", equation));
        }
    }
    out.push_str(&format!("Confidence: {:.0}%\n", response.confidence * 100.0));
    out
}

pub fn render_example(problem: &ExampleProblem, show_latex: bool) -> String {
    let mut out = format!(
        "{} [{:?}]\n{}\n",
        problem.title, problem.difficulty, problem.question
    );
    out.push_str(&variables_table(&problem.variables).to_string());
    out.push_str(&steps_table(&problem.solution).to_string());
    if show_latex {
        for latex in problem.solution.iter().filter_map(|s| s.latex_formula.as_ref()) {
            out.push_str(&format!("  {}\n", latex));
        }
    }
    out.push_str(&format!("Tags: {}\n", problem.tags.join(", ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_data::example_problems::builtin_examples;
    use crate::solver::ChemistrySolver;

    const BOYLE: &str =
        "If 2.0 L of gas at 1.5 atm is compressed to 0.75 L at constant temperature, what is the new pressure?";

    #[test]
    fn test_render_response() {
        let response = ChemistrySolver::new().solve(BOYLE, None);
        let text = render_response(&response, true);
        assert!(text.contains("Gas Laws - Boyle's Law"));
        assert!(text.contains("4.00 atm"));
        assert!(text.contains("LaTeX:"));
        assert!(!render_response(&response, false).contains("LaTeX:"));
        assert_eq!(steps_table(&response.steps).len(), response.steps.len() + 1);
    }

    #[test]
    fn test_render_failure() {
        let response = ChemistrySolver::new().solve("A gas at 1.5 atm and 300 K", Some("gas"));
        let text = render_response(&response, false);
        assert!(text.contains("Error: Insufficient data"));
        assert!(text.contains("? What is the value of"));
    }

    #[test]
    fn test_render_example() {
        let problem = builtin_examples().by_id("propane-combustion").unwrap();
        let text = render_example(problem, false);
        assert!(text.contains(&problem.question));
        assert!(text.contains("Tags: combustion"));
    }
}
