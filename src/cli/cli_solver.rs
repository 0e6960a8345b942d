use super::cli_main::{prompt, read_text};
use super::render::render_response;
use crate::settings::with_settings;
use crate::solver::ChemistrySolver;
use crate::solver::classifier::Topic;

pub fn solver_menu() {
    let solver = ChemistrySolver::new();
    println!("\n=== Solve a Question ===");
    println!(
        "Topics: {}",
        Topic::ALL
            .iter()
            .map(|t| t.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    loop {
        let Some(question) = read_text("\nQuestion (Enter to go back)") else {
            break;
        };
        let hint = read_text("Topic hint (optional)");
        prompt("Solving...\n");
        let show_latex = with_settings(|manager| manager.settings().show_latex);
        let response = solver.solve(&question, hint.as_deref());
        println!("{}", render_response(&response, show_latex));
    }
}

/// One-shot mode: solves `question` and returns either the rendered tables or pretty JSON
pub fn solve_once(question: &str, hint: Option<&str>, json: bool) -> Result<String, serde_json::Error> {
    let response = ChemistrySolver::new().solve(question, hint);
    if json {
        serde_json::to_string_pretty(&response)
    } else {
        let show_latex = with_settings(|manager| manager.settings().show_latex);
        Ok(render_response(&response, show_latex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_once() {
        let question = "How many grams of CO2 are produced when 10.0 g of propane (C3H8) burns completely?";
        let json = solve_once(question, None, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["canonicalProblem"], question);
        let text = solve_once(question, None, false).unwrap();
        assert!(text.contains("Stoichiometry"));
    }
}
