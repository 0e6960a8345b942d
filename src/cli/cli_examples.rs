use super::cli_main::{get_user_input, prompt};
use super::render::{render_example, render_response};
use crate::reference_data::example_problems::load_examples;
use crate::settings::with_settings;
use crate::solver::ChemistrySolver;

pub fn examples_menu() {
    let (examples_file, show_latex) = with_settings(|manager| {
        let settings = manager.settings();
        (settings.examples_file.clone(), settings.show_latex)
    });
    let library = load_examples(examples_file.as_deref());
    loop {
        println!("\n=== Example Problems ===");
        for (i, problem) in library.all().iter().enumerate() {
            println!("{}. {} [{}]", i + 1, problem.title, problem.topic_id);
        }
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let choice = get_user_input();
        let choice = choice.trim();
        if choice == "0" {
            break;
        }
        let problem = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| library.all().get(i));
        let Some(problem) = problem else {
            println!("Invalid choice. Please try again.");
            continue;
        };
        println!("{}", render_example(problem, show_latex));
        prompt("Solve it live? (y/N): ");
        if get_user_input().trim().eq_ignore_ascii_case("y") {
            let response = ChemistrySolver::new().solve(&problem.question, Some(&problem.topic_id));
            println!("{}", render_response(&response, show_latex));
        }
    }
}
