use super::cli_calculators::calculators_menu;
use super::cli_examples::examples_menu;
use super::cli_settings::settings_menu;
use super::cli_solver::solver_menu;
use log::warn;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => solver_menu(),
            "2" => calculators_menu(),
            "3" => examples_menu(),
            "4" => settings_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to chem_solver: step-by-step solutions for gas laws,\n
    stoichiometry, pH, concentration and thermochemistry problems \n \x1b[0m"
    );
    println!("\x1b[33m1. Solve a Question\x1b[0m");
    println!("\x1b[33m2. Calculators\x1b[0m");
    println!("\x1b[33m3. Example Problems\x1b[0m");
    println!("\x1b[33m4. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

/// Prints a cyan prompt without a newline
pub fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    if let Err(e) = io::stdout().flush() {
        warn!("cannot flush stdout: {}", e);
    }
}

/// One line from stdin, None at end of input
pub fn read_line() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            warn!("failed to read input: {}", e);
            None
        }
    }
}

/// End of input reads as "0" so menus exit cleanly
pub fn get_user_input() -> String {
    read_line().unwrap_or_else(|| "0".to_string())
}

/// Prompts until the user types a number; an empty line cancels
pub fn read_number(label: &str) -> Option<f64> {
    loop {
        prompt(&format!("{}: ", label));
        let input = read_line()?;
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        match input.parse::<f64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("'{}' is not a number. Press Enter to cancel.", input),
        }
    }
}

/// Prompts for free text; an empty line cancels
pub fn read_text(label: &str) -> Option<String> {
    prompt(&format!("{}: ", label));
    let input = read_line()?;
    let input = input.trim();
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}
