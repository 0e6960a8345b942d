use chem_solver::cli::cli_main::run_interactive_menu;
use chem_solver::cli::cli_solver::solve_once;
use chem_solver::settings::with_settings;
use chem_solver::utils::logging::init_logging;
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let settings = with_settings(|manager| manager.settings().clone());
    if let Err(e) = init_logging(&settings) {
        eprintln!("logging disabled: {}", e);
    }

    // chem_solver [--json] [--hint <topic>] <question words...>
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu();
        return ExitCode::SUCCESS;
    }
    let json = args.first().is_some_and(|a| a == "--json");
    if json {
        args.remove(0);
    }
    let mut hint = None;
    if args.first().is_some_and(|a| a == "--hint") && args.len() > 1 {
        hint = Some(args.remove(1));
        args.remove(0);
    }
    let question = args.join(" ");
    match solve_once(&question, hint.as_deref(), json) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
