use super::cli_main::{get_user_input, prompt, read_number, read_text};
use super::render::render_response;
use crate::calculators::{
    CalculatorKind, HalfLifeQuery, boyles_law, common_units, concentration_from_ph, convert_units,
    electron_configuration, faraday, half_life, heat, molar_mass, molarity, ph_from_concentration,
};
use crate::settings::with_settings;
use crate::solver::errors::SolverError;
use crate::solver::types::SolverResponse;

pub fn calculators_menu() {
    loop {
        println!("\n=== Calculators ===");
        for (i, kind) in CalculatorKind::ALL.iter().enumerate() {
            let calculator = kind.describe();
            println!("{}. {} ({})", i + 1, calculator.name, calculator.formula);
        }
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let choice = get_user_input();
        let choice = choice.trim();
        if choice == "0" {
            break;
        }
        let kind = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| CalculatorKind::ALL.get(i).copied());
        match kind {
            Some(kind) => match run_calculator(kind) {
                Some(Ok(response)) => {
                    let show_latex = with_settings(|manager| manager.settings().show_latex);
                    println!("{}", render_response(&response, show_latex));
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Cancelled."),
            },
            None => println!("Invalid choice. Please try again."),
        }
    }
}

/// Collects the inputs of one calculator; None when the user cancels
fn run_calculator(kind: CalculatorKind) -> Option<Result<SolverResponse, SolverError>> {
    let calculator = kind.describe();
    println!("\n{}: {}", calculator.name, calculator.description);
    let result = match kind {
        CalculatorKind::BoylesLaw => {
            let p1 = read_number("P₁ (atm)")?;
            let v1 = read_number("V₁ (L)")?;
            let v2 = read_number("V₂ (L)")?;
            boyles_law(p1, v1, v2)
        }
        CalculatorKind::PhFromConcentration => ph_from_concentration(read_number("[H⁺] (M)")?),
        CalculatorKind::ConcentrationFromPh => concentration_from_ph(read_number("pH")?),
        CalculatorKind::Molarity => {
            let moles = read_number("Moles of solute (mol)")?;
            let volume = read_number("Volume of solution (L)")?;
            molarity(moles, volume)
        }
        CalculatorKind::Heat => {
            let mass = read_number("Mass (g)")?;
            let c = read_number("Specific heat (J/g°C)")?;
            let dt = read_number("Temperature change (°C)")?;
            heat(mass, c, dt)
        }
        CalculatorKind::MolarMass => molar_mass(&read_text("Formula")?),
        CalculatorKind::UnitConverter => {
            for base in ["atm", "L", "K", "g", "mol"] {
                println!("  {}", common_units(base).join(", "));
            }
            let value = read_number("Value")?;
            let from = read_text("From unit")?;
            let to = read_text("To unit")?;
            convert_units(value, &from, &to)
        }
        CalculatorKind::Faraday => {
            let current = read_number("Current (A)")?;
            let time = read_number("Time (s)")?;
            faraday(current, time)
        }
        CalculatorKind::HalfLife => {
            println!("  Give three of N0, N, t, halfLife, e.g. N0=1000, t=5730, N=500");
            HalfLifeQuery::parse(&read_text("Values")?).and_then(half_life)
        }
        CalculatorKind::ElectronConfiguration => {
            let text = read_text("Atomic number (1-118)")?;
            match text.trim().parse::<u32>() {
                Ok(z) => electron_configuration(z),
                Err(_) => Err(SolverError::InvalidInput(format!(
                    "'{}' is not an atomic number",
                    text
                ))),
            }
        }
    };
    Some(result)
}

