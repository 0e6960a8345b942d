use super::cli_main::{get_user_input, prompt, read_text};
use crate::settings::{with_settings, with_settings_mut};
use std::collections::HashMap;

fn show_settings() {
    with_settings(|manager| {
        let settings = manager.settings();
        println!("\nSettings file: {}", manager.config_file());
        println!("  log_level:     {}", settings.log_level);
        println!("  log_file:      {}", settings.log_file.as_deref().unwrap_or("-"));
        println!("  show_latex:    {}", settings.show_latex);
        println!("  examples_file: {}", settings.examples_file.as_deref().unwrap_or("-"));
    });
}

pub fn settings_menu() {
    loop {
        show_settings();
        println!("\n=== Settings ===");
        println!("1. Change a setting (key=value)");
        println!("2. Toggle LaTeX output");
        println!("3. Reset to defaults");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let result = match get_user_input().trim() {
            "1" => {
                let Some(line) = read_text("key=value") else {
                    continue;
                };
                match line.split_once('=') {
                    Some((key, value)) => {
                        let updates = HashMap::from([(key.trim(), value.trim())]);
                        with_settings_mut(|manager| manager.update(updates))
                    }
                    None => {
                        println!("Expected key=value, e.g. log_level=debug");
                        continue;
                    }
                }
            }
            "2" => with_settings_mut(|manager| {
                let show = !manager.settings().show_latex;
                manager.set_show_latex(show)
            }),
            "3" => with_settings_mut(|manager| manager.reset_to_defaults()),
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        if let Err(e) = result {
            println!("Error: {}", e);
        }
    }
}
