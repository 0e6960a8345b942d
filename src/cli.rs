/// main interactive menu and shared input helpers
pub mod cli_main;
/// free-text question solving
pub mod cli_solver;
/// manual calculators
pub mod cli_calculators;
/// browsing the example problem library
pub mod cli_examples;
/// viewing and changing the persisted settings
pub mod cli_settings;
/// table rendering of solutions
pub mod render;
