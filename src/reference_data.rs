/// atomic masses, formula parsing and molar mass
pub mod molmass;
/// unit tables and conversion to the canonical solver units
pub mod units;
/// built-in worked example problems with optional user overrides
pub mod example_problems;
