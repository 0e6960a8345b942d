/// logger initialisation for the binary
pub mod logging;
