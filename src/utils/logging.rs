//! Logger set-up. The library only emits through the `log` macros; the binary calls
//! [`init_logging`] once with the loaded settings.
use crate::settings::SolverSettings;
use log::{LevelFilter, SetLoggerError};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: String,
        source: std::io::Error,
    },
    #[error("logger already initialised: {0}")]
    AlreadyInitialized(#[from] SetLoggerError),
}

fn terminal_config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build()
}

/// Terminal logger on stderr, plus a file logger when the settings name a log file
pub fn build_loggers(settings: &SolverSettings) -> Result<Vec<Box<dyn SharedLogger>>, LoggingError> {
    let level = settings.level_filter();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        terminal_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(path) = &settings.log_file {
        let file = File::create(path).map_err(|source| LoggingError::LogFile {
            path: path.clone(),
            source,
        })?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    Ok(loggers)
}

pub fn init_logging(settings: &SolverSettings) -> Result<(), LoggingError> {
    CombinedLogger::init(build_loggers(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_only_by_default() {
        let loggers = build_loggers(&SolverSettings::default()).unwrap();
        assert_eq!(loggers.len(), 1);
        assert_eq!(loggers[0].level(), LevelFilter::Info);
    }

    #[test]
    fn test_file_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chem_solver.log");
        let settings = SolverSettings {
            log_level: "debug".to_string(),
            log_file: Some(path.to_str().unwrap().to_string()),
            ..Default::default()
        };
        let loggers = build_loggers(&settings).unwrap();
        assert_eq!(loggers.len(), 2);
        assert!(loggers.iter().all(|l| l.level() == LevelFilter::Debug));
        assert!(path.exists());

        let settings = SolverSettings {
            log_file: Some(dir.path().join("missing/dir/x.log").to_str().unwrap().to_string()),
            ..Default::default()
        };
        assert!(matches!(build_loggers(&settings), Err(LoggingError::LogFile { .. })));
    }
}
