//! # Settings Module
//!
//! ## Purpose
//! Persisted user settings for the chem_solver binary: log verbosity, an optional log file,
//! whether LaTeX equations are printed, and an optional example-library override file.
//! The solver itself takes no configuration; only the presentation layer reads these.
//!
//! ## Architecture
//! - **SolverSettings**: serializable settings structure
//! - **SettingsManager**: load/validate/persist wrapper around the settings file
//! - **Global Access**: `OnceLock<Mutex<_>>` singleton reached through `with_settings` and
//!   `with_settings_mut`
//!
//! ## Configuration Format
//! ```json
//! {
//!   "log_level": "info",
//!   "log_file": null,
//!   "show_latex": true,
//!   "examples_file": null
//! }
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use chem_solver::settings::{with_settings, with_settings_mut};
//!
//! let show_latex = with_settings(|manager| manager.settings().show_latex);
//! with_settings_mut(|manager| manager.set_show_latex(false)).ok();
//! ```
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "chem_solver_config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File does not exist: {0}")]
    MissingFile(String),
    #[error("Unknown setting: {0}")]
    UnknownKey(String),
    #[error("Invalid value '{value}' for setting {key}")]
    InvalidValue { key: String, value: String },
}

/// User settings persisted as JSON.
///
/// # Fields
/// * `log_level` - one of off/error/warn/info/debug/trace
/// * `log_file` - optional file receiving a copy of the log
/// * `show_latex` - print the LaTeX equations under a solution
/// * `examples_file` - optional JSON file overriding/extending the example library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub log_level: String,
    pub log_file: Option<String>,
    pub show_latex: bool,
    pub examples_file: Option<String>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            show_latex: true,
            examples_file: None,
        }
    }
}

impl SolverSettings {
    /// Parsed log level, `Info` when the stored name is not a level
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

fn parse_level(value: &str) -> Result<String, ConfigError> {
    value
        .parse::<LevelFilter>()
        .map(|_| value.to_lowercase())
        .map_err(|_| ConfigError::InvalidValue {
            key: "log_level".to_string(),
            value: value.to_string(),
        })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn existing_file(path: &str) -> Result<String, ConfigError> {
    if Path::new(path).exists() {
        Ok(path.to_string())
    } else {
        Err(ConfigError::MissingFile(path.to_string()))
    }
}

/// Owns the current settings and the file they are persisted to
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: SolverSettings,
    config_file: String,
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsManager {
    /// Loads `chem_solver_config.json` from the working directory, defaults if absent or invalid
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(config_file: &str) -> Self {
        let settings = Self::load_config(config_file).unwrap_or_default();
        Self {
            settings,
            config_file: config_file.to_string(),
        }
    }

    fn load_config(config_file: &str) -> Result<SolverSettings, ConfigError> {
        if Path::new(config_file).exists() {
            let content = fs::read_to_string(config_file)?;
            let settings: SolverSettings = serde_json::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(SolverSettings::default())
        }
    }

    /// Writes the settings to `path` regardless of build profile
    pub fn save_to(&self, path: &str) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.settings)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Persists the settings to the config file. Does nothing in tests.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        #[cfg(test)]
        {
            return Ok(());
        }

        #[cfg(not(test))]
        {
            self.save_to(&self.config_file)
        }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.settings.log_level = parse_level(level)?;
        self.save_config()
    }

    pub fn set_log_file(&mut self, path: Option<&str>) -> Result<(), ConfigError> {
        self.settings.log_file = path.map(str::to_string);
        self.save_config()
    }

    pub fn set_show_latex(&mut self, show: bool) -> Result<(), ConfigError> {
        self.settings.show_latex = show;
        self.save_config()
    }

    /// The file must exist
    pub fn set_examples_file(&mut self, path: &str) -> Result<(), ConfigError> {
        self.settings.examples_file = Some(existing_file(path)?);
        self.save_config()
    }

    /// Applies several settings at once. Every value is validated before any is applied.
    pub fn update(&mut self, updates: HashMap<&str, &str>) -> Result<(), ConfigError> {
        let mut next = self.settings.clone();
        for (key, value) in &updates {
            match *key {
                "log_level" => next.log_level = parse_level(value)?,
                "log_file" => {
                    next.log_file = if value.is_empty() { None } else { Some(value.to_string()) }
                }
                "show_latex" => next.show_latex = parse_flag(key, value)?,
                "examples_file" => next.examples_file = Some(existing_file(value)?),
                _ => return Err(ConfigError::UnknownKey(key.to_string())),
            }
        }
        self.settings = next;
        self.save_config()
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.settings = SolverSettings::default();
        self.save_config()
    }
}

static GLOBAL_SETTINGS: OnceLock<Mutex<SettingsManager>> = OnceLock::new();

/// Guard on the process-wide settings, loaded from the default file on first use
pub fn get_settings_manager() -> MutexGuard<'static, SettingsManager> {
    GLOBAL_SETTINGS
        .get_or_init(|| Mutex::new(SettingsManager::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn with_settings<F, R>(f: F) -> R
where
    F: FnOnce(&SettingsManager) -> R,
{
    let manager = get_settings_manager();
    f(&manager)
}

pub fn with_settings_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut SettingsManager) -> R,
{
    let mut manager = get_settings_manager();
    f(&mut manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_file_is_missing() {
        let manager = SettingsManager::with_config_file("definitely_missing_config.json");
        assert_eq!(manager.settings(), &SolverSettings::default());
        assert_eq!(manager.settings().level_filter(), LevelFilter::Info);
        assert!(manager.settings().show_latex);
    }

    #[test]
    fn test_load_and_save() {
        let mut config = NamedTempFile::new().unwrap();
        config
            .write_all(br#"{ "log_level": "debug", "show_latex": false }"#)
            .unwrap();
        let manager = SettingsManager::with_config_file(config.path().to_str().unwrap());
        assert_eq!(manager.settings().level_filter(), LevelFilter::Debug);
        assert!(!manager.settings().show_latex);
        assert_eq!(manager.settings().examples_file, None);

        let out = NamedTempFile::new().unwrap();
        manager.save_to(out.path().to_str().unwrap()).unwrap();
        let reloaded = SettingsManager::with_config_file(out.path().to_str().unwrap());
        assert_eq!(reloaded.settings(), manager.settings());
    }

    #[test]
    fn test_invalid_json_falls_back_to_defaults() {
        let mut config = NamedTempFile::new().unwrap();
        config.write_all(b"not json").unwrap();
        let manager = SettingsManager::with_config_file(config.path().to_str().unwrap());
        assert_eq!(manager.settings(), &SolverSettings::default());
    }

    #[test]
    fn test_validating_setters() {
        let mut manager = SettingsManager::with_config_file("unused_config.json");
        assert!(matches!(
            manager.set_examples_file("no_such_examples.json"),
            Err(ConfigError::MissingFile(_))
        ));
        let examples = NamedTempFile::new().unwrap();
        let path = examples.path().to_str().unwrap();
        manager.set_examples_file(path).unwrap();
        assert_eq!(manager.settings().examples_file.as_deref(), Some(path));

        assert!(manager.set_log_level("chatty").is_err());
        manager.set_log_level("WARN").unwrap();
        assert_eq!(manager.settings().level_filter(), LevelFilter::Warn);

        manager.reset_to_defaults().unwrap();
        assert_eq!(manager.settings(), &SolverSettings::default());
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut manager = SettingsManager::with_config_file("unused_config.json");
        let mut updates = HashMap::new();
        updates.insert("show_latex", "off");
        updates.insert("colour", "red");
        assert!(matches!(manager.update(updates), Err(ConfigError::UnknownKey(_))));
        assert!(manager.settings().show_latex);

        let mut updates = HashMap::new();
        updates.insert("show_latex", "off");
        updates.insert("log_level", "trace");
        updates.insert("log_file", "chem_solver.log");
        manager.update(updates).unwrap();
        assert!(!manager.settings().show_latex);
        assert_eq!(manager.settings().log_file.as_deref(), Some("chem_solver.log"));
    }

    #[test]
    fn test_global_access() {
        let latex = with_settings(|manager| manager.settings().show_latex);
        let same = with_settings_mut(|manager| manager.settings().show_latex);
        assert_eq!(latex, same);
    }
}
