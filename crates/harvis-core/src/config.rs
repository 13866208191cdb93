//! Runtime configuration.
//!
//! Configuration is read from a JSON file. Without an explicit path the
//! loader looks at `$XDG_CONFIG_HOME/harvis/config.json` and falls back to
//! defaults when that file does not exist.
//!
//! ```json
//! {
//!   "flow": "express",
//!   "delay_scale": 0.5,
//!   "api_delay_ms": 250,
//!   "account_type": "current"
//! }
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{OnboardingError, Result},
    models::{AccountType, FlowDefinition, FlowPreset},
};

/// Settings shared by the CLI and embedders of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Built-in flow used when no flow file is given
    pub flow: FlowPreset,
    /// JSON flow definition overriding the preset
    pub flow_file: Option<PathBuf>,
    /// Multiplier applied to every tick delay; 0 runs without waiting
    pub delay_scale: f64,
    /// Latency of each mock API call
    pub api_delay_ms: u64,
    /// Account type preselected in the account dialog
    pub account_type: AccountType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flow: FlowPreset::default(),
            flow_file: None,
            delay_scale: 1.0,
            api_delay_ms: 500,
            account_type: AccountType::default(),
        }
    }
}

impl Config {
    /// Resolves the flow definition: the flow file when set, else the preset.
    pub fn flow_definition(&self) -> Result<FlowDefinition> {
        match &self.flow_file {
            Some(path) => FlowDefinition::from_path(path),
            None => Ok(self.flow.definition()),
        }
    }

    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    /// Largest accepted `delay_scale`.
    pub const MAX_DELAY_SCALE: f64 = 1000.0;

    /// Checks values serde cannot constrain.
    pub fn validate(&self) -> Result<()> {
        Self::check_delay_scale(self.delay_scale)
    }

    pub(crate) fn check_delay_scale(scale: f64) -> Result<()> {
        if !(0.0..=Self::MAX_DELAY_SCALE).contains(&scale) {
            return Err(OnboardingError::Configuration {
                message: format!(
                    "delay_scale must be between 0 and {}, got {scale}",
                    Self::MAX_DELAY_SCALE
                ),
            });
        }
        Ok(())
    }
}

/// Locates and reads the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit configuration file, which must exist.
    pub fn with_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::FileSystem` if an explicit file cannot be
    /// read, `OnboardingError::Serialization` if it is not valid JSON, and
    /// `OnboardingError::Configuration` for out-of-range values
    pub fn load(self) -> Result<Config> {
        let (path, required) = match self.path {
            Some(path) => (path, true),
            None => (Self::default_config_path()?, false),
        };

        if !required && !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| OnboardingError::FileSystem {
            path: path.clone(),
            source: e,
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default configuration path following the XDG Base
    /// Directory specification.
    fn default_config_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("harvis")
            .place_config_file("config.json")
            .map_err(|e| OnboardingError::XdgDirectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "flow": "express", "delay_scale": 0.0 }"#).unwrap();

        let config = ConfigLoader::new()
            .with_path(Some(&path))
            .load()
            .expect("Failed to load config");

        assert_eq!(config.flow, FlowPreset::Express);
        assert_eq!(config.delay_scale, 0.0);
        assert_eq!(config.api_delay_ms, 500);
        assert_eq!(config.flow_definition().unwrap().name, "express");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = ConfigLoader::new()
            .with_path(Some(temp_dir.path().join("absent.json")))
            .load();
        assert!(matches!(result, Err(OnboardingError::FileSystem { .. })));
    }

    #[test]
    fn test_negative_delay_scale_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "delay_scale": -1.0 }"#).unwrap();

        let result = ConfigLoader::new().with_path(Some(&path)).load();
        assert!(matches!(result, Err(OnboardingError::Configuration { .. })));
    }

    #[test]
    fn test_unrepresentable_delay_scale_rejected() {
        for scale in [1e20, f64::INFINITY, f64::NAN, Config::MAX_DELAY_SCALE + 1.0] {
            let config = Config {
                delay_scale: scale,
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(OnboardingError::Configuration { .. })),
                "accepted delay_scale {scale}"
            );
        }

        let config = Config {
            delay_scale: Config::MAX_DELAY_SCALE,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
