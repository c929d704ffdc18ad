//! Settings file for the terminal front end.
//!
//! Every section and key is optional; missing values fall back to defaults.
//! Weights are quoted so they are read as exact decimals.
//!
//! ```toml
//! [engine]
//! delay_ms = 500
//! entry_test_max = 100
//!
//! [weights]
//! matric = "0.30"
//! inter = "0.30"
//! entry_test = "0.40"
//!
//! [logging]
//! level = "info"
//! console = true
//! directory = "logs"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use admission_core::{
    EngineConfig,
    calculations::AggregateWeights,
    config::{DEFAULT_DELAY, DEFAULT_ENTRY_TEST_MAX},
};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub engine: EngineSettings,
    pub weights: AggregateWeights,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Simulated calculation latency in milliseconds.
    pub delay_ms: u64,
    pub entry_test_max: Decimal,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            delay_ms: u64::try_from(DEFAULT_DELAY.as_millis()).unwrap_or(u64::MAX),
            entry_test_max: DEFAULT_ENTRY_TEST_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Level or full `EnvFilter` directive.
    pub level: String,
    /// Whether log lines are echoed to the console (stderr).
    pub console: bool,
    /// When set, logs are also appended to `<directory>/<app name>.log`.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            directory: None,
        }
    }
}

impl Settings {
    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Builds the engine configuration these settings describe.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_delay(Duration::from_millis(self.engine.delay_ms))
            .with_entry_test_max(self.engine.entry_test_max)
            .with_weights(self.weights)
    }
}
