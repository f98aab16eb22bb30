//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `armpanel.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use armpanel_adapter_http_reqwest::HttpConfig;
use armpanel_domain::step::StepSize;
use serde::Deserialize;

/// Longest request bound accepted, in milliseconds.
const MAX_TIMEOUT_MS: u64 = 10_000;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Arm controller address and request bound.
    pub device: HttpConfig,
    /// Status polling settings.
    pub poll: PollConfig,
    /// Panel behaviour.
    pub panel: PanelConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between two status reads, in milliseconds.
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Jog step sizes offered to the operator, in degrees.
    pub step_sizes: Vec<u32>,
    /// How long an alert stays visible, in milliseconds.
    pub alert_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `armpanel.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values do not validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("armpanel.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ARMPANEL_DEVICE") {
            self.device.address = val;
        }
        if let Some(val) = var("ARMPANEL_TIMEOUT_MS")
            && let Ok(ms) = val.parse()
        {
            self.device.timeout_ms = ms;
        }
        if let Some(val) = var("ARMPANEL_POLL_MS")
            && let Ok(ms) = val.parse()
        {
            self.poll.interval_ms = ms;
        }
        if let Some(val) = var("ARMPANEL_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "device address must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_TIMEOUT_MS).contains(&self.device.timeout_ms) {
            return Err(ConfigError::Validation(format!(
                "device timeout must be between 1 and {MAX_TIMEOUT_MS}ms"
            )));
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        if self.panel.alert_ms == 0 {
            return Err(ConfigError::Validation(
                "alert duration must be non-zero".to_string(),
            ));
        }
        if self.panel.step_sizes.is_empty() {
            return Err(ConfigError::Validation(
                "at least one step size is required".to_string(),
            ));
        }
        if self.panel.step_sizes.contains(&0) {
            return Err(ConfigError::Validation(
                "step sizes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.device.timeout()
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    #[must_use]
    pub fn alert_duration(&self) -> Duration {
        Duration::from_millis(self.panel.alert_ms)
    }

    /// Configured step sizes. Zero entries are skipped; [`validate`](Self::validate)
    /// rejects them anyway.
    #[must_use]
    pub fn step_sizes(&self) -> Vec<StepSize> {
        self.panel
            .step_sizes
            .iter()
            .filter_map(|&degrees| StepSize::new(degrees).ok())
            .collect()
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            step_sizes: vec![1, 5, 10],
            alert_ms: 2000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "armpanel=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
