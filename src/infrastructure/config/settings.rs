//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for secrets like `TELEGRAM_BOT_TOKEN` and `ETHERSCAN_API_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use tokenwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::etherscan::EtherscanConfig;
use crate::error::{ConfigError, Result};

/// Bot token variable.
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Etherscan API key variable.
pub const ENV_API_KEY: &str = "ETHERSCAN_API_KEY";
/// Proxy URL override.
pub const ENV_PROXY: &str = "TOKENWATCH_PROXY";
/// State file path override.
pub const ENV_STORAGE: &str = "TOKENWATCH_STORAGE";

/// Telegram bot settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramSettings {
    /// Bot token, filled from the environment only.
    #[serde(skip)]
    pub bot_token: Option<String>,
}

/// Where the watch list is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("storage.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Reconciliation schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// Seconds between ticks; the first tick runs one interval after start.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    300
}

impl ReconcileConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Telegram bot configuration.
    #[serde(default)]
    pub telegram: TelegramSettings,

    /// Balance API configuration.
    #[serde(default)]
    pub etherscan: EtherscanConfig,

    /// State file location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Reconciliation schedule.
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

/// Non-empty value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Secrets are read from the environment, never from the file. The proxy
    /// and storage path may also be overridden from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.telegram.bot_token = env_value(ENV_BOT_TOKEN);
        config.etherscan.api_key = env_value(ENV_API_KEY);
        if let Some(proxy) = env_value(ENV_PROXY) {
            config.etherscan.proxy = Some(proxy);
        }
        if let Some(path) = env_value(ENV_STORAGE) {
            config.storage.path = PathBuf::from(path);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Self::load`], but a missing file means all defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::parse_toml(""),
            Err(e) => Err(ConfigError::ReadFile(e).into()),
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.etherscan.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        url::Url::parse(&self.etherscan.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_url",
            reason: e.to_string(),
        })?;
        if self.etherscan.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.reconcile.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "storage.path",
            }
            .into());
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be `pretty` or `json`".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The bot token, required by `run`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `TELEGRAM_BOT_TOKEN` is unset.
    pub fn require_bot_token(&self) -> Result<&str> {
        self.telegram.bot_token.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: ENV_BOT_TOKEN,
            }
            .into()
        })
    }

    /// The Etherscan API key, required by `run` and `tick`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `ETHERSCAN_API_KEY` is unset.
    pub fn require_api_key(&self) -> Result<&str> {
        self.etherscan.api_key.as_deref().ok_or_else(|| {
            ConfigError::MissingField {
                field: ENV_API_KEY,
            }
            .into()
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
