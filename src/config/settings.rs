//! Configuration settings for blitz.
//!
//! Settings are loaded from `~/.blitz/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::api::SessionMode;
use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::BlitzError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Remote API settings.
    pub api: ApiConfig,
    /// Focus timer settings.
    pub focus: FocusConfig,
    /// Retry settings for session boundary calls.
    pub sync: SyncConfig,
    /// Demo identity used by `blitz login --demo`.
    pub demo: DemoConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the BlitzNow backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Focus timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Pomodoro duration in minutes.
    #[serde(default = "default_pomodoro_minutes")]
    pub pomodoro_minutes: u32,
    /// Mode the timer starts in.
    #[serde(default)]
    pub default_mode: SessionMode,
    /// Close the session as soon as a pomodoro runs out.
    #[serde(default)]
    pub auto_stop: bool,
}

/// Retry settings for session start/stop requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Attempts per request, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry; doubled for each later one.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Demo identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    #[serde(default = "default_demo_name")]
    pub name: String,
    #[serde(default = "default_demo_email")]
    pub email: String,
    #[serde(default = "default_demo_password")]
    pub password: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_pomodoro_minutes() -> u32 {
    25
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    500
}

fn default_demo_name() -> String {
    "Demo".to_string()
}

fn default_demo_email() -> String {
    "demo@blitz.local".to_string()
}

fn default_demo_password() -> String {
    "demo12345".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            pomodoro_minutes: default_pomodoro_minutes(),
            default_mode: SessionMode::default(),
            auto_stop: false,
        }
    }
}

impl FocusConfig {
    /// Pomodoro length in seconds.
    #[must_use]
    pub fn pomodoro_seconds(&self) -> u64 {
        u64::from(self.pomodoro_minutes) * 60
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            name: default_demo_name(),
            email: default_demo_email(),
            password: default_demo_password(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, BlitzError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or is invalid.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, BlitzError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BlitzError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            BlitzError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the timer cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value.
    pub fn validate(&self) -> Result<(), BlitzError> {
        if self.focus.pomodoro_minutes == 0 {
            return Err(BlitzError::Config(
                "focus.pomodoro_minutes must be at least 1".to_string(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(BlitzError::Config("api.base_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), BlitzError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| BlitzError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            BlitzError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
