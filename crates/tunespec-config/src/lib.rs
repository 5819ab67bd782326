#![deny(unsafe_code)]

//! Configuration loading and validation for the tunespec tools.
//!
//! The CLI and the terminal control surface read a `tunespec.toml` that says
//! where spec documents live, where exports are written, and how the
//! controls behave. Every section is optional.
//!
//! ## TOML Example
//!
//! ```toml
//! [resources]
//! dir = "specs"
//!
//! [export]
//! dir = "exported"
//! pretty = true
//!
//! [controls]
//! visible_on_start = true
//! fine_steps = 100
//! coarse_steps = 10
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level tool configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where spec documents are resolved from.
    #[serde(default)]
    pub resources: ResourcesConfig,

    /// Where and how edited specs are exported.
    #[serde(default)]
    pub export: ExportConfig,

    /// Control surface behaviour.
    #[serde(default)]
    pub controls: ControlsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Spec document lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Directory searched for `<name>.json`.
    #[serde(default = "default_resources_dir")]
    pub dir: PathBuf,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_resources_dir(),
        }
    }
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("specs")
}

/// Export destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported `<name>.json` files are written to.
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,

    /// Pretty-print exported documents.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
            pretty: true,
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Control surface behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Show the controls as soon as the surface opens.
    #[serde(default = "default_true")]
    pub visible_on_start: bool,

    /// Number of steps across a slider's range for fine adjustment.
    #[serde(default = "default_fine_steps")]
    pub fine_steps: u32,

    /// Number of steps across a slider's range for coarse adjustment.
    #[serde(default = "default_coarse_steps")]
    pub coarse_steps: u32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            visible_on_start: true,
            fine_steps: default_fine_steps(),
            coarse_steps: default_coarse_steps(),
        }
    }
}

fn default_fine_steps() -> u32 {
    100
}

fn default_coarse_steps() -> u32 {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), "Read config file");
        Self::parse(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resources.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "resources.dir must not be empty".to_string(),
            ));
        }
        if self.export.dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "export.dir must not be empty".to_string(),
            ));
        }
        if self.controls.coarse_steps == 0 {
            return Err(ConfigError::Validation(
                "controls.coarse_steps must be at least 1".to_string(),
            ));
        }
        if self.controls.fine_steps < self.controls.coarse_steps {
            return Err(ConfigError::Validation(format!(
                "controls.fine_steps ({}) must be at least controls.coarse_steps ({})",
                self.controls.fine_steps, self.controls.coarse_steps
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                LOG_LEVELS, self.logging.level
            )));
        }
        Ok(())
    }

    /// Path an export of spec `name` is written to.
    pub fn export_path(&self, name: &str) -> PathBuf {
        self.export.dir.join(format!("{name}.json"))
    }
}
