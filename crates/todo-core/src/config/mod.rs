use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;

pub const DEFAULT_PLACEHOLDER: &str = "What needs to be done?";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub placeholder: String,
    pub tick_rate_ms: u64, // Redraw interval when idle
    pub show_help: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    /// Falls back to the system temp directory
    pub log_dir: Option<String>,
    pub level: Option<String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            tick_rate_ms: 250,
            show_help: true,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/todo-tui/config.json`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("todo-tui");
        path.push("config.json");
        path
    }

    /// Load the config file, writing the defaults there first if it does not
    /// exist yet.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if config_path.exists() {
            debug!("Loading config from {}", config_path.display());
            let config_str = fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&config_str)?;
            return Ok(config);
        }

        let config = Config::default();

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, config_str)?;
        info!("Wrote default config to {}", config_path.display());

        Ok(config)
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .log_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }
}
