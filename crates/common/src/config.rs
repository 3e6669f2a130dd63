use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MonitorError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.thousandeyes.com/v7";
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Run-wide settings, built once at startup and passed by reference
/// into every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pre-obtained ThousandEyes API bearer token
    pub api_token: String,

    /// Name of the HTTP server test to locate or create
    pub test_name: String,

    /// Target URL the test monitors
    pub target: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Test interval in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Directory reports are written into (defaults to the working directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

impl Config {
    /// Build a config from the process environment, reading a `.env` file
    /// first if one is present. Missing required values are left empty and
    /// caught by `validate`, so CLI flags get a chance to fill them in.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let config = Self {
            api_token: std::env::var("TE_API_TOKEN").unwrap_or_default(),
            test_name: std::env::var("TEST_NAME").unwrap_or_default(),
            target: std::env::var("TARGET").unwrap_or_default(),
            base_url: std::env::var("TE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            interval_secs: std::env::var("TEST_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INTERVAL_SECS),
            output_dir: std::env::var("TE_OUTPUT_DIR").ok().map(PathBuf::from),
        };

        debug!("Loaded configuration from environment");
        config
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_token.is_empty() {
            return Err(MonitorError::Config(
                "api_token must not be empty (set TE_API_TOKEN)".to_string(),
            ));
        }
        if self.test_name.is_empty() {
            return Err(MonitorError::Config(
                "test_name must not be empty (set TEST_NAME or pass --test-name)".to_string(),
            ));
        }
        if self.target.is_empty() {
            return Err(MonitorError::Config(
                "target must not be empty (set TARGET or pass --target)".to_string(),
            ));
        }
        if self.base_url.is_empty() {
            return Err(MonitorError::Config("base_url must not be empty".to_string()));
        }
        if self.interval_secs == 0 {
            return Err(MonitorError::Config(
                "interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
