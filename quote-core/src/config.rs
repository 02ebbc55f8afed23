use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

/// Process-wide configuration, stored on disk as TOML.
///
/// Every field has a default, so a missing or partial config file is fine.
/// `API_URL` / `API_KEY` environment variables override the file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weather API base URL, including the stage prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Static API key sent as the `x-api-key` header.
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// VAT surcharge applied to the equipment total (default: 0.05).
    #[serde(default = "default_vat_rate")]
    pub vat_rate: f64,

    /// Retry attempts after the initial weather request (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between retry attempts in milliseconds (default: 1000).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_api_url() -> String {
    "https://063qqrtqth.execute-api.eu-west-2.amazonaws.com/v1".to_string()
}

fn default_api_key() -> String {
    "f661f74e-20a7-4e9f-acfc-041cfb846505".to_string()
}

const fn default_vat_rate() -> f64 {
    0.05
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: default_api_key(),
            vat_rate: default_vat_rate(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if no file exists yet,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        Ok(cfg.overridden_by(env::var("API_URL").ok(), env::var("API_KEY").ok()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "heatpump-quotes", "quote-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace the API endpoint fields from environment-style overrides.
    pub fn overridden_by(mut self, api_url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(key) = api_key {
            self.api_key = key;
        }
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
