use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tuning knobs. The command table itself is compiled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    /// Platform string used instead of the one the host reports
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay between clicking a dialog tab and focusing its field
    #[serde(default = "default_tab_settle_ms")]
    pub tab_settle_ms: u64,
    /// Delay between flushing a note field and clicking its save button
    #[serde(default = "default_save_settle_ms")]
    pub save_settle_ms: u64,
}

fn default_tab_settle_ms() -> u64 {
    100
}

fn default_save_settle_ms() -> u64 {
    150
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tab_settle_ms: default_tab_settle_ms(),
            save_settle_ms: default_save_settle_ms(),
        }
    }
}

impl TimingConfig {
    pub fn tab_settle(&self) -> Duration {
        Duration::from_millis(self.tab_settle_ms)
    }

    pub fn save_settle(&self) -> Duration {
        Duration::from_millis(self.save_settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Origin that action hrefs are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://secure.getjobber.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    let dir = directories::ProjectDirs::from("", "", "keyrelay")
        .context("Could not determine config directory")?
        .config_dir()
        .to_path_buf();
    Ok(dir)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the config. An explicit path must exist; a missing default file
/// yields the built-in defaults.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let p = default_config_path()?;
            if !p.exists() {
                tracing::debug!("no config at {}, using defaults", p.display());
                return Ok(Config::default());
            }
            p
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;

    Ok(config)
}
