//! CLI configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/steam-appmanifest/config.toml`
//! - macOS: `~/Library/Application Support/steam-appmanifest/config.toml`
//! - Windows: `%APPDATA%/steam-appmanifest/config.toml`
//!
//! A missing file means defaults. Command-line flags take precedence.

use std::path::{Path, PathBuf};

use appmanifest_community::client::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "steam-appmanifest";
const CONFIG_FILE: &str = "config.toml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Profile used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,

    /// Library root used instead of auto-detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,

    /// Feed request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Steam Community base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_base_url() -> String {
    "https://steamcommunity.com".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_id: None,
            library_path: None,
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location, or defaults if absent.
    pub fn load() -> anyhow::Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from `path`.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR).join(CONFIG_FILE))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join(CONFIG_FILE)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(APP_DIR).join(CONFIG_FILE))
    }
}
