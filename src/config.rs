use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::aggregate::DisplayWindow;
use crate::sources::{DEFAULT_PROTOCOL_SLUG, DEFILLAMA_BASE_URL, LARGE_BANKS_REPORT_URL};

const CONFIG_FILE_NAME: &str = "aavebanks.toml";

/// Upstream endpoints and failure policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// DeFiLlama API host.
    pub defillama_base_url: String,

    /// DeFiLlama protocol slug.
    pub protocol_slug: String,

    /// Large commercial banks release.
    pub bank_report_url: String,

    /// Serve static fallback data when an upstream fails.
    ///
    /// When false, a failed source fails the whole dashboard request.
    pub use_fallbacks: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            defillama_base_url: DEFILLAMA_BASE_URL.to_string(),
            protocol_slug: DEFAULT_PROTOCOL_SLUG.to_string(),
            bank_report_url: LARGE_BANKS_REPORT_URL.to_string(),
            use_fallbacks: true,
        }
    }
}

/// Table presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown on each side of the protocol row.
    pub window_radius: usize,

    /// Tables with at most this many rows are shown in full.
    pub window_threshold: usize,

    /// Render bank deposits with thousands separators (`$2,732.2 B`).
    pub currency_grouping: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let window = DisplayWindow::default();
        Self {
            window_radius: window.radius,
            window_threshold: window.threshold,
            currency_grouping: false,
        }
    }
}

impl DisplayConfig {
    pub fn window(&self) -> DisplayWindow {
        DisplayWindow {
            radius: self.window_radius,
            threshold: self.window_threshold,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,

    /// Allow cross-origin requests to the JSON API.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            cors: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub display: DisplayConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./aavebanks.toml` if it exists in current directory
/// 2. `<config dir>/aavebanks/aavebanks.toml` (e.g. `~/.config` on Linux)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from(CONFIG_FILE_NAME);
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("aavebanks").join(CONFIG_FILE_NAME);
    }

    local_config
}
