//! Promptcraft configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main Promptcraft configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Handlebars template replacing the built-in export layout
    #[serde(rename = "template-path")]
    pub template_path: Option<PathBuf>,

    /// Terminal editor settings
    pub tui: TuiConfig,

    /// Directory of the file this config was loaded from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::default_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; a broken config file is reported properly by
    /// [`Config::load`] once logging exists.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_paths(),
        };

        paths
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|config| config.log_level)
    }

    /// Candidate config locations, highest priority first
    ///
    /// 1. Project-local: `./promptcraft.yml`
    /// 2. User: `~/.config/promptcraft/config.yml`
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("promptcraft.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("promptcraft").join("config.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "Config::load_from_file: called");
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Export template path with `~/` expanded
    ///
    /// Relative paths resolve against the directory of the config file they
    /// came from, or the working directory for a config built in code.
    pub fn template_path(&self) -> Option<PathBuf> {
        let raw = self.template_path.as_ref()?;
        let expanded = match raw.to_str().and_then(|s| s.strip_prefix("~/")) {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)).unwrap_or_else(|| raw.clone()),
            None => raw.clone(),
        };

        if expanded.is_relative()
            && let Some(base) = &self.base_dir
        {
            return Some(base.join(expanded));
        }
        Some(expanded)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).context(format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

/// Terminal editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,

    /// Characters of the role shown in the library table
    #[serde(rename = "role-preview-width")]
    pub role_preview_width: usize,

    /// Show the live preview pane beside the form
    #[serde(rename = "show-preview")]
    pub show_preview: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            role_preview_width: promptstore::DEFAULT_ROLE_PREVIEW_WIDTH,
            show_preview: true,
        }
    }
}
