//! Configuration for seoscribe
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/seoscribe/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod provider;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use provider::{
    normalize_device, ArticleDefaults, FileArticle, FileProvider, FileSearch, ProviderConfig,
    ProviderKind, SearchDefaults,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Whether to enable the TUI (disabled for headless/CLI use)
    pub enable_tui: bool,

    /// Demo mode: force the mock provider regardless of `[provider].kind`
    pub demo_mode: bool,

    pub provider: ProviderConfig,

    /// Default targeting for new analyses
    pub search: SearchDefaults,

    /// Default article settings
    pub article: ArticleDefaults,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_tui: true,
            demo_mode: false,
            provider: ProviderConfig::default(),
            search: SearchDefaults::default(),
            article: ArticleDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [provider] section
    pub provider: Option<FileProvider>,

    /// Optional [search] section
    pub search: Option<FileSearch>,

    /// Optional [article] section
    pub article: Option<FileArticle>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// A config file exists but cannot be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

fn env_flag(value: Option<String>) -> Option<bool> {
    value.map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl Config {
    /// Get the config file path: ~/.config/seoscribe/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("seoscribe").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        // Config::default().to_toml() is the single source of truth
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A missing file means defaults. A file that exists but cannot be read
    /// or parsed is an error, never a fallback.
    fn load_file_config() -> Result<FileConfig, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = Self::load_file_config()?;
        Ok(Self::from_sources(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // TUI toggle: env only (runtime flag)
        let enable_tui = env_flag(env("SEOSCRIBE_NO_TUI")).map_or(true, |off| !off);

        // Demo mode: env only (runtime flag)
        let demo_mode = env_flag(env("SEOSCRIBE_DEMO")).unwrap_or(false);

        let mut provider = ProviderConfig::from_file(file.provider, env(API_KEY_ENV));
        if demo_mode {
            provider.kind = ProviderKind::Mock;
        }

        Self {
            enable_tui,
            demo_mode,
            provider,
            search: SearchDefaults::from_file(file.search),
            article: ArticleDefaults::from_file(file.article),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
