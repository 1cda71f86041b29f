//! `[logging]` section: filter level and the optional JSON log file
//!
//! The TUI owns the terminal, so file output is the only way to keep a log
//! that outlives a session.

use serde::Deserialize;
use std::path::PathBuf;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// Single file that grows forever
    Never,
}

impl LogRotation {
    /// Unknown values mean daily
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Lowercased level if it is one tracing knows, otherwise "info"
pub fn normalize_level(level: &str) -> String {
    let level = level.trim().to_lowercase();
    if LEVELS.contains(&level.as_str()) {
        level
    } else {
        "info".to_string()
    }
}

/// `~/.local/share/seoscribe/logs` (platform equivalent), or `./logs`
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("seoscribe").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter for the `seoscribe` target; RUST_LOG overrides it
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, e.g. "seoscribe" -> "seoscribe.2025-01-15"
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: default_log_dir(),
            file_rotation: LogRotation::default(),
            file_prefix: "seoscribe".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let Some(file) = file else {
            return Self::default();
        };
        let defaults = Self::default();

        let prefix = file
            .file_prefix
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Self {
            level: file
                .level
                .as_deref()
                .map(normalize_level)
                .unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.map(PathBuf::from).unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .as_deref()
                .map(LogRotation::from_str)
                .unwrap_or(defaults.file_rotation),
            file_prefix: prefix.unwrap_or(defaults.file_prefix),
        }
    }
}
