//! Provider, search targeting and article defaults
//!
//! These three sections decide what the app talks to and what it sends:
//! - `[provider]`: live Gemini backend or deterministic mock
//! - `[search]`: default country/device/language for analysis requests
//! - `[article]`: default generation settings before the user edits them

use crate::models::{ArticleSettings, ImageSource, Tone};
use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Which provider implementation backs the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    #[default]
    Gemini,
    Mock,
}

impl ProviderKind {
    /// Parse from config, unknown values mean gemini
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mock" | "demo" => Self::Mock,
            _ => Self::Gemini,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mock => "mock",
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Gemini model id
    pub model: String,
    pub api_base: String,
    /// Never serialized to the config template; prefer GEMINI_API_KEY
    pub api_key: Option<String>,
    /// Per-request HTTP timeout (article generation can take a while)
    pub timeout_secs: u64,
    pub temperature: f32,
    /// Artificial latency for the mock provider
    pub mock_delay_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Gemini,
            model: "gemini-2.5-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
            timeout_secs: 120,
            temperature: 0.7,
            mock_delay_ms: 800,
        }
    }
}

/// Provider settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileProvider {
    pub kind: Option<String>,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub mock_delay_ms: Option<u64>,
}

impl ProviderConfig {
    /// Create from file config, with env API key taking precedence
    pub fn from_file(file: Option<FileProvider>, api_key_override: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            kind: file
                .kind
                .map(|s| ProviderKind::from_str(&s))
                .unwrap_or(defaults.kind),
            model: file.model.unwrap_or(defaults.model),
            api_base: file.api_base.unwrap_or(defaults.api_base),
            api_key: api_key_override
                .or(file.api_key)
                .filter(|k| !k.trim().is_empty()),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
            temperature: file.temperature.unwrap_or(defaults.temperature),
            mock_delay_ms: file.mock_delay_ms.unwrap_or(defaults.mock_delay_ms),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search targeting
// ─────────────────────────────────────────────────────────────────────────────

/// Default targeting for analysis requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    pub country: String,
    /// "desktop" or "mobile"
    pub device: String,
    pub lang: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            device: "desktop".to_string(),
            lang: "en".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSearch {
    pub country: Option<String>,
    pub device: Option<String>,
    pub lang: Option<String>,
}

impl SearchDefaults {
    pub fn from_file(file: Option<FileSearch>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            country: file.country.unwrap_or(defaults.country),
            device: file
                .device
                .map(|d| normalize_device(&d))
                .unwrap_or(defaults.device),
            lang: file.lang.unwrap_or(defaults.lang),
        }
    }
}

/// Anything that isn't "mobile" is treated as desktop
pub fn normalize_device(device: &str) -> String {
    if device.trim().eq_ignore_ascii_case("mobile") {
        "mobile".to_string()
    } else {
        "desktop".to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Article defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Starting point for article settings before the user adjusts them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDefaults {
    pub tone: Tone,
    pub image_source: ImageSource,
    pub max_images: u32,
    pub include_media: bool,
    pub include_table: bool,
    pub table_type: String,
}

impl Default for ArticleDefaults {
    fn default() -> Self {
        let settings = ArticleSettings::default();
        Self {
            tone: settings.tone,
            image_source: settings.image_source,
            max_images: settings.max_images,
            include_media: settings.include_media,
            include_table: settings.include_table,
            table_type: settings.table_type,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileArticle {
    pub tone: Option<String>,
    pub image_source: Option<String>,
    pub max_images: Option<u32>,
    pub include_media: Option<bool>,
    pub include_table: Option<bool>,
    pub table_type: Option<String>,
}

impl ArticleDefaults {
    pub fn from_file(file: Option<FileArticle>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            tone: file
                .tone
                .map(|s| Tone::from_str(&s))
                .unwrap_or(defaults.tone),
            image_source: file
                .image_source
                .map(|s| ImageSource::from_str(&s))
                .unwrap_or(defaults.image_source),
            max_images: file.max_images.unwrap_or(defaults.max_images),
            include_media: file.include_media.unwrap_or(defaults.include_media),
            include_table: file.include_table.unwrap_or(defaults.include_table),
            table_type: file.table_type.unwrap_or(defaults.table_type),
        }
    }

    /// Settings the session starts from; target length comes from the analysis
    pub fn to_settings(&self) -> ArticleSettings {
        ArticleSettings {
            tone: self.tone,
            image_source: self.image_source,
            max_images: self.max_images,
            include_media: self.include_media,
            include_table: self.include_table,
            table_type: self.table_type.clone(),
            ..ArticleSettings::default()
        }
    }
}
