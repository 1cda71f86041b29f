//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    ///
    /// The API key is never written; a commented placeholder points at the
    /// environment variable instead.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# seoscribe configuration

# ─────────────────────────────────────────────────────────────────────────────
# PROVIDER
# ─────────────────────────────────────────────────────────────────────────────
# kind: "gemini" (live, needs GEMINI_API_KEY) or "mock" (deterministic, offline)
# SEOSCRIBE_DEMO=1 forces the mock provider.
[provider]
kind = "{kind}"
model = "{model}"
api_base = "{api_base}"
# api_key = "..."  # prefer the GEMINI_API_KEY environment variable
timeout_secs = {timeout}
temperature = {temperature:?}
mock_delay_ms = {mock_delay}

# Default targeting for keyword analysis
[search]
country = "{country}"
device = "{device}"  # desktop, mobile
lang = "{lang}"

# Default article settings (target length comes from each analysis)
[article]
tone = "{tone}"  # professional, friendly, informative, persuasive, casual
image_source = "{image_source}"  # pexels, unsplash
max_images = {max_images}
include_media = {include_media}
include_table = {include_table}
table_type = "{table_type}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON log files (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            kind = self.provider.kind.as_str(),
            model = self.provider.model,
            api_base = self.provider.api_base,
            timeout = self.provider.timeout_secs,
            temperature = self.provider.temperature,
            mock_delay = self.provider.mock_delay_ms,
            country = self.search.country,
            device = self.search.device,
            lang = self.search.lang,
            tone = self.article.tone.as_str(),
            image_source = self.article.image_source.as_str().to_lowercase(),
            max_images = self.article.max_images,
            include_media = self.article.include_media,
            include_table = self.article.include_table,
            table_type = self.article.table_type,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display().to_string().replace('\\', "/"),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
