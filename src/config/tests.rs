//! Configuration tests
//!
//! Round-trip guards: every field written by `to_toml()` must parse back into
//! the same value, so a field added to `Config` but forgotten in the template
//! shows up here.

use super::*;
use crate::models::{ImageSource, Tone};
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap_or_else(|e| panic!("TOML:\n{}\nError: {}", toml_str, e))
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let reloaded = Config::from_sources(parse(&config.to_toml()), no_env);
    assert_eq!(reloaded, config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.provider.kind = ProviderKind::Mock;
    config.provider.model = "gemini-2.5-pro".to_string();
    config.provider.temperature = 1.0;
    config.provider.mock_delay_ms = 0;
    config.search.country = "SA".to_string();
    config.search.device = "mobile".to_string();
    config.search.lang = "ar".to_string();
    config.article.tone = Tone::Casual;
    config.article.image_source = ImageSource::Unsplash;
    config.article.max_images = 5;
    config.article.include_table = true;
    config.article.table_type = "pros and cons".to_string();
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let reloaded = Config::from_sources(parse(&config.to_toml()), no_env);
    assert_eq!(reloaded, config);
}

#[test]
fn test_api_key_never_serialized() {
    let mut config = Config::default();
    config.provider.api_key = Some("secret-key".to_string());
    let toml_str = config.to_toml();
    assert!(!toml_str.contains("secret-key"));
    assert!(toml_str.contains("GEMINI_API_KEY"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::from_sources(parse(""), no_env);
    assert_eq!(config, Config::default());
}

#[test]
fn test_env_api_key_beats_file() {
    let file = parse("[provider]\napi_key = \"from-file\"\n");
    let config = Config::from_sources(file, env_from(&[(API_KEY_ENV, "from-env")]));
    assert_eq!(config.provider.api_key.as_deref(), Some("from-env"));

    let file = parse("[provider]\napi_key = \"from-file\"\n");
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.provider.api_key.as_deref(), Some("from-file"));
}

#[test]
fn test_blank_api_key_is_none() {
    let config = Config::from_sources(parse(""), env_from(&[(API_KEY_ENV, "  ")]));
    assert!(config.provider.api_key.is_none());
}

#[test]
fn test_demo_mode_forces_mock() {
    let file = parse("[provider]\nkind = \"gemini\"\n");
    let config = Config::from_sources(file, env_from(&[("SEOSCRIBE_DEMO", "true")]));
    assert!(config.demo_mode);
    assert_eq!(config.provider.kind, ProviderKind::Mock);
}

#[test]
fn test_no_tui_flag() {
    let config = Config::from_sources(parse(""), env_from(&[("SEOSCRIBE_NO_TUI", "1")]));
    assert!(!config.enable_tui);

    let config = Config::from_sources(parse(""), env_from(&[("SEOSCRIBE_NO_TUI", "0")]));
    assert!(config.enable_tui);
}

#[test]
fn test_unknown_values_fall_back() {
    let file = parse(
        "[provider]\nkind = \"openai\"\n[search]\ndevice = \"tablet\"\n\
         [article]\ntone = \"sarcastic\"\nimage_source = \"flickr\"\n\
         [logging]\nfile_rotation = \"weekly\"\n",
    );
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.provider.kind, ProviderKind::Gemini);
    assert_eq!(config.search.device, "desktop");
    assert_eq!(config.article.tone, Tone::Professional);
    assert_eq!(config.article.image_source, ImageSource::Pexels);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let result: Result<FileConfig, _> = toml::from_str("[provider\nkind = ");
    assert!(result.is_err());
}

#[test]
fn test_article_defaults_seed_settings() {
    let file = parse("[article]\ntone = \"friendly\"\ninclude_media = false\n");
    let config = Config::from_sources(file, no_env);
    let settings = config.article.to_settings();
    assert_eq!(settings.tone, Tone::Friendly);
    assert!(!settings.include_media);
    assert_eq!(settings.target_words, 1200);
}

#[test]
fn test_logging_level_and_prefix_are_sanitized() {
    let file = parse(
        r#"
[logging]
level = " WARN "
file_prefix = "   "
file_rotation = "weekly"
"#,
    );
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file_prefix, "seoscribe");
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);

    let file = parse("[logging]\nlevel = \"loud\"\n");
    assert_eq!(Config::from_sources(file, no_env).logging.level, "info");
}
