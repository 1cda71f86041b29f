// CLI module - command-line argument parsing and handlers
//
// Without a subcommand seoscribe starts the TUI. Subcommands:
// - config --show | --path | --reset: configuration management
// - analyze <KEYWORD>: run the analysis stage headless
// - write <KEYWORD>: run analysis and generation headless
//
// analyze/write go through the same SessionDriver as the TUI, so guards,
// error messages and stale-result handling are identical.

use crate::config::{normalize_device, Config, SearchDefaults, VERSION};
use crate::export;
use crate::models::{AnalysisResult, AnalyzeRequest, ArticleSettings, GeneratedArticle, Tone};
use crate::provider::create_provider;
use crate::seo::{self, SeoAnalysis};
use crate::session::{Completions, Intent, SessionDriver};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// seoscribe - keyword analysis and article generation
#[derive(Parser, Debug)]
#[command(name = "seoscribe")]
#[command(version = VERSION)]
#[command(about = "Turn a search keyword into a publish-ready article", long_about = None)]
pub struct Cli {
    /// Use the deterministic mock provider (no API key needed)
    #[arg(long, global = true)]
    pub mock: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Analyze a keyword's SEO landscape
    Analyze {
        #[command(flatten)]
        search: SearchArgs,

        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a keyword and write an article for it
    Write {
        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        article: ArticleArgs,

        /// Write the article as a standalone HTML file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print analysis, article and audit as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Keyword and targeting; unset flags fall back to `[search]` config
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search keyword to analyze
    pub keyword: String,

    /// Target country code (e.g. US, SA)
    #[arg(long)]
    pub country: Option<String>,

    /// Target device: desktop or mobile
    #[arg(long)]
    pub device: Option<String>,

    /// Content language code (e.g. en, ar)
    #[arg(long)]
    pub lang: Option<String>,
}

impl SearchArgs {
    pub fn to_request(&self, defaults: &SearchDefaults) -> AnalyzeRequest {
        AnalyzeRequest::new(
            self.keyword.clone(),
            self.country.clone().unwrap_or_else(|| defaults.country.clone()),
            self.device
                .as_deref()
                .map(normalize_device)
                .unwrap_or_else(|| defaults.device.clone()),
            self.lang.clone().unwrap_or_else(|| defaults.lang.clone()),
        )
    }
}

/// Article overrides; unset flags fall back to the analysis and `[article]`
#[derive(Args, Debug, Clone, Default)]
pub struct ArticleArgs {
    /// Focus the article on this topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Target word count (defaults to the analysis' recommendation)
    #[arg(long)]
    pub words: Option<u32>,

    /// Tone: professional, friendly, informative, persuasive, casual, custom
    #[arg(long)]
    pub tone: Option<String>,

    /// Tone text when --tone custom (implies custom when given alone)
    #[arg(long)]
    pub custom_tone: Option<String>,
}

impl ArticleArgs {
    pub fn apply(&self, mut settings: ArticleSettings) -> ArticleSettings {
        if let Some(words) = self.words {
            settings.target_words = words;
        }
        if let Some(tone) = &self.tone {
            settings.tone = Tone::from_str(tone);
        }
        if let Some(custom) = &self.custom_tone {
            settings.custom_tone = Some(custom.clone());
            if self.tone.is_none() {
                settings.tone = Tone::Custom;
            }
        }
        settings
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config subcommand
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        let path = Config::config_path().context("Could not determine config path")?;
        println!("{}", path.display());
    } else if show {
        handle_config_show()?;
    } else if reset {
        handle_config_reset()?;
    } else {
        println!("Usage: seoscribe config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());
    println!();
    println!(
        "# api_key: {}",
        if config.provider.api_key.is_some() {
            "set"
        } else {
            "not set"
        }
    );

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Analyze through the driver; the session error becomes the command error
async fn analyze(
    driver: &mut SessionDriver,
    completions: &mut Completions,
    request: AnalyzeRequest,
) -> Result<AnalysisResult> {
    driver.submit(Intent::Analyze(request))?;
    driver.settle(completions).await;

    if let Some(error) = driver.session().error() {
        bail!("{}", error);
    }
    driver
        .session()
        .analysis()
        .cloned()
        .context("analysis finished without a result")
}

pub async fn run_analyze(config: &Config, search: &SearchArgs, json: bool) -> Result<()> {
    let provider = create_provider(&config.provider)?;
    let (mut driver, mut completions) = SessionDriver::new(provider);

    let analysis = analyze(
        &mut driver,
        &mut completions,
        search.to_request(&config.search),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

#[derive(Serialize)]
struct WriteReport<'a> {
    analysis: &'a AnalysisResult,
    article: &'a GeneratedArticle,
    seo: &'a SeoAnalysis,
}

pub async fn run_write(
    config: &Config,
    search: &SearchArgs,
    overrides: &ArticleArgs,
    out: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let provider = create_provider(&config.provider)?;
    let (mut driver, mut completions) = SessionDriver::new(provider);

    let request = search.to_request(&config.search);
    let lang = request.lang.clone();
    let analysis = analyze(&mut driver, &mut completions, request).await?;

    let settings =
        overrides.apply(ArticleSettings::from_analysis(&analysis, &config.article.to_settings()));
    driver.submit(Intent::Generate {
        settings,
        topic: overrides.topic.clone(),
    })?;
    driver.settle(&mut completions).await;

    let session = driver.session();
    if let Some(error) = session.error() {
        bail!("{}", error);
    }
    let article = session
        .article()
        .context("generation finished without an article")?;
    let audit = seo::analyze_article(article, &analysis);

    if let Some(path) = out {
        export::write_html(path, article, &analysis, &lang)?;
    }

    if json {
        let report = WriteReport {
            analysis: &analysis,
            article,
            seo: &audit,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if out.is_none() {
            print_article(article);
        }
        print_audit(&audit);
        if let Some(path) = out {
            println!("Article written to {}", path.display());
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Plain-text output
// ─────────────────────────────────────────────────────────────────────────────

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
}

fn print_analysis(analysis: &AnalysisResult) {
    let band = analysis.word_count_suggestion;
    println!("Keyword:     {}", analysis.keyword);
    println!("Intent:      {}", analysis.search_intent);
    println!(
        "Difficulty:  {}/100 ({}) - {}",
        analysis.seo_difficulty.score,
        analysis.difficulty_label(),
        analysis.seo_difficulty.explanation
    );
    println!(
        "Word count:  {} recommended ({}-{}, top pages average {})",
        band.recommended, band.min, band.max, band.average
    );

    print_list("Suggested titles", &analysis.suggested_titles);
    print_list("Outline", &analysis.suggested_outline);
    print_list("FAQ", &analysis.faq_suggestions);
    print_list("Related keywords", &analysis.related_keywords);

    if !analysis.competitors.is_empty() {
        println!();
        println!("Competitors:");
        for competitor in &analysis.competitors {
            println!("  - {} <{}>", competitor.title, competitor.url);
            for strength in &competitor.strengths {
                println!("      + {}", strength);
            }
            for weakness in &competitor.weaknesses {
                println!("      - {}", weakness);
            }
        }
    }
}

fn print_article(article: &GeneratedArticle) {
    println!("# {}", article.title);
    println!();
    println!("Meta title:       {}", article.meta_title);
    println!("Meta description: {}", article.meta_description);
    println!();
    println!("{}", article.plain_text());
    println!();
}

fn print_audit(audit: &SeoAnalysis) {
    println!(
        "SEO score: {}/100 ({}, {}/{} checks passed)",
        audit.score,
        audit.grade(),
        audit.passed(),
        audit.checks.len()
    );
    for check in &audit.checks {
        println!("  [{}] {}", if check.passed { "x" } else { " " }, check.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_write_with_overrides() {
        let cli = Cli::try_parse_from([
            "seoscribe",
            "write",
            "best running shoes",
            "--country",
            "SA",
            "--topic",
            "how shoes are made",
            "--words",
            "900",
            "--mock",
        ])
        .unwrap();
        assert!(cli.mock);
        match cli.command {
            Some(Commands::Write {
                search, article, ..
            }) => {
                assert_eq!(search.keyword, "best running shoes");
                assert_eq!(search.country.as_deref(), Some("SA"));
                assert_eq!(article.topic.as_deref(), Some("how shoes are made"));
                assert_eq!(article.words, Some(900));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn search_args_fall_back_to_config() {
        let args = SearchArgs {
            keyword: "k".to_string(),
            country: None,
            device: Some("MOBILE".to_string()),
            lang: None,
        };
        let request = args.to_request(&SearchDefaults::default());
        assert_eq!(request.country, "US");
        assert_eq!(request.device, "mobile");
        assert_eq!(request.lang, "en");
    }

    #[test]
    fn custom_tone_text_implies_custom() {
        let overrides = ArticleArgs {
            custom_tone: Some("dry humor".to_string()),
            ..Default::default()
        };
        let settings = overrides.apply(ArticleSettings::default());
        assert_eq!(settings.tone, Tone::Custom);
        assert_eq!(settings.effective_tone(), "dry humor");
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["seoscribe"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.mock);
    }

    #[tokio::test]
    async fn mock_write_exports_html() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("article.html");
        let mut config = Config::default();
        config.provider.kind = crate::config::ProviderKind::Mock;
        config.provider.mock_delay_ms = 0;

        let search = SearchArgs {
            keyword: "coffee grinders".to_string(),
            country: None,
            device: None,
            lang: None,
        };
        run_write(&config, &search, &ArticleArgs::default(), Some(&out), true)
            .await
            .unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
    }
}
