// seoscribe - keyword analysis and article generation
//
// Turns a search keyword into a publish-ready article in two stages: an SEO
// analysis of the keyword, then generation of an article from that analysis.
//
// Architecture:
// - Session (controller + driver): the view/state machine and the async
//   analyze -> generate pipeline against an AnalysisProvider
// - Provider: Gemini over HTTP, or a deterministic mock for demos and tests
// - TUI (ratatui): search form, results dashboard, article editor
// - CLI (clap): headless analyze/write subcommands and config management
// - Logging: tracing routed to the TUI log strip, stderr or rolling files

mod cli;
mod config;
mod export;
mod logging;
mod models;
mod provider;
mod seo;
mod session;
mod startup;
mod tui;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, LoggingConfig, ProviderKind};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { show, reset, path }) => cli::handle_config(show, reset, path),
        Some(Commands::Analyze { search, json }) => {
            let config = load_config(cli.mock)?;
            let _file_guard = init_tracing(&config.logging, None);
            cli::run_analyze(&config, &search, json).await
        }
        Some(Commands::Write {
            search,
            article,
            out,
            json,
        }) => {
            let config = load_config(cli.mock)?;
            let _file_guard = init_tracing(&config.logging, None);
            cli::run_write(&config, &search, &article, out.as_ref(), json).await
        }
        None => run_interactive(cli.mock).await,
    }
}

/// Start the TUI
async fn run_interactive(mock: bool) -> Result<()> {
    let config = load_config(mock)?;
    if !config.enable_tui {
        bail!(
            "TUI disabled (SEOSCRIBE_NO_TUI is set). \
             Use `seoscribe analyze <KEYWORD>` or `seoscribe write <KEYWORD>` instead."
        );
    }

    startup::print_startup(&config);

    let provider = match provider::create_provider(&config.provider) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("  Cannot start: {}", e);
            eprintln!(
                "  Set {} or run `seoscribe --mock` for the offline demo provider.",
                config::API_KEY_ENV
            );
            std::process::exit(1);
        }
    };

    // Logs go to the TUI buffer from here on; stderr belongs to the terminal UI
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, Some(&log_buffer));
    startup::log_startup(&config);

    tui::run_tui(provider, log_buffer, config).await
}

/// Load configuration, reporting a broken config file before bailing
fn load_config(mock: bool) -> Result<Config> {
    Config::ensure_config_exists();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!();
            eprintln!("  ╭─────────────────────────────────────────────╮");
            eprintln!("  │  seoscribe: configuration error             │");
            eprintln!("  ╰─────────────────────────────────────────────╯");
            eprintln!("  {}", e);
            eprintln!("  Fix the file or run `seoscribe config --reset`.");
            eprintln!();
            return Err(e).context("Failed to load configuration");
        }
    };

    if mock {
        config.provider.kind = ProviderKind::Mock;
    }
    Ok(config)
}

/// Initialize tracing
///
/// With a `LogBuffer` logs are captured for the TUI log strip, otherwise they
/// go to stderr. File logging is added on top of either when enabled.
/// Precedence: RUST_LOG env var > config file > default "info".
///
/// The returned guard must be kept alive so the file writer flushes.
fn init_tracing(logging: &LoggingConfig, tui_buffer: Option<&LogBuffer>) -> Option<WorkerGuard> {
    let default_filter = format!("seoscribe={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = tui_buffer.map(|buffer| TuiLogLayer::new(buffer.clone()));
    let stderr_layer = tui_buffer
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_writer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };
    // JSON for structured log parsing
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking file writer, if file logging is enabled and possible
fn file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    Some(tracing_appender::non_blocking(appender))
}
