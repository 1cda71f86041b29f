// Startup module - banner and component status
//
// Printed to stderr before the TUI takes over the screen, and mirrored into
// the log strip once tracing is routed to the TUI buffer.

use crate::config::{Config, ProviderKind, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// One line of the component list
pub struct ComponentStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

fn component_status(config: &Config) -> Vec<ComponentStatus> {
    let provider = match config.provider.kind {
        ProviderKind::Gemini => format!("Gemini ({})", config.provider.model),
        ProviderKind::Mock => format!(
            "Deterministic mock ({} ms latency)",
            config.provider.mock_delay_ms
        ),
    };

    vec![
        ComponentStatus {
            name: "provider",
            enabled: true,
            description: provider,
        },
        ComponentStatus {
            name: "api-key",
            enabled: config.provider.kind == ProviderKind::Mock
                || config.provider.api_key.is_some(),
            description: match config.provider.kind {
                ProviderKind::Mock => "Not needed".to_string(),
                ProviderKind::Gemini if config.provider.api_key.is_some() => "Found".to_string(),
                ProviderKind::Gemini => "Missing (set GEMINI_API_KEY)".to_string(),
            },
        },
        ComponentStatus {
            name: "targeting",
            enabled: true,
            description: format!(
                "{} / {} / {}",
                config.search.country, config.search.device, config.search.lang
            ),
        },
        ComponentStatus {
            name: "file-logs",
            enabled: config.logging.file_enabled,
            description: config.logging.file_dir.display().to_string(),
        },
    ]
}

/// Print the startup banner and component status
pub fn print_startup(config: &Config) {
    use colors::*;

    eprintln!();
    eprintln!("  {BOLD}{CYAN}seoscribe{RESET} {DIM}v{VERSION}{RESET}");
    eprintln!("  {DIM}Keyword analysis and article generation{RESET}");
    eprintln!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            eprintln!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            eprintln!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    eprintln!();

    for component in component_status(config) {
        let (icon, style) = if component.enabled {
            (format!("{GREEN}✓{RESET}"), "")
        } else {
            (format!("{YELLOW}○{RESET}"), DIM)
        };
        eprintln!(
            "    {icon} {style}{:<10}{RESET} {DIM}{}{RESET}",
            component.name, component.description
        );
    }

    if config.demo_mode {
        eprintln!();
        eprintln!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(mock provider){RESET}");
    }
    eprintln!();
}

/// Mirror the startup status into the log strip
pub fn log_startup(config: &Config) {
    tracing::info!("seoscribe v{}", VERSION);
    for component in component_status(config) {
        let icon = if component.enabled { "✓" } else { "○" };
        tracing::info!("{} {} - {}", icon, component.name, component.description);
    }
    if config.demo_mode {
        tracing::info!("Demo mode active (mock provider)");
    }
    tracing::info!("Ready. Type a keyword and press Enter.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_flagged_for_gemini_only() {
        let mut config = Config::default();
        let status = component_status(&config);
        let key = status.iter().find(|c| c.name == "api-key").unwrap();
        assert!(!key.enabled);

        config.provider.kind = ProviderKind::Mock;
        let status = component_status(&config);
        let key = status.iter().find(|c| c.name == "api-key").unwrap();
        assert!(key.enabled);
    }
}
