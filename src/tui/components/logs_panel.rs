//! Log strip component
//!
//! Shows the tail of the `LogBuffer` below the active view. Always follows
//! the newest entry; the full history is in the log file when enabled.

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// `[12:00:01] INFO  driver: message`, target shortened to its last segment
fn format_log_entry(entry: &LogEntry) -> String {
    let module = entry.target.rsplit("::").next().unwrap_or_default();
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        module,
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.log_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.log_debug),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, &app.theme))
        })
        .collect();

    let title = format!(" Logs ({}) ", app.log_buffer.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(app.theme.border_style(false))
            .title(title),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn entries_format_with_time_and_level() {
        let entry = LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Warn,
            target: "seoscribe::session".to_string(),
            message: "analysis failed".to_string(),
        };
        let line = format_log_entry(&entry);
        assert!(line.ends_with("] WARN  session: analysis failed"), "{}", line);
    }
}
