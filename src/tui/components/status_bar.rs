// Status bar component
//
// Key hints for the active view. Narrow terminals get the short form.

use crate::session::View;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

type Hints = &'static [(&'static str, &'static str)];

const SEARCH_HINTS: Hints = &[
    ("Enter", "analyze"),
    ("Tab", "next field"),
    ("Space", "device"),
    ("Esc", "quit"),
];

const RESULTS_HINTS: Hints = &[
    ("↑↓", "topic"),
    ("Enter", "write on topic"),
    ("g", "editor"),
    ("PgUp/PgDn", "scroll"),
    ("h", "home"),
    ("q", "quit"),
];

const EDITOR_HINTS: Hints = &[
    ("g", "generate"),
    ("t", "tone"),
    ("+/-", "words"),
    ("m", "media"),
    ("i", "images"),
    ("[/]", "count"),
    ("b", "table"),
    ("y", "copy"),
    ("w", "save html"),
    ("Esc", "dashboard"),
    ("h", "home"),
];

const CUSTOM_TONE_HINTS: Hints = &[("type", "custom tone"), ("Enter", "done")];

/// Hints for the view, and how many survive on narrow terminals
fn hints(app: &App) -> (Hints, usize) {
    match app.view() {
        View::Search => (SEARCH_HINTS, 2),
        View::Results => (RESULTS_HINTS, 3),
        View::Editor if app.editing_custom_tone => (CUSTOM_TONE_HINTS, 2),
        View::Editor => (EDITOR_HINTS, 4),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let (all, short) = hints(app);
    let shown = if Breakpoint::from_width(area.width).at_least(Breakpoint::Normal) {
        all
    } else {
        &all[..short]
    };

    let text = shown
        .iter()
        .map(|(key, label)| format!("{} {}", key, label))
        .collect::<Vec<_>>()
        .join(" │ ");

    let status = Paragraph::new(format!(" {}", text))
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
