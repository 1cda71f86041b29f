// Views module - screen-level rendering logic
//
// One view per session View:
// - Search: keyword and targeting form
// - Results: analysis dashboard and topic list
// - Editor: article settings, generated article and SEO audit
//
// The shell (title, error banner, logs, status) is drawn around the view.

mod editor;
mod results;
mod search;

use super::app::App;
use super::components::{error_banner, logs_panel, status_bar, title_bar};
use crate::session::View;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the log strip including borders
const LOG_STRIP_HEIGHT: u16 = 6;

/// Main render function, called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let banner_height = u16::from(app.session().error().is_some());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(8),
            Constraint::Length(LOG_STRIP_HEIGHT),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    error_banner::render(f, chunks[1], app);

    match app.view() {
        View::Search => search::render(f, chunks[2], app),
        View::Results => results::render(f, chunks[2], app),
        View::Editor => editor::render(f, chunks[2], app),
    }

    logs_panel::render(f, chunks[3], app);
    status_bar::render(f, chunks[4], app);

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
    app.clear_expired_toast();
}
