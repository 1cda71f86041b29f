// Error banner component
//
// One line under the title bar carrying the session's last failure message.
// Cleared by the session itself when the next request starts.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(message) = app.session().error() else {
        return;
    };

    let banner = Paragraph::new(format!(" ⚠ {}", message)).style(
        Style::default()
            .fg(app.theme.error)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(banner, area);
}
