// Title bar component
//
// App name, current view, a spinner while a provider call is in flight, and
// the active provider on the right.

use crate::session::Stage;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn loading_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Analyze => "analyzing keyword",
        Stage::Generate => "writing article",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();

    let indicator = match session.loading_stage() {
        Some(stage) => format!("  {} {}", app.spinner_char(), loading_label(stage)),
        None => String::new(),
    };

    let keyword = session
        .analysis()
        .map(|a| format!(" ──── {}", a.keyword))
        .unwrap_or_default();

    let title_text = format!(
        " ✍ seoscribe ─ {}{}{}",
        session.view().title(),
        keyword,
        indicator
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} ", app.provider_name())).right_aligned()),
        );

    f.render_widget(title, area);
}
