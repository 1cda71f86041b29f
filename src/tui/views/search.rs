// Search view - keyword and targeting form

use crate::tui::app::App;
use crate::tui::input::SearchField;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const FORM_WIDTH: u16 = 64;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let width = FORM_WIDTH.min(area.width);
    let form_area = Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        area.height,
    );

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(SearchField::all().iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(form_area);

    let intro = Paragraph::new("Enter a keyword to analyze its search landscape")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.muted));
    f.render_widget(intro, rows[0]);

    for (i, &field) in SearchField::all().iter().enumerate() {
        let row = rows[i + 1];
        let focused = app.form.focus == field;
        let value = app.form.value(field);

        let text = match field {
            SearchField::Device => format!("◂ {} ▸", value),
            _ => value.to_string(),
        };

        let input = Paragraph::new(text)
            .style(Style::default().fg(app.theme.foreground))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type)
                    .border_style(app.theme.border_style(focused))
                    .title(format!(" {} ", field.label())),
            );
        f.render_widget(input, row);

        let editable = field != SearchField::Device;
        if focused && editable && !app.session().is_loading() {
            let x = row.x + 1 + (value.width() as u16).min(row.width.saturating_sub(3));
            f.set_cursor_position((x, row.y + 1));
        }
    }
}
