// Editor view - article settings, the generated article and its SEO audit

use crate::models::{GeneratedArticle, Tone};
use crate::seo::SeoAnalysis;
use crate::session::Stage;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SETTINGS_WIDTH: u16 = 40;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let direction = Breakpoint::pane_direction(area.width);
    let sidebar = match direction {
        Direction::Horizontal => Constraint::Length(SETTINGS_WIDTH),
        Direction::Vertical => Constraint::Length(12),
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([sidebar, Constraint::Min(6)])
        .split(area);

    render_sidebar(f, panes[0], app);
    render_article(f, panes[1], app);
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn setting<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(theme.muted)),
        Span::raw(value),
    ])
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let settings = &app.settings;

    let tone = match (settings.tone, settings.custom_tone.as_deref()) {
        (Tone::Custom, custom) => {
            let cursor = if app.editing_custom_tone { "▏" } else { "" };
            format!("custom: {}{}", custom.unwrap_or_default(), cursor)
        }
        (tone, _) => tone.to_string(),
    };

    let mut lines = vec![
        setting(
            "Topic",
            app.session()
                .pending_topic()
                .unwrap_or("(article on the keyword)")
                .to_string(),
            theme,
        ),
        setting("Words", settings.target_words.to_string(), theme),
        setting("Tone", tone, theme),
        setting("Media", on_off(settings.include_media).to_string(), theme),
        setting(
            "Images",
            format!(
                "{} from {}",
                settings.max_images,
                settings.image_source.as_str()
            ),
            theme,
        ),
        setting(
            "Table",
            if settings.include_table {
                settings.table_type.clone()
            } else {
                on_off(false).to_string()
            },
            theme,
        ),
    ];

    if let Some(audit) = app.audit() {
        lines.push(Line::default());
        lines.extend(audit_lines(&audit, theme));
    }

    let sidebar = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(app.editing_custom_tone))
            .title(" Settings "),
    );
    f.render_widget(sidebar, area);
}

fn audit_lines(audit: &SeoAnalysis, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "SEO score {}/100 ({}), {}/{} checks",
            audit.score,
            audit.grade(),
            audit.passed(),
            audit.checks.len()
        ),
        theme.heading_style(),
    ))];
    lines.extend(audit.checks.iter().map(|check| {
        let icon = if check.passed { "✓" } else { "✗" };
        Line::from(Span::styled(
            format!("{} {}", icon, check.text),
            Style::default().fg(theme.check_color(check.passed)),
        ))
    }));
    lines
}

/// Article rendered as text: title, meta, then body with headings styled
fn article_lines(article: &GeneratedArticle, theme: &Theme) -> Vec<Line<'static>> {
    let headings = article.headings();
    let mut lines = vec![
        Line::from(Span::styled(
            article.title.clone(),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("meta title: {}", article.meta_title),
            Style::default().fg(theme.muted),
        )),
        Line::from(Span::styled(
            format!("meta description: {}", article.meta_description),
            Style::default().fg(theme.muted),
        )),
        Line::default(),
    ];

    for text in article.plain_text().lines() {
        if headings.iter().any(|h| h == text) {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                text.to_string(),
                theme.heading_style(),
            )));
        } else {
            lines.push(Line::from(text.to_string()));
        }
    }
    lines
}

fn render_article(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let theme = &app.theme;

    let (title, lines) = match session.article() {
        _ if session.loading_stage() == Some(Stage::Generate) => (
            " Article ".to_string(),
            vec![Line::from(format!(
                "{} Writing the article, this can take a minute...",
                app.spinner_char()
            ))],
        ),
        Some(article) => (
            format!(" Article ({} words) ", article.word_count()),
            article_lines(article, theme),
        ),
        None => (
            " Article ".to_string(),
            vec![Line::from(Span::styled(
                "Adjust the settings, then press g to generate the article.",
                Style::default().fg(theme.muted),
            ))],
        ),
    };

    let article = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.article_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.border_style(!app.editing_custom_tone))
                .title(title),
        );
    f.render_widget(article, area);
}
