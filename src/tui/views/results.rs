// Results view - the analysis dashboard
//
// Left: difficulty, intent, length band, related keywords, FAQs and
// competitors (scrollable). Right: outline entries and suggested titles, any
// of which can be picked as the article topic.

use crate::models::AnalysisResult;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(analysis) = app.session().analysis() else {
        return;
    };

    let panes = Layout::default()
        .direction(Breakpoint::pane_direction(area.width))
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let details = Paragraph::new(detail_lines(analysis, &app.theme))
        .wrap(Wrap { trim: false })
        .scroll((app.results_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(app.theme.border_style(false))
                .title(" Analysis "),
        );
    f.render_widget(details, panes[0]);

    render_topics(f, panes[1], app, analysis);
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme.heading_style()))
}

fn bullets<'a>(lines: &mut Vec<Line<'a>>, items: &'a [String], marker: &'static str) {
    lines.extend(items.iter().map(|item| Line::from(format!("  {} {}", marker, item))));
}

fn detail_lines<'a>(analysis: &'a AnalysisResult, theme: &Theme) -> Vec<Line<'a>> {
    let difficulty = &analysis.seo_difficulty;
    let band = analysis.word_count_suggestion;

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Keyword     ", Style::default().fg(theme.muted)),
            Span::raw(analysis.keyword.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Intent      ", Style::default().fg(theme.muted)),
            Span::raw(analysis.search_intent.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Difficulty  ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{}/100 ({})", difficulty.score, analysis.difficulty_label()),
                Style::default().fg(theme.difficulty_color(difficulty.score)),
            ),
        ]),
        Line::from(Span::styled(
            format!("            {}", difficulty.explanation),
            Style::default().fg(theme.muted),
        )),
        Line::from(vec![
            Span::styled("Length      ", Style::default().fg(theme.muted)),
            Span::raw(format!(
                "{} words recommended ({}-{}, competitors average {})",
                band.recommended, band.min, band.max, band.average
            )),
        ]),
    ];

    if !analysis.related_keywords.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Related keywords", theme));
        bullets(&mut lines, &analysis.related_keywords, "•");
    }

    if !analysis.faq_suggestions.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Questions people ask", theme));
        bullets(&mut lines, &analysis.faq_suggestions, "?");
    }

    if !analysis.competitors.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Competitors", theme));
        for competitor in &analysis.competitors {
            lines.push(Line::from(format!("  {}", competitor.title)));
            lines.push(Line::from(Span::styled(
                format!("    {}", competitor.url),
                Style::default().fg(theme.muted),
            )));
            for strength in &competitor.strengths {
                lines.push(Line::from(Span::styled(
                    format!("    + {}", strength),
                    Style::default().fg(theme.success),
                )));
            }
            for weakness in &competitor.weaknesses {
                lines.push(Line::from(Span::styled(
                    format!("    - {}", weakness),
                    Style::default().fg(theme.warning),
                )));
            }
        }
    }

    lines
}

fn render_topics(f: &mut Frame, area: Rect, app: &App, analysis: &AnalysisResult) {
    let outline_len = analysis.suggested_outline.len();
    let items: Vec<ListItem> = app
        .topics()
        .into_iter()
        .enumerate()
        .map(|(i, topic)| {
            let marker = if i < outline_len { "§" } else { "T" };
            ListItem::new(format!("{} {}", marker, topic))
        })
        .collect();

    let empty = items.is_empty();
    let list = List::new(items)
        .highlight_style(app.theme.selected_style())
        .highlight_symbol("▸ ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(app.theme.border_style(true))
                .title(" Topics: § outline  T title "),
        );

    let mut state = ListState::default().with_selected((!empty).then_some(app.topic_index));
    f.render_stateful_widget(list, area, &mut state);
}
