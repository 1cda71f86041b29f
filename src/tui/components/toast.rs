//! Toast notification component
//!
//! Short feedback for actions that don't change the view: copy, export,
//! rejected input. Drawn in the bottom-right corner over everything else and
//! dropped once it expires.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const INFO_LIFETIME: Duration = Duration::from_millis(2500);
const ERROR_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    /// Something the user asked for did not happen
    Error,
}

/// A toast notification that auto-dismisses
pub struct Toast {
    /// Message to display (single line)
    pub message: String,
    pub kind: ToastKind,
    /// When the toast was created
    created_at: Instant,
    /// How long to show the toast
    lifetime: Duration,
}

impl Toast {
    /// Informational toast, shown for 2.5 seconds
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Info, INFO_LIFETIME)
    }

    /// Error toast; stays up longer and uses the error color
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Error, ERROR_LIFETIME)
    }

    fn with_kind(message: impl Into<String>, kind: ToastKind, lifetime: Duration) -> Self {
        let message: String = message.into();
        Self {
            message: message.lines().next().unwrap_or_default().to_string(),
            kind,
            created_at: Instant::now(),
            lifetime,
        }
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.lifetime
    }

    fn accent(&self, theme: &Theme) -> ratatui::style::Color {
        match self.kind {
            ToastKind::Info => theme.highlight,
            ToastKind::Error => theme.error,
        }
    }

    /// Render the toast in the bottom-right corner of `area`
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Display width, not byte length: Arabic and emoji differ
        let text_width = self.message.width() as u16;
        let width = (text_width + 4).min(area.width.saturating_sub(4));
        let height = 3;

        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 2);
        let toast_area = Rect::new(x, y, width, height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(self.accent(theme)))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.foreground))
            .block(block);

        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
