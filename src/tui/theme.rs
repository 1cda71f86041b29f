// Color palette for the TUI
//
// One palette shared by every view and component; views never hardcode
// colors.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,
    pub title: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub status_bar: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,
            title: Color::Cyan,
            highlight: Color::Yellow,
            selected_bg: Color::Rgb(40, 44, 52),
            status_bar: Color::Gray,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Green,
            log_debug: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selected_bg)
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Green for easy, yellow for medium, red for hard keywords
    pub fn difficulty_color(&self, score: u32) -> Color {
        match score {
            0..=29 => self.success,
            30..=59 => self.warning,
            _ => self.error,
        }
    }

    pub fn check_color(&self, passed: bool) -> Color {
        if passed {
            self.success
        } else {
            self.error
        }
    }
}
