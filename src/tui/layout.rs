//! Responsive breakpoints for TUI layout decisions.
//!
//! Single source of truth for width thresholds used by the views.

use ratatui::layout::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 80 cols: panels stack vertically
    Narrow,
    /// 80-119 cols: two columns
    Normal,
    /// 120+ cols
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=79 => Breakpoint::Narrow,
            80..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Side-by-side panes from Normal up, stacked below that
    pub fn pane_direction(width: u16) -> Direction {
        if Self::from_width(width).at_least(Breakpoint::Normal) {
            Direction::Horizontal
        } else {
            Direction::Vertical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Narrow);
        assert_eq!(Breakpoint::from_width(79), Breakpoint::Narrow);
        assert_eq!(Breakpoint::from_width(80), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
    }

    #[test]
    fn at_least_comparisons() {
        let normal = Breakpoint::Normal;
        assert!(normal.at_least(Breakpoint::Narrow));
        assert!(normal.at_least(Breakpoint::Normal));
        assert!(!normal.at_least(Breakpoint::Wide));
    }

    #[test]
    fn narrow_terminals_stack_panes() {
        assert_eq!(Breakpoint::pane_direction(60), Direction::Vertical);
        assert_eq!(Breakpoint::pane_direction(100), Direction::Horizontal);
    }
}
