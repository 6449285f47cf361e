//! TUI theme and styles

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent color
    pub const PRIMARY: Color = Color::Cyan;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Warning color
    pub const WARNING: Color = Color::Yellow;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::Black)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default()
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Error text style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Hyperlink-ish style for documentation links
    pub fn link() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Border of confirmation dialogs
    pub fn dialog_border() -> Style {
        Style::default().fg(Self::WARNING)
    }
}
