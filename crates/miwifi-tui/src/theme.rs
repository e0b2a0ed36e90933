//! Colours and styles shared by the panels.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(255, 105, 0); // #ff6900
pub const DOWNLOAD: Color = Color::Rgb(94, 214, 134); // #5ed686
pub const UPLOAD: Color = Color::Rgb(102, 178, 255); // #66b2ff
pub const CPU_LINE: Color = Color::Rgb(255, 196, 87); // #ffc457
pub const MEM_LINE: Color = Color::Rgb(197, 134, 255); // #c586ff
pub const TEXT: Color = Color::Rgb(210, 212, 220); // #d2d4dc
pub const MUTED: Color = Color::Rgb(110, 118, 140); // #6e768c

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_style() -> Style {
    Style::default().fg(MUTED)
}

/// Axis lines and labels.
pub fn axis_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn table_header() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn bar() -> Style {
    Style::default().fg(DOWNLOAD)
}
