use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Sundays and holidays, in the grid and in the weekday row
pub const SUNDAY_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub const SATURDAY_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Unselectable cells and unavailable controls
pub const DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub mod input {
    use super::*;

    pub const BORDER_STYLE: Style = BASE_STYLE;

    pub const INVALID_BORDER_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

    pub const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub const CURSOR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);
}
