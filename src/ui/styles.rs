use crate::domain::InventoryLevel;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Big number style for the dashboard counters
pub fn counter_style() -> Style {
    Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD)
}

/// Taken / confirmed style
pub fn taken_style() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

/// Not-yet-taken and severe-symptom style
pub fn alert_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Season header in the history view
pub fn season_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Treatment badge style
pub fn badge_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Tip box style
pub fn tip_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

/// Colour of the stock number and gauge
pub fn inventory_style(level: InventoryLevel) -> Style {
    match level {
        InventoryLevel::Critical => Style::default().fg(Color::Red),
        InventoryLevel::Low => Style::default().fg(Color::Yellow),
        InventoryLevel::Ok => Style::default().fg(Color::Blue),
    }
}
