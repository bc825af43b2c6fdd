use ratatui::style::{Color, Modifier, Style};

// Color palette, after the colors of timing screens and track flags
pub const RACING_RED: Color = Color::Rgb(225, 6, 0);
pub const TIMING_YELLOW: Color = Color::Rgb(255, 200, 0);
pub const TIMING_GREEN: Color = Color::Rgb(0, 200, 80);
pub const YELLOW_FLAG: Color = Color::Rgb(240, 170, 0);
pub const RED_FLAG: Color = Color::Rgb(230, 40, 40);
pub const GRID_GREY: Color = Color::Rgb(128, 128, 136);
pub const PIT_WALL: Color = Color::Rgb(64, 20, 24);
pub const CARBON: Color = Color::Rgb(24, 24, 28);

pub fn title_style() -> Style {
    Style::default().fg(RACING_RED).add_modifier(Modifier::BOLD)
}

/// Column headers of the races, qualifying and results tables
pub fn header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn selected_style() -> Style {
    Style::default().bg(PIT_WALL).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(GRID_GREY)
}

/// Table cells that open a race or a dialog
pub fn link_style() -> Style {
    Style::default().fg(TIMING_YELLOW)
}

/// Marker for seasons already in the cache
pub fn cached_style() -> Style {
    Style::default().fg(TIMING_GREEN)
}

/// Season fetch in progress
pub fn loading_style() -> Style {
    Style::default().fg(YELLOW_FLAG).add_modifier(Modifier::BOLD)
}

/// Blocking fetch-failure notification
pub fn notification_style() -> Style {
    Style::default().fg(RED_FLAG).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(RACING_RED)
    } else {
        Style::default().fg(GRID_GREY)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(CARBON).fg(Color::White)
}

/// Key names in the help overlay and dialog hints
pub fn key_hint_style() -> Style {
    Style::default().fg(TIMING_YELLOW).add_modifier(Modifier::BOLD)
}
