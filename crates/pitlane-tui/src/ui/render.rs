use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use pitlane_core::browse::ViewState;

use crate::app::{App, AppState};

use super::panels::{detail, dialogs, home, races};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    if let Some(dialog) = app.browser.dialog() {
        dialogs::render(frame, dialog);
    }

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if let Some(message) = app.browser.notification() {
        render_notification(frame, message);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.browser.selected_season() {
        Some(season) => format!("  Pitlane | {} season", season),
        None => "  Pitlane | F1 season browser".to_string(),
    };
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 2)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.browser.state() {
        ViewState::Home => home::render(frame, app, area),
        ViewState::Loading(season) => home::render_loading(frame, season, area),
        ViewState::BrowsingRaces | ViewState::ViewingRaceDetail => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(area);

            races::render(frame, app, chunks[0]);
            detail::render(frame, app, chunks[1]);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.browser.state() {
        ViewState::Home => "[Enter] open | [q]uit",
        ViewState::Loading(_) => "[h]ome | [q]uit",
        ViewState::BrowsingRaces => "[Enter] race | [h]ome | [q]uit",
        ViewState::ViewingRaceDetail => "[Tab] pane | [d]river [c]onstructor [o] circuit | [h]ome | [q]uit",
    };

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" Cache: {} ", app.cache_location),
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let bindings = [
        ("Up/Down, j/k", "Move selection"),
        ("PgUp/PgDn", "Move a page"),
        ("1-4", "Pick a season"),
        ("Enter", "Open season / race"),
        ("Tab", "Next pane"),
        ("d", "Driver details"),
        ("c", "Constructor details"),
        ("o", "Circuit details"),
        ("h", "Home"),
        ("Esc", "Close / back"),
        ("q, Ctrl+C", "Quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled("  Keyboard shortcuts", styles::title_style())),
        Line::from(""),
    ];
    for (key, desc) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", key), styles::key_hint_style()),
            Span::styled(desc, styles::list_item_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press ? or Esc to close",
        styles::muted_style(),
    )));

    let area = centered_rect_fixed(44, lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_notification(frame: &mut Frame, message: &str) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), styles::notification_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", styles::muted_style()),
            Span::styled("[Enter]", styles::key_hint_style()),
            Span::styled(" to continue", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Error ")
        .title_style(styles::notification_style())
        .borders(Borders::ALL)
        .border_style(styles::notification_style());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
