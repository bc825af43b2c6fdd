use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::styles;
use crate::ui::table::table_widget;

const QUALIFYING_WIDTHS: [Constraint; 6] = [
    Constraint::Length(8),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(10),
    Constraint::Length(10),
    Constraint::Length(10),
];

const RESULTS_WIDTHS: [Constraint; 5] = [
    Constraint::Length(8),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(6),
    Constraint::Length(7),
];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (Some(title), Some(qualifying), Some(results)) = (
        app.browser.detail_title(),
        app.browser.qualifying_table(),
        app.browser.results_table(),
    ) else {
        render_placeholder(frame, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    let heading = Line::from(vec![
        Span::styled(format!(" {}", title), styles::title_style()),
        Span::styled("  [o] circuit", styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let q_focused = matches!(app.focus, Focus::Qualifying);
    let widget = table_widget(
        &qualifying,
        &QUALIFYING_WIDTHS,
        format!(" Qualifying ({}) ", qualifying.len()),
        q_focused,
    );
    let mut state = TableState::default();
    state.select(q_focused.then_some(app.qualifying_selection));
    frame.render_stateful_widget(widget, chunks[1], &mut state);

    let r_focused = matches!(app.focus, Focus::Results);
    let widget = table_widget(
        &results,
        &RESULTS_WIDTHS,
        format!(" Race Results ({}) ", results.len()),
        r_focused,
    );
    let mut state = TableState::default();
    state.select(r_focused.then_some(app.results_selection));
    frame.render_stateful_widget(widget, chunks[2], &mut state);
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" No Race Selected ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Select a race from the list and press Enter",
        styles::muted_style(),
    )))
    .block(block);

    frame.render_widget(paragraph, area);
}
