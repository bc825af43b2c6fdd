use ratatui::{
    layout::{Constraint, Rect},
    widgets::TableState,
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::table::table_widget;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(table) = app.browser.races_table() else {
        return;
    };

    let focused = matches!(app.focus, Focus::Races);
    let season = app
        .browser
        .selected_season()
        .map(|s| s.to_string())
        .unwrap_or_default();
    let title = format!(" {} Races ({}) ", season, table.len());

    let widths = [Constraint::Length(7), Constraint::Fill(1)];
    let widget = table_widget(&table, &widths, title, focused);

    let mut state = TableState::default();
    state.select(Some(app.race_selection));

    frame.render_stateful_widget(widget, area, &mut state);
}
