use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use pitlane_core::cache::SeasonStore;
use pitlane_core::models::Season;

use crate::app::App;
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(40, Season::ALL.len() as u16 + 4, area);

    let items: Vec<ListItem> = Season::ALL
        .iter()
        .enumerate()
        .map(|(i, season)| {
            let style = if i == app.season_selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            let mut spans = vec![Span::raw(format!("  [{}] {} season", i + 1, season))];
            if app.browser.cache().has(*season) {
                spans.push(Span::styled("  cached", styles::cached_style()));
            }

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let block = Block::default()
        .title(" Select a season ")
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    state.select(Some(app.season_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_loading(frame: &mut Frame, season: Season, area: Rect) {
    let area = centered_rect_fixed(40, 3, area);

    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!("  Loading {} season...", season),
        styles::loading_style(),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::loading_style()),
    );

    frame.render_widget(paragraph, area);
}
