//! Circuit, driver and constructor detail dialogs.

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use pitlane_core::browse::Dialog;
use pitlane_core::utils::truncate_string;

use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

const DIALOG_WIDTH: u16 = 60;

pub fn render(frame: &mut Frame, dialog: &Dialog) {
    let (title, fields) = match dialog {
        Dialog::Circuit(race) => {
            let circuit = race.circuit.clone().unwrap_or_default();
            (
                race.name.clone(),
                vec![
                    ("Circuit", circuit.name.clone()),
                    ("Location", circuit.place()),
                    ("Date", race.display_date()),
                    ("Round", Some(race.round.to_string())),
                    ("More", race.url.clone().or(circuit.url)),
                ],
            )
        }
        Dialog::Driver(driver) => (
            driver.full_name(),
            vec![
                ("Code", driver.code.clone()),
                ("Nationality", driver.nationality.clone()),
                ("More", driver.url.clone()),
            ],
        ),
        Dialog::Constructor(constructor) => (
            constructor.name.clone().unwrap_or_default(),
            vec![
                ("Nationality", constructor.nationality.clone()),
                ("More", constructor.url.clone()),
            ],
        ),
    };

    let mut lines = vec![Line::from("")];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", format!("{}:", label)), styles::muted_style()),
                Span::raw(value),
            ]));
        }
    }
    if lines.len() == 1 {
        lines.push(Line::from(Span::styled(
            "  No further details available",
            styles::muted_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  [Esc]", styles::key_hint_style()),
        Span::styled(" Close", styles::list_item_style()),
    ]));

    let area = centered_rect_fixed(DIALOG_WIDTH, lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", truncate_string(&title, DIALOG_WIDTH as usize - 6)))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
