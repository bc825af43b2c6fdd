//! Turns a core `Table` into a ratatui table widget.

use ratatui::{
    layout::Constraint,
    text::Span,
    widgets::{Block, Borders, Cell as CellWidget, Row, Table as TableWidget},
};

use pitlane_core::browse::{Cell, Table};

use super::styles;

fn cell_widget(cell: &Cell) -> CellWidget<'static> {
    let label = cell.label().to_string();
    if cell.is_link() {
        CellWidget::from(Span::styled(label, styles::link_style()))
    } else {
        CellWidget::from(label)
    }
}

/// Build a bordered table widget. `widths` should have one entry per column.
pub fn table_widget(
    table: &Table,
    widths: &[Constraint],
    title: String,
    focused: bool,
) -> TableWidget<'static> {
    let header = Row::new(
        table
            .headers()
            .iter()
            .map(|h| CellWidget::from(h.clone()))
            .collect::<Vec<_>>(),
    )
    .style(styles::header_style())
    .height(1);

    let rows: Vec<Row> = table
        .rows()
        .iter()
        .map(|row| {
            Row::new(row.iter().map(cell_widget).collect::<Vec<_>>())
                .style(styles::list_item_style())
        })
        .collect();

    TableWidget::new(rows, widths.iter().copied())
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        })
}
