use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::panel;
use crate::models::display_label;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_signed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a or type :add expense 12.50 food to record one",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(panel("Transactions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Type", "Category", "Notes", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", txn.date)),
                Cell::from(txn.kind.label()),
                Cell::from(display_label(&txn.category)),
                Cell::from(truncate(&txn.notes, 40)),
                Cell::from(Span::styled(format_signed(txn), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(format!("Transactions ({})", app.transactions.len())));

    f.render_widget(table, area);
}
