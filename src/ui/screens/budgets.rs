use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::analytics::BudgetLine;
use crate::models::EXPENSE_CATEGORIES;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar};

/// Every expense category, budgeted or not, with this month's spending.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Category", "Limit", "Spent", "Remaining", "Progress"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = EXPENSE_CATEGORIES
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cat)| {
            let spent = app
                .month_spend
                .get(cat.value)
                .copied()
                .unwrap_or(Decimal::ZERO);

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let Some(limit) = app.budgets.limit_for(cat.value) else {
                return Row::new(vec![
                    Cell::from(cat.label),
                    Cell::from(Span::styled("—", theme::dim_style())),
                    Cell::from(format_amount(spent)),
                    Cell::from(""),
                    Cell::from(Span::styled("unbudgeted", theme::dim_style())),
                ])
                .style(style);
            };

            let line = BudgetLine {
                category: cat.value.to_string(),
                spent,
                limit,
            };
            let color = theme::band_color(line.band());

            Row::new(vec![
                Cell::from(cat.label),
                Cell::from(format_amount(limit)),
                Cell::from(format_amount(spent)),
                Cell::from(Span::styled(
                    format_amount(limit - spent),
                    Style::default().fg(color),
                )),
                Cell::from(Span::styled(
                    format!("{} {}%", progress_bar(line.fill_ratio(), 16), line.percent()),
                    Style::default().fg(color),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(24),
    ];

    let budgeted = app.budgets.active().count();
    let table = Table::new(rows, widths).header(header).block(panel(format!(
        "Budgets for {} ({budgeted} set)",
        app.today.format("%B %Y")
    )));

    f.render_widget(table, area);
}
