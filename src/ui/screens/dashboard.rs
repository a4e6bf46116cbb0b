use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Breakdown + budgets
            Constraint::Length(9), // Monthly trend
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_breakdown_chart(f, middle[0], app);
    render_budget_status(f, middle[1], app);

    render_trend_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = &app.views.totals;
    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();

    render_card(
        f,
        cards[0],
        "Total Income",
        totals.income,
        theme::GREEN,
        format!("{income_count} txns"),
    );
    render_card(
        f,
        cards[1],
        "Total Expenses",
        totals.expenses,
        theme::RED,
        format!("{expense_count} txns"),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        totals.balance,
        if totals.balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        String::new(),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_breakdown_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.views.breakdown.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add expense <amount> <category>",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Expense Breakdown"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .views
        .breakdown
        .iter()
        .map(|c| {
            Bar::default()
                .value(c.total.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(&c.label(), 9)))
                .text_value(format_amount(c.total))
                .style(Style::default().fg(theme::ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Expense Breakdown"))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD))
        .label_style(theme::normal_style());

    f.render_widget(chart, area);
}

fn render_budget_status(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Budgets for {}", app.today.format("%B %Y"));
    if app.views.budget_status.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(Span::styled("No budgets set", theme::dim_style())),
            Line::from(Span::styled(
                "Use :budget <category> <amount>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(title));
        f.render_widget(msg, area);
        return;
    }

    let bar_width = (area.width as usize).saturating_sub(34).clamp(4, 20);
    let lines: Vec<Line> = app
        .views
        .budget_status
        .iter()
        .map(|line| {
            let color = theme::band_color(line.band());
            Line::from(vec![
                Span::styled(format!("{:<13}", truncate(&line.label(), 12)), theme::normal_style()),
                Span::styled(progress_bar(line.fill_ratio(), bar_width), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>4}% ", line.percent().to_string()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{}/{}", format_amount(line.spent), format_amount(line.limit)),
                    theme::dim_style(),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(panel(title)), area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.views.trend.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Monthly totals appear here once you add transactions",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Income vs Expense by Month"));
        f.render_widget(msg, area);
        return;
    }

    // Keep the most recent months that fit, two bars of width 3 plus a gap each.
    let fit = ((area.width as usize).saturating_sub(2) / 8).max(1);
    let skip = app.views.trend.len().saturating_sub(fit);

    let mut chart = BarChart::default()
        .block(panel("Income vs Expense by Month"))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);

    for month in app.views.trend.iter().skip(skip) {
        let income = Bar::default()
            .value(month.income.round().to_u64().unwrap_or(0))
            .text_value(String::new())
            .style(theme::income_style());
        let expense = Bar::default()
            .value(month.expense.round().to_u64().unwrap_or(0))
            .text_value(String::new())
            .style(theme::expense_style());
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(month.label()))
                .bars(&[income, expense]),
        );
    }

    f.render_widget(chart, area);
}
