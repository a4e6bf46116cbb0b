pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod insights;
pub(crate) mod transactions;

use ratatui::{
    text::Span,
    widgets::{Block, Borders},
};

use crate::ui::theme;

/// Bordered panel with a dim bold title, shared by every screen.
pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(format!(" {} ", title.into()), theme::title_style()))
}
