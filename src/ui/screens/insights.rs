use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = panel("AI Insights");

    let lines = if app.insights.is_pending() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Analyzing your transactions...",
                Style::default().fg(theme::YELLOW),
            )),
            Line::from(""),
            Line::from(Span::styled(
                ":cancel-insights to stop",
                theme::dim_style(),
            )),
        ]
    } else if let Some(text) = &app.insight_text {
        markdown_lines(text)
    } else if !app.insights.is_configured() {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "AI insights are not configured",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Set FINTRACK_API_KEY or API_KEY, or add api_key under [ai] in config.toml",
                theme::dim_style(),
            )),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Type :insights to get advice on your spending",
                theme::dim_style(),
            )),
        ]
    };

    let centered = app.insight_text.is_none() || app.insights.is_pending();
    let mut paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    if centered {
        paragraph = paragraph.centered();
    } else {
        paragraph = paragraph.scroll((app.insight_scroll, 0));
    }

    f.render_widget(paragraph, area);
}

/// Light markdown styling: `#` headings in bold accent, `-`/`*` bullets as
/// `•`, `**bold**` runs emphasised. Everything else is shown as is.
pub(crate) fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|raw| {
            let line = raw.trim_end();
            let stripped = line.trim_start_matches('#');
            if stripped.len() != line.len() {
                return Line::from(Span::styled(
                    stripped.trim().to_string(),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ));
            }

            let indent = line.len() - line.trim_start().len();
            let body = line.trim_start();
            let mut spans = Vec::new();
            let rest = if let Some(item) = body
                .strip_prefix("- ")
                .or_else(|| body.strip_prefix("* "))
            {
                spans.push(Span::raw(format!("{}• ", " ".repeat(indent))));
                item
            } else {
                if indent > 0 {
                    spans.push(Span::raw(" ".repeat(indent)));
                }
                body
            };
            spans.extend(emphasis_spans(rest));
            Line::from(spans)
        })
        .collect()
}

fn emphasis_spans(text: &str) -> Vec<Span<'static>> {
    let bold = theme::normal_style().add_modifier(Modifier::BOLD);
    text.split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            // Odd segments sit between a pair of markers.
            if i % 2 == 1 {
                Span::styled(part.to_string(), bold)
            } else {
                Span::styled(part.to_string(), theme::normal_style())
            }
        })
        .collect()
}
