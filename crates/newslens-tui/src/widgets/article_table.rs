use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::{panel, render_notice, truncate_str};
use crate::app::{App, Focus};

/// Filtered enriched rows: title, source, sentiment, published
pub struct ArticleTableWidget;

impl ArticleTableWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let filtered = app.filtered();
        let title = format!("Filtered Articles ({}/{})", filtered.len(), app.enriched.len());
        let block = panel(title, app.focus == Focus::Articles, theme);

        if let Some(notice) = &app.enriched_notice {
            render_notice(frame, area, block, notice, theme);
            return;
        }
        if filtered.is_empty() {
            render_notice(frame, area, block, "No articles match the current filter.", theme);
            return;
        }

        let header = Row::new(["Title", "Source", "Sentiment", "Published"])
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));

        let rows = filtered.iter().map(|article| {
            Row::new(vec![
                Cell::from(truncate_str(article.title(), 90)).style(Style::default().fg(theme.fg0)),
                Cell::from(article.source().to_string()).style(Style::default().fg(theme.grey2)),
                Cell::from(format!("{:+.2}", article.sentiment))
                    .style(Style::default().fg(theme.sentiment(article.sentiment))),
                Cell::from(article.article.published.format("%Y-%m-%d %H:%M").to_string())
                    .style(Style::default().fg(theme.grey1)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Fill(1),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(17),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(theme.selection).add_modifier(Modifier::BOLD));

        let mut state = TableState::default().with_selected(Some(app.selected_article));
        frame.render_stateful_widget(table, area, &mut state);
    }
}
