use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::{panel, render_notice, truncate_str};
use crate::app::App;

/// Preview of the scraped corpus: title, source, published, url
pub struct RawTableWidget;

impl RawTableWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = panel(format!("Raw Articles ({})", app.raw.len()), true, theme);

        if let Some(notice) = &app.raw_notice {
            render_notice(frame, area, block, notice, theme);
            return;
        }

        let header = Row::new(["Title", "Source", "Published", "URL"])
            .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));

        let rows = app.raw.iter().map(|article| {
            Row::new(vec![
                Cell::from(truncate_str(&article.title, 80)),
                Cell::from(article.source.clone()),
                Cell::from(article.published.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(article.url.clone()).style(Style::default().fg(theme.grey1)),
            ])
            .style(Style::default().fg(theme.fg0))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(45),
                Constraint::Length(14),
                Constraint::Length(17),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(theme.selection));

        let mut state = TableState::default().with_selected(Some(app.selected_raw));
        frame.render_stateful_widget(table, area, &mut state);
    }
}
