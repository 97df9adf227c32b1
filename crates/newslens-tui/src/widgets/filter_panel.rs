use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use newslens_core::dashboard::{SENTIMENT_MAX, SENTIMENT_MIN};

use super::panel;
use crate::app::{App, Focus};
use crate::theme::Theme;

/// Source multi-select and sentiment range
pub struct FilterPanelWidget;

impl FilterPanelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(5)])
            .split(area);

        Self::render_sources(frame, chunks[0], app);
        Self::render_range(frame, chunks[1], app);
    }

    fn render_sources(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let focused = app.focus == Focus::Sources;
        let block = panel("Sources", focused, theme);

        let items: Vec<ListItem> = app
            .sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let checked = app.filter.is_selected(source);
                let marker = if checked { "[x] " } else { "[ ] " };
                let style = if focused && i == app.source_cursor {
                    Style::default().fg(theme.fg0).bg(theme.selection)
                } else if checked {
                    Style::default().fg(theme.fg0)
                } else {
                    Style::default().fg(theme.grey1)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(source.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        let mut state = ListState::default();
        if focused {
            state.select(Some(app.source_cursor));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_range(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = panel("Sentiment", false, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (min, max) = app.filter.range();
        let width = inner.width as usize;
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{:+.2}", min), Style::default().fg(theme.sentiment(min))),
                Span::styled(" to ", Style::default().fg(theme.grey1)),
                Span::styled(format!("{:+.2}", max), Style::default().fg(theme.sentiment(max))),
            ]),
            range_bar(min, max, width, theme),
            Line::from(Span::styled(
                "[ ] min  { } max  0 reset",
                Style::default().fg(theme.grey0).add_modifier(Modifier::ITALIC),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// Cell index of `value` on a bar `width` cells wide spanning [-1, 1]
fn position(value: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let ratio = (value - SENTIMENT_MIN) / (SENTIMENT_MAX - SENTIMENT_MIN);
    ((ratio * (width - 1) as f64).round() as usize).min(width - 1)
}

fn range_bar(min: f64, max: f64, width: usize, theme: &Theme) -> Line<'static> {
    let (lo, hi) = (position(min, width), position(max, width));
    let spans: Vec<Span> = (0..width)
        .map(|i| {
            if (lo..=hi).contains(&i) {
                Span::styled("━", Style::default().fg(theme.accent))
            } else {
                Span::styled("─", Style::default().fg(theme.grey0))
            }
        })
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_maps_range_onto_bar() {
        assert_eq!(position(-1.0, 21), 0);
        assert_eq!(position(0.0, 21), 10);
        assert_eq!(position(1.0, 21), 20);
        assert_eq!(position(0.5, 0), 0);
    }
}
