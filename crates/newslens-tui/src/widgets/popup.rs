use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use newslens_core::services::LANGUAGES;

use super::truncate_str;
use crate::theme::Theme;

const HELP: &[(&str, &str)] = &[
    ("Tab / S-Tab / 1-4", "switch view"),
    ("j / k", "move or scroll"),
    ("h / l", "switch dashboard panel"),
    ("Space", "toggle source"),
    ("[ / ]", "lower / raise minimum sentiment"),
    ("{ / }", "lower / raise maximum sentiment"),
    ("0", "reset filter"),
    ("Enter", "open article in explorer"),
    ("n / p", "next / previous article"),
    ("S", "scrape feeds"),
    ("A", "run NLP analysis"),
    ("e / E", "save raw / enriched CSV to exports"),
    ("r", "reload corpora from disk"),
    ("t", "translate article"),
    ("a", "ask a question about the article"),
    ("b", "open article in browser"),
    ("q", "quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    fn frame_popup<'a>(frame: &mut Frame, width: u16, height: u16, title: &str, theme: &Theme) -> (Rect, Block<'a>) {
        let area = frame.area();
        let popup_area = centered_rect(
            width.min(area.width.saturating_sub(4)),
            height.min(area.height.saturating_sub(2)),
            area,
        );
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        (popup_area, block)
    }

    /// Target language list for translation
    pub fn render_language_picker(frame: &mut Frame, selected: usize, theme: &Theme) {
        let height = LANGUAGES.len() as u16 + 2;
        let (area, block) = Self::frame_popup(frame, 36, height, "Translate to", theme);

        let items: Vec<ListItem> = LANGUAGES
            .iter()
            .map(|language| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<6}", language.code), Style::default().fg(theme.grey1)),
                    Span::styled(language.name, Style::default().fg(theme.fg0)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Question input box
    pub fn render_question(frame: &mut Frame, input: &str, article_title: &str, theme: &Theme) {
        let (area, block) = Self::frame_popup(frame, 70, 7, "Ask about this article", theme);
        let width = area.width.saturating_sub(4) as usize;

        let lines = vec![
            Line::from(Span::styled(
                truncate_str(article_title, width),
                Style::default().fg(theme.grey2).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("> ", Style::default().fg(theme.accent)),
                Span::styled(input.to_string(), Style::default().fg(theme.fg0)),
                Span::styled("_", Style::default().fg(theme.accent).add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Line::from(Span::styled(
                "Enter: ask  Esc: cancel",
                Style::default().fg(theme.grey0),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let height = HELP.len() as u16 + 2;
        let (area, block) = Self::frame_popup(frame, 56, height, "Keys", theme);

        let lines: Vec<Line> = HELP
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<20}", keys),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*action, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
