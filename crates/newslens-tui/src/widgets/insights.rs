use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use newslens_core::dashboard::{
    average_sentiment_by_topic, sentiment_topic_matrix, top_entities, word_frequencies,
};

use super::{panel, render_notice, truncate_str};
use crate::app::App;
use crate::theme::Theme;

const TOP_ENTITIES: usize = 10;
const CLOUD_WORDS: usize = 60;
const TOPIC_LABEL_WIDTH: usize = 28;

/// Corpus-wide charts: entity counts, sentiment by topic, sentiment/topic
/// heatmap and a word cloud.
///
/// Entity counts and the word cloud cover the whole enriched corpus; the
/// sentiment views follow the dashboard filter.
pub struct InsightsWidget;

impl InsightsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if let Some(notice) = &app.enriched_notice {
            render_notice(frame, area, panel("Insights", true, &app.theme), notice, &app.theme);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        Self::render_entities(frame, top[0], app);
        Self::render_topic_sentiment(frame, top[1], app);
        Self::render_heatmap(frame, bottom[0], app);
        Self::render_word_cloud(frame, bottom[1], app);
    }

    fn render_entities(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let counts = top_entities(&app.enriched, TOP_ENTITIES);
        let block = panel("Top Entities", false, theme);
        if counts.is_empty() {
            render_notice(frame, area, block, "No entities found.", theme);
            return;
        }

        let bars: Vec<Bar> = counts
            .iter()
            .map(|(name, count)| {
                Bar::default()
                    .value(*count as u64)
                    .label(Line::from(truncate_str(name, 18)))
                    .text_value(count.to_string())
                    .style(Style::default().fg(theme.blue))
                    .value_style(Style::default().fg(theme.bg0).bg(theme.blue))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .label_style(Style::default().fg(theme.fg0))
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn render_topic_sentiment(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let filtered = app.filtered();
        let averages = average_sentiment_by_topic(filtered.iter().copied());
        let block = panel("Average Sentiment by Topic", false, theme);
        if averages.is_empty() {
            render_notice(frame, area, block, "No articles match the current filter.", theme);
            return;
        }

        let bar_width = (area.width as usize).saturating_sub(TOPIC_LABEL_WIDTH + 12) / 2;
        let lines: Vec<Line> = averages
            .iter()
            .map(|(topic, score)| sentiment_line(topic, *score, bar_width, theme))
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_heatmap(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let filtered = app.filtered();
        let matrix = sentiment_topic_matrix(filtered.iter().copied());
        let block = panel("Sentiment x Topic", false, theme);
        if matrix.is_empty() {
            render_notice(frame, area, block, "No articles match the current filter.", theme);
            return;
        }

        let max = matrix.max_count();
        let mut header = vec![Cell::from("Topic")];
        header.extend(matrix.sentiments.iter().map(|s| Cell::from(format!("{:+.2}", s))));

        let rows = matrix.topics.iter().zip(&matrix.counts).map(|(topic, counts)| {
            let mut cells = vec![Cell::from(truncate_str(topic, TOPIC_LABEL_WIDTH))
                .style(Style::default().fg(theme.fg0))];
            cells.extend(counts.iter().map(|&count| {
                let text = if count == 0 { String::new() } else { count.to_string() };
                Cell::from(text).style(Style::default().fg(theme.bg0).bg(theme.heat(count, max)))
            }));
            Row::new(cells)
        });

        let mut widths = vec![Constraint::Length(TOPIC_LABEL_WIDTH as u16)];
        widths.extend(matrix.sentiments.iter().map(|_| Constraint::Length(6)));

        let table = Table::new(rows, widths)
            .header(
                Row::new(header)
                    .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            )
            .column_spacing(1)
            .block(block);
        frame.render_widget(table, area);
    }

    fn render_word_cloud(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let words = word_frequencies(&app.enriched, CLOUD_WORDS);
        let block = panel("Word Cloud", false, theme);
        let Some(&(_, top)) = words.first() else {
            render_notice(frame, area, block, "No article text to count.", theme);
            return;
        };

        let mut spans = Vec::with_capacity(words.len() * 2);
        for (word, count) in &words {
            spans.push(Span::styled(word.clone(), cloud_style(*count, top, theme)));
            spans.push(Span::raw("  "));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// `topic  +0.42  ████` with the bar extending left of the midpoint for
/// negative scores
fn sentiment_line(topic: &str, score: f64, half_width: usize, theme: &Theme) -> Line<'static> {
    let filled = ((score.abs() * half_width as f64).round() as usize).min(half_width);
    let (left, right) = if score < 0.0 {
        (
            format!("{}{}", " ".repeat(half_width - filled), "█".repeat(filled)),
            " ".repeat(half_width),
        )
    } else {
        (" ".repeat(half_width), "█".repeat(filled))
    };
    let color = theme.sentiment(score);

    Line::from(vec![
        Span::styled(
            format!("{:<width$}", truncate_str(topic, TOPIC_LABEL_WIDTH), width = TOPIC_LABEL_WIDTH),
            Style::default().fg(theme.fg0),
        ),
        Span::styled(format!(" {:+.2} ", score), Style::default().fg(color)),
        Span::styled(left, Style::default().fg(color)),
        Span::styled("│", Style::default().fg(theme.grey0)),
        Span::styled(right, Style::default().fg(color)),
    ])
}

fn cloud_style(count: usize, top: usize, theme: &Theme) -> Style {
    let ratio = count as f64 / top.max(1) as f64;
    if ratio > 0.66 {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else if ratio > 0.33 {
        Style::default().fg(theme.fg1)
    } else {
        Style::default().fg(theme.grey1)
    }
}
