use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use newslens_core::corpus::EnrichedArticle;

use super::{panel, render_notice};
use crate::app::{App, ServiceReply};
use crate::theme::Theme;

/// Full view of one enriched article, with any translation or answer
pub struct ExplorerWidget;

impl ExplorerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let filtered_len = app.filtered().len();
        let title = if filtered_len == 0 {
            "Article Explorer".to_string()
        } else {
            format!("Article Explorer ({}/{})", app.selected_article + 1, filtered_len)
        };
        let block = panel(title, true, theme);

        if let Some(notice) = &app.enriched_notice {
            render_notice(frame, area, block, notice, theme);
            return;
        }
        let Some(article) = app.current_article() else {
            render_notice(frame, area, block, "No article selected. Adjust the dashboard filter.", theme);
            return;
        };

        let mut lines = article_lines(article, theme);
        if let Some(reply) = app.translation_for_current() {
            lines.extend(reply_lines(&format!("Translation ({})", reply.request), reply, theme));
        }
        if let Some(reply) = app.answer_for_current() {
            lines.extend(reply_lines(&format!("Q: {}", reply.request), reply, theme));
        }
        lines.push(Line::from(""));
        lines.push(heading("Full Text", theme));
        for paragraph in article.article.text.lines() {
            lines.push(Line::from(Span::styled(
                paragraph.to_string(),
                Style::default().fg(theme.fg0),
            )));
        }

        let paragraph = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.detail_scroll, 0));
        frame.render_widget(paragraph, area);
    }
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", label), Style::default().fg(theme.grey1)),
        Span::styled(value, Style::default().fg(theme.fg1)),
    ])
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn article_lines(article: &EnrichedArticle, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            article.title().to_string(),
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Source", article.source().to_string(), theme),
        field(
            "Published",
            article.article.published.format("%Y-%m-%d %H:%M UTC").to_string(),
            theme,
        ),
        Line::from(vec![
            Span::styled(format!("{:<11}", "Sentiment"), Style::default().fg(theme.grey1)),
            Span::styled(
                format!("{:.2}", article.sentiment),
                Style::default().fg(theme.sentiment(article.sentiment)),
            ),
        ]),
        field("Keywords", list_or_dash(&article.top_keywords), theme),
        field("Entities", list_or_dash(&article.entities), theme),
        field("Topics", article.topics.clone(), theme),
    ];
    if !article.article.authors.is_empty() {
        lines.push(field("Authors", article.article.authors.join(", "), theme));
    }
    lines.push(field("URL", article.url().to_string(), theme));
    lines.push(Line::from(""));
    lines.push(heading("Summary", theme));
    let summary = if article.summary_auto.is_empty() {
        "-".to_string()
    } else {
        article.summary_auto.clone()
    };
    lines.push(Line::from(Span::styled(summary, Style::default().fg(theme.fg0))));
    lines
}

fn reply_lines(title: &str, reply: &ServiceReply, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(""), heading(title, theme)];
    if let Some(note) = &reply.note {
        lines.push(Line::from(Span::styled(
            note.clone(),
            Style::default().fg(theme.error).add_modifier(Modifier::ITALIC),
        )));
    }
    for line in reply.text.lines() {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(theme.info),
        )));
    }
    lines
}
