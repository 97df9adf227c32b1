mod article_table;
mod explorer;
mod filter_panel;
mod insights;
mod popup;
mod raw_table;
mod status_bar;
mod tabs;

pub use article_table::ArticleTableWidget;
pub use explorer::ExplorerWidget;
pub use filter_panel::FilterPanelWidget;
pub use insights::InsightsWidget;
pub use popup::PopupWidget;
pub use raw_table::RawTableWidget;
pub use status_bar::StatusBarWidget;
pub use tabs::TabBarWidget;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;

/// Bordered panel, highlighted when focused
fn panel<'a>(title: impl Into<String>, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.accent } else { theme.grey0 };
    Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg0))
}

/// Guidance text in place of a view whose corpus is missing
fn render_notice(frame: &mut Frame, area: Rect, block: Block, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.info),
    )))
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Truncate a string to `max_width` terminal columns with an ellipsis
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let truncated: String = s
        .chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("Chennai floods worsen", 10), "Chennai...");
        assert_eq!(truncate_str("Müller über", 6), "Mül...");
        assert_eq!(truncate_str("東京の洪水被害", 7), "東京...");
    }
}
