use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Mode, Tab};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal => "NORMAL",
            Mode::LanguagePicker(_) => "TRANSLATE",
            Mode::Question(_) => "ASK",
            Mode::Help => "HELP",
        };

        let status_text = match (&app.busy, &app.status_message) {
            (Some(task), _) => format!(" {} {}...", app.spinner(), task.label()),
            (None, Some(msg)) => format!(" {}", msg),
            (None, None) => {
                let (min, max) = app.filter.range();
                format!(
                    " {} | Raw: {} | Enriched: {} | Shown: {} | Sentiment {:+.2}..{:+.2}",
                    mode_str,
                    app.raw.len(),
                    app.enriched.len(),
                    app.filtered().len(),
                    min,
                    max
                )
            }
        };

        let help_hint = if app.is_input_mode() {
            " Enter:ask Esc:cancel "
        } else {
            match app.tab {
                Tab::Dashboard => " S:scrape A:analyze h/l:panel space:toggle Enter:open ?:help ",
                Tab::Explorer => " t:translate a:ask n/p:article b:browser ?:help ",
                _ => " S:scrape A:analyze Tab:view q:quit ?:help ",
            }
        };
        let used = status_text.chars().count() + help_hint.chars().count();
        let padding = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
