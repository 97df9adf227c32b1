use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame,
};

use crate::app::{App, Tab};

pub struct TabBarWidget;

impl TabBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(app.tab.index())
            .style(Style::default().fg(theme.grey1).bg(theme.bg1))
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|");

        frame.render_widget(tabs, area);
    }
}
