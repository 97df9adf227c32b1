use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use newslens_core::corpus::Table;

use crate::app::{App, Focus, Mode, Tab};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(Tab),
    ToggleFocus,
    MoveUp,
    MoveDown,
    NextArticle,
    PrevArticle,
    ToggleSource,
    ShiftMin(f64),
    ShiftMax(f64),
    ResetFilter,
    OpenExplorer,
    OpenInBrowser,
    Export(Table),
    Scrape,
    Analyze,
    Reload,
    StartTranslate,
    StartQuestion,
    Help,
    // Popup modes
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match &app.mode {
        Mode::Question(_) => return handle_input_mode(key),
        Mode::LanguagePicker(_) => return handle_picker_mode(key),
        Mode::Help => return Action::Cancel,
        Mode::Normal => {}
    }

    let step = crate::app::RANGE_STEP;

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Tab, _) => Action::NextTab,
        (KeyCode::BackTab, _) => Action::PrevTab,
        (KeyCode::Char('1'), _) => Action::SelectTab(Tab::Raw),
        (KeyCode::Char('2'), _) => Action::SelectTab(Tab::Dashboard),
        (KeyCode::Char('3'), _) => Action::SelectTab(Tab::Insights),
        (KeyCode::Char('4'), _) => Action::SelectTab(Tab::Explorer),

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::NONE) if app.tab == Tab::Explorer => Action::NextArticle,
        (KeyCode::Char('p'), KeyModifiers::NONE) if app.tab == Tab::Explorer => Action::PrevArticle,

        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Char('l'), KeyModifiers::NONE)
        | (KeyCode::Left, _) | (KeyCode::Right, _)
            if app.tab == Tab::Dashboard =>
        {
            Action::ToggleFocus
        }
        (KeyCode::Char(' '), _) if app.tab == Tab::Dashboard && app.focus == Focus::Sources => {
            Action::ToggleSource
        }

        // Sentiment range
        (KeyCode::Char('['), _) => Action::ShiftMin(-step),
        (KeyCode::Char(']'), _) => Action::ShiftMin(step),
        (KeyCode::Char('{'), _) => Action::ShiftMax(-step),
        (KeyCode::Char('}'), _) => Action::ShiftMax(step),
        (KeyCode::Char('0'), _) => Action::ResetFilter,

        (KeyCode::Enter, _) if app.tab == Tab::Dashboard => Action::OpenExplorer,
        (KeyCode::Char('b'), KeyModifiers::NONE) => Action::OpenInBrowser,

        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::Export(Table::Raw),
        (KeyCode::Char('E'), _) => Action::Export(Table::Enriched),
        (KeyCode::Char('S'), _) => Action::Scrape,
        (KeyCode::Char('A'), _) => Action::Analyze,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reload,
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::StartTranslate,
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::StartQuestion,
        (KeyCode::Char('?'), _) => Action::Help,

        _ => Action::None,
    }
}

/// Typing a question
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Choosing a translation language
fn handle_picker_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc | KeyCode::Char('q') => Action::Cancel,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::theme::Theme;
    use newslens_core::AppConfig;

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_keys() {
        let app = app();
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT), &app),
            Action::Scrape
        );
        assert_eq!(handle_key_event(press(KeyCode::Char('3')), &app), Action::SelectTab(Tab::Insights));
        assert_eq!(handle_key_event(press(KeyCode::Char(']')), &app), Action::ShiftMin(0.05));
        assert_eq!(handle_key_event(press(KeyCode::Char('e')), &app), Action::Export(Table::Raw));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('E'), KeyModifiers::SHIFT), &app),
            Action::Export(Table::Enriched)
        );
    }

    #[test]
    fn test_dashboard_keys_depend_on_focus() {
        let mut app = app();
        app.tab = Tab::Dashboard;
        app.focus = Focus::Articles;
        assert_eq!(handle_key_event(press(KeyCode::Char(' ')), &app), Action::None);
        assert_eq!(handle_key_event(press(KeyCode::Enter), &app), Action::OpenExplorer);

        app.focus = Focus::Sources;
        assert_eq!(handle_key_event(press(KeyCode::Char(' ')), &app), Action::ToggleSource);
    }

    #[test]
    fn test_question_mode_captures_text() {
        let mut app = app();
        app.mode = Mode::Question(String::new());
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &app), Action::InputChar('q'));
        assert_eq!(handle_key_event(press(KeyCode::Enter), &app), Action::Confirm);
        assert_eq!(handle_key_event(press(KeyCode::Esc), &app), Action::Cancel);
    }

    #[test]
    fn test_picker_mode() {
        let mut app = app();
        app.mode = Mode::LanguagePicker(0);
        assert_eq!(handle_key_event(press(KeyCode::Char('j')), &app), Action::MoveDown);
        assert_eq!(handle_key_event(press(KeyCode::Char('q')), &app), Action::Cancel);
    }
}
