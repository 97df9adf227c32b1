use std::future::Future;
use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use newslens_core::pipeline::{run_analysis, scrape_and_store};
use newslens_core::services::{QaService, TranslationService};
use newslens_core::{AppConfig, Outcome};
use newslens_tui::{
    app::{App, Mode, ServiceReply, Tab, Task},
    event::{AppEvent, EventHandler, TaskResult},
    input::{handle_key_event, Action},
    load_theme,
    widgets::{
        ArticleTableWidget, ExplorerWidget, FilterPanelWidget, InsightsWidget, PopupWidget,
        RawTableWidget, StatusBarWidget, TabBarWidget,
    },
};

/// Width of the dashboard's filter column
const FILTER_PANEL_WIDTH: u16 = 30;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Newslens"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, config: Arc<AppConfig>) -> Result<()> {
    let mut app = App::new(config.clone(), load_theme(&config.ui.theme));
    app.load_corpora();
    if app.enriched_notice.is_none() {
        app.tab = Tab::Dashboard;
    }

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let (task_tx, mut task_rx) = mpsc::unbounded_channel::<TaskResult>();

    loop {
        // Process finished background work (non-blocking)
        while let Ok(result) = task_rx.try_recv() {
            handle_task_result(&mut app, result);
        }

        terminal.draw(|frame| draw(frame, &app))?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    handle_action(&mut app, action, &task_tx);
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.tick_spinner(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    TabBarWidget::render(frame, layout[0], app);
    match app.tab {
        Tab::Raw => RawTableWidget::render(frame, layout[1], app),
        Tab::Dashboard => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(FILTER_PANEL_WIDTH), Constraint::Min(20)])
                .split(layout[1]);
            FilterPanelWidget::render(frame, columns[0], app);
            ArticleTableWidget::render(frame, columns[1], app);
        }
        Tab::Insights => InsightsWidget::render(frame, layout[1], app),
        Tab::Explorer => ExplorerWidget::render(frame, layout[1], app),
    }
    StatusBarWidget::render(frame, layout[2], app);

    match &app.mode {
        Mode::LanguagePicker(selected) => {
            PopupWidget::render_language_picker(frame, *selected, &app.theme)
        }
        Mode::Question(input) => {
            let title = app.current_article().map(|a| a.title()).unwrap_or_default();
            PopupWidget::render_question(frame, input, title, &app.theme);
        }
        Mode::Help => PopupWidget::render_help(frame, &app.theme),
        Mode::Normal => {}
    }
}

fn handle_action(app: &mut App, action: Action, tx: &mpsc::UnboundedSender<TaskResult>) {
    if action != Action::None && !app.is_busy() {
        app.clear_status();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::NextTab => app.next_tab(),
        Action::PrevTab => app.prev_tab(),
        Action::SelectTab(tab) => app.select_tab(tab),
        Action::ToggleFocus => app.toggle_focus(),
        Action::MoveDown if matches!(app.mode, Mode::LanguagePicker(_)) => app.move_picker(true),
        Action::MoveUp if matches!(app.mode, Mode::LanguagePicker(_)) => app.move_picker(false),
        Action::MoveDown => app.move_down(),
        Action::MoveUp => app.move_up(),
        Action::NextArticle => app.next_article(),
        Action::PrevArticle => app.prev_article(),
        Action::ToggleSource => app.toggle_current_source(),
        Action::ShiftMin(delta) => app.shift_min(delta),
        Action::ShiftMax(delta) => app.shift_max(delta),
        Action::ResetFilter => app.reset_filter(),
        Action::OpenExplorer => app.open_explorer(),
        Action::OpenInBrowser => open_in_browser(app),
        Action::Export(table) => app.export_corpus(table),
        Action::Scrape => spawn_scrape(app, tx),
        Action::Analyze => spawn_analysis(app, tx),
        Action::Reload => {
            app.load_corpora();
            app.set_status(format!(
                "Reloaded {} raw and {} enriched articles",
                app.raw.len(),
                app.enriched.len()
            ));
        }
        Action::StartTranslate => {
            if app.current_article().is_some() {
                app.mode = Mode::LanguagePicker(0);
            } else {
                app.set_status("No article selected to translate");
            }
        }
        Action::StartQuestion => {
            if app.current_article().is_some() {
                app.mode = Mode::Question(String::new());
            } else {
                app.set_status("No article selected to ask about");
            }
        }
        Action::Help => app.mode = Mode::Help,
        Action::Confirm => confirm(app, tx),
        Action::Cancel => app.mode = Mode::Normal,
        Action::InputChar(c) => {
            if let Mode::Question(input) = &mut app.mode {
                input.push(c);
            }
        }
        Action::Backspace => {
            if let Mode::Question(input) = &mut app.mode {
                input.pop();
            }
        }
        Action::None => {}
    }
}

fn open_in_browser(app: &mut App) {
    let url = match app.tab {
        Tab::Raw => app.raw.get(app.selected_raw).map(|a| a.url.clone()),
        _ => app.current_article().map(|a| a.url().to_string()),
    };
    let Some(url) = url else {
        return;
    };
    if let Err(e) = open::that(&url) {
        app.set_status(format!("Failed to open browser: {}", e));
    }
}

/// Submit the language picker or the question box
fn confirm(app: &mut App, tx: &mpsc::UnboundedSender<TaskResult>) {
    let language = app.picked_language();
    let mode = std::mem::replace(&mut app.mode, Mode::Normal);
    let Some(article) = app.current_article().cloned() else {
        return;
    };
    let url = article.url().to_string();
    let text = article.article.text;

    match mode {
        Mode::LanguagePicker(_) => {
            let Some(language) = language else {
                return;
            };
            if !app.start_task(Task::Translate) {
                return;
            }
            app.tab = Tab::Explorer;

            let config = app.config.clone();
            spawn_task(tx, Task::Translate, async move {
                let outcome = match TranslationService::new(&config) {
                    Ok(service) => service.translate(&text, language.code).await,
                    Err(e) => Outcome::failed(e.to_string()),
                };
                TaskResult::Translated {
                    url,
                    language: language.name.to_string(),
                    outcome,
                }
            });
        }
        Mode::Question(question) => {
            let question = question.trim().to_string();
            if question.is_empty() || !app.start_task(Task::Ask) {
                return;
            }
            app.tab = Tab::Explorer;

            let config = app.config.clone();
            spawn_task(tx, Task::Ask, async move {
                let outcome = match QaService::new(&config) {
                    Ok(service) => service.ask(&question, &text).await,
                    Err(e) => Outcome::failed(e.to_string()),
                };
                TaskResult::Answered {
                    url,
                    question,
                    outcome,
                }
            });
        }
        Mode::Normal | Mode::Help => {}
    }
}

fn spawn_scrape(app: &mut App, tx: &mpsc::UnboundedSender<TaskResult>) {
    if !app.start_task(Task::Scrape) {
        return;
    }
    let config = app.config.clone();
    spawn_task(tx, Task::Scrape, async move {
        TaskResult::Scraped(scrape_and_store(&config).await.map_err(|e| e.to_string()))
    });
}

fn spawn_analysis(app: &mut App, tx: &mpsc::UnboundedSender<TaskResult>) {
    if app.raw.is_empty() {
        app.set_status("Nothing to analyze yet. Press S to scrape first.");
        return;
    }
    if !app.start_task(Task::Analyze) {
        return;
    }
    let config = app.config.clone();
    spawn_task(tx, Task::Analyze, async move {
        TaskResult::Analyzed(run_analysis(&config).await.map_err(|e| e.to_string()))
    });
}

/// Run `work` in the background. A panic inside it is still reported as a result.
fn spawn_task<F>(tx: &mpsc::UnboundedSender<TaskResult>, task: Task, work: F)
where
    F: Future<Output = TaskResult> + Send + 'static,
{
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = match tokio::spawn(work).await {
            Ok(result) => result,
            Err(e) => TaskResult::Crashed {
                task,
                reason: e.to_string(),
            },
        };
        let _ = tx.send(result);
    });
}

fn handle_task_result(app: &mut App, result: TaskResult) {
    app.finish_task();

    match result {
        TaskResult::Scraped(Ok(report)) => {
            app.load_corpora();
            let failed = if report.failures.is_empty() {
                String::new()
            } else {
                format!(", {} sources failed", report.failures.len())
            };
            let fallbacks: usize = report.sources.iter().map(|s| s.fallbacks).sum();
            match report.saved_to {
                Some(_) => app.set_status(format!(
                    "Scraped {} articles ({} from feed summaries{}). Press A to analyze.",
                    report.articles, fallbacks, failed
                )),
                None => app.set_status(format!("No articles scraped{}", failed)),
            }
        }
        TaskResult::Scraped(Err(e)) => app.set_status(format!("Scrape failed: {}", e)),
        TaskResult::Analyzed(Ok(report)) => {
            app.load_corpora();
            app.tab = Tab::Dashboard;
            app.set_status(report.to_string());
        }
        TaskResult::Analyzed(Err(e)) => app.set_status(format!("Analysis failed: {}", e)),
        TaskResult::Translated {
            url,
            language,
            outcome,
        } => {
            let reply = ServiceReply::from_outcome(language, url, outcome);
            app.set_status(if reply.is_error() {
                "Translation failed"
            } else {
                "Translation ready"
            });
            app.translation = Some(reply);
        }
        TaskResult::Answered {
            url,
            question,
            outcome,
        } => {
            let reply = ServiceReply::from_outcome(question, url, outcome);
            app.set_status(if reply.is_error() {
                "Could not answer the question"
            } else {
                "Answer ready"
            });
            app.answer = Some(reply);
        }
        TaskResult::Crashed { task, reason } => {
            tracing::error!("{} stopped unexpectedly: {}", task.label(), reason);
            app.set_status(format!("{} stopped unexpectedly", task.label()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newslens_tui::Theme;

    async fn failing_analysis() -> TaskResult {
        panic!("analysis blew up")
    }

    #[tokio::test]
    async fn test_panicking_task_releases_busy_state() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(app.start_task(Task::Analyze));

        spawn_task(&tx, Task::Analyze, failing_analysis());
        let result = rx.recv().await.unwrap();
        assert!(matches!(
            result,
            TaskResult::Crashed {
                task: Task::Analyze,
                ..
            }
        ));

        handle_task_result(&mut app, result);
        assert!(!app.is_busy());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Running NLP analysis stopped unexpectedly")
        );
        assert!(app.start_task(Task::Scrape));
    }
}
