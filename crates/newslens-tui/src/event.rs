use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use newslens_core::pipeline::{AnalysisReport, ScrapeReport};
use newslens_core::Outcome;

use crate::app::Task;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

/// Result of a background task, delivered back to the UI loop
#[derive(Debug)]
pub enum TaskResult {
    Scraped(std::result::Result<ScrapeReport, String>),
    Analyzed(std::result::Result<AnalysisReport, String>),
    Translated {
        url: String,
        language: String,
        outcome: Outcome<String>,
    },
    Answered {
        url: String,
        question: String,
        outcome: Outcome<String>,
    },
    /// The task panicked before it could report back
    Crashed { task: Task, reason: String },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    // crossterm reports release events on some platforms
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}
