use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::app::Result;
use crate::domain::Hook;
use crate::integrations::ScrapeBatch;
use crate::workflow::GenerationTicket;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Results posted back by collaborator tasks.
pub enum TaskEvent {
    Scraped(Result<ScrapeBatch>),
    HooksGenerated {
        ticket: GenerationTicket,
        item_id: String,
        outcome: Result<Vec<Hook>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    SwitchTab,
    Search,
    CycleFilter,
    CycleSort,
    ToggleSave,
    OpenHooks,
    Generate,
    CopyHook,
    Close,
    Import,
    None,
}
