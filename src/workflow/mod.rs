//! Hook generation modal.
//!
//! ```text
//! Closed ──open──▶ Open/Idle ──start_generation──▶ Open/Generating
//!    ▲                 ▲  │                               │
//!    └─────close───────┘  └───────◀──finish_generation────┘
//! ```
//!
//! The workflow only owns what the modal displays. Writing generated hooks
//! back into the store is the caller's job (see
//! [`Dashboard::complete_generation`](crate::app::Dashboard::complete_generation)),
//! because that write must happen even if the modal was closed meanwhile.

mod clipboard;
pub mod transient;

pub use clipboard::{Clipboard, TerminalClipboard};
pub use transient::Transient;

use std::time::Instant;

use tracing::{debug, warn};

use crate::app::{HooklineError, Result};
use crate::domain::{ContentItem, Hook};
use transient::COPY_CONFIRMATION;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Hook modal is not open")]
    NotOpen,

    #[error("Hook generation already in progress")]
    GenerationInFlight,

    #[error("Hook not found: {0}")]
    HookNotFound(String),
}

/// Identifies one generation request so a late result can be matched to
/// the modal session that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Generating(GenerationTicket),
}

#[derive(Debug, Clone)]
struct OpenModal {
    item: ContentItem,
    phase: Phase,
    results: Vec<Hook>,
    selected: usize,
}

#[derive(Debug)]
pub struct HookWorkflow {
    modal: Option<OpenModal>,
    next_ticket: u64,
    copied: Transient<String>,
}

impl HookWorkflow {
    pub fn new() -> Self {
        Self {
            modal: None,
            next_ticket: 0,
            copied: Transient::new(COPY_CONFIRMATION),
        }
    }

    /// Open the modal for `item`, showing any hooks it already has.
    pub fn open(&mut self, item: &ContentItem) -> std::result::Result<(), WorkflowError> {
        if self.is_generating() {
            return Err(WorkflowError::GenerationInFlight);
        }

        self.copied.clear();
        self.modal = Some(OpenModal {
            item: item.clone(),
            phase: Phase::Idle,
            results: item.hooks.clone(),
            selected: 0,
        });
        Ok(())
    }

    pub fn close(&mut self) {
        if let Some(modal) = self.modal.take() {
            debug!("Closed hook modal for {}", modal.item.id);
        }
        self.copied.clear();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn is_generating(&self) -> bool {
        matches!(
            self.modal.as_ref().map(|m| m.phase),
            Some(Phase::Generating(_))
        )
    }

    pub fn item(&self) -> Option<&ContentItem> {
        self.modal.as_ref().map(|m| &m.item)
    }

    pub fn results(&self) -> &[Hook] {
        self.modal.as_ref().map(|m| m.results.as_slice()).unwrap_or(&[])
    }

    pub fn selected_index(&self) -> usize {
        self.modal.as_ref().map(|m| m.selected).unwrap_or(0)
    }

    pub fn selected_hook(&self) -> Option<&Hook> {
        let modal = self.modal.as_ref()?;
        modal.results.get(modal.selected)
    }

    pub fn select_next(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            if modal.selected + 1 < modal.results.len() {
                modal.selected += 1;
            }
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(modal) = self.modal.as_mut() {
            modal.selected = modal.selected.saturating_sub(1);
        }
    }

    /// Move from Idle to Generating. Returns the ticket and the id of the
    /// item to generate for.
    pub fn start_generation(
        &mut self,
    ) -> std::result::Result<(GenerationTicket, String), WorkflowError> {
        let modal = self.modal.as_mut().ok_or(WorkflowError::NotOpen)?;
        if let Phase::Generating(_) = modal.phase {
            return Err(WorkflowError::GenerationInFlight);
        }

        let ticket = GenerationTicket(self.next_ticket);
        self.next_ticket += 1;
        modal.phase = Phase::Generating(ticket);
        Ok((ticket, modal.item.id.clone()))
    }

    /// Apply a generation outcome. On failure the previous results stay.
    ///
    /// Returns false if the ticket no longer matches the open modal, in which
    /// case nothing changes.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: std::result::Result<&[Hook], &HooklineError>,
    ) -> bool {
        let Some(modal) = self.modal.as_mut() else {
            return false;
        };
        if modal.phase != Phase::Generating(ticket) {
            debug!("Ignoring stale generation result {:?}", ticket);
            return false;
        }

        modal.phase = Phase::Idle;
        match outcome {
            Ok(hooks) => {
                modal.results = hooks.to_vec();
                modal.selected = 0;
            }
            Err(e) => {
                warn!("Failed to generate hooks for {}: {}", modal.item.id, e);
            }
        }
        true
    }

    /// Copy a displayed hook's text and flag it as copied for a moment.
    pub fn copy(&mut self, hook_id: &str, clipboard: &dyn Clipboard, now: Instant) -> Result<()> {
        let modal = self.modal.as_ref().ok_or(WorkflowError::NotOpen)?;
        let hook = modal
            .results
            .iter()
            .find(|h| h.id == hook_id)
            .ok_or_else(|| WorkflowError::HookNotFound(hook_id.to_string()))?;

        clipboard.copy(&hook.text)?;
        self.copied.set(hook.id.clone(), now);
        Ok(())
    }

    pub fn copied_hook(&self) -> Option<&str> {
        self.copied.get().map(String::as_str)
    }

    pub fn expire(&mut self, now: Instant) {
        self.copied.expire(now);
    }
}

impl Default for HookWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HookType;
    use crate::integrations::mock::{canned_hooks, seed_items};
    use chrono::Utc;
    use std::cell::RefCell;
    use std::time::Duration;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: RefCell<Option<String>>,
    }

    impl Clipboard for MemoryClipboard {
        fn copy(&self, text: &str) -> Result<()> {
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn item(id: &str) -> ContentItem {
        seed_items(Utc::now())
            .into_iter()
            .find(|i| i.id == id)
            .unwrap()
    }

    #[test]
    fn test_open_without_hooks_starts_empty() {
        let mut workflow = HookWorkflow::new();
        workflow.open(&item("1")).unwrap();

        assert!(workflow.is_open());
        assert!(!workflow.is_generating());
        assert!(workflow.results().is_empty());
    }

    #[test]
    fn test_open_seeds_from_existing_hooks() {
        let mut with_hooks = item("1");
        with_hooks.hooks = canned_hooks("1");

        let mut workflow = HookWorkflow::new();
        workflow.open(&with_hooks).unwrap();

        assert_eq!(workflow.results(), with_hooks.hooks.as_slice());
    }

    #[test]
    fn test_second_generate_rejected_while_in_flight() {
        let mut workflow = HookWorkflow::new();
        workflow.open(&item("1")).unwrap();

        let (_, item_id) = workflow.start_generation().unwrap();
        assert_eq!(item_id, "1");
        assert!(workflow.is_generating());
        assert_eq!(
            workflow.start_generation(),
            Err(WorkflowError::GenerationInFlight)
        );
    }

    #[test]
    fn test_generate_requires_open_modal() {
        let mut workflow = HookWorkflow::new();
        assert_eq!(workflow.start_generation(), Err(WorkflowError::NotOpen));
    }

    #[test]
    fn test_success_replaces_results() {
        let mut workflow = HookWorkflow::new();
        let mut seeded = item("1");
        seeded.hooks = vec![Hook::new("old", "1", HookType::Blog, "old hook")];
        workflow.open(&seeded).unwrap();

        let (ticket, _) = workflow.start_generation().unwrap();
        let fresh = canned_hooks("1");
        assert!(workflow.finish_generation(ticket, Ok(&fresh)));

        assert!(!workflow.is_generating());
        assert_eq!(workflow.results(), fresh.as_slice());
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut workflow = HookWorkflow::new();
        let mut seeded = item("2");
        seeded.hooks = canned_hooks("2");
        workflow.open(&seeded).unwrap();

        let (ticket, _) = workflow.start_generation().unwrap();
        let err = HooklineError::Integration("model offline".into());
        assert!(workflow.finish_generation(ticket, Err(&err)));

        assert!(!workflow.is_generating());
        assert_eq!(workflow.results(), seeded.hooks.as_slice());
        // Back to idle, so a retry is allowed
        assert!(workflow.start_generation().is_ok());
    }

    #[test]
    fn test_stale_ticket_ignored_after_reopen() {
        let mut workflow = HookWorkflow::new();
        workflow.open(&item("1")).unwrap();
        let (stale, _) = workflow.start_generation().unwrap();

        workflow.close();
        workflow.open(&item("3")).unwrap();

        assert!(!workflow.finish_generation(stale, Ok(&canned_hooks("1"))));
        assert!(workflow.results().is_empty());
        assert_eq!(workflow.item().unwrap().id, "3");
    }

    #[test]
    fn test_open_refused_while_generating() {
        let mut workflow = HookWorkflow::new();
        workflow.open(&item("1")).unwrap();
        workflow.start_generation().unwrap();

        assert_eq!(
            workflow.open(&item("3")),
            Err(WorkflowError::GenerationInFlight)
        );
        assert_eq!(workflow.item().unwrap().id, "1");
    }

    #[test]
    fn test_close_discards_local_state() {
        let mut workflow = HookWorkflow::new();
        let mut seeded = item("1");
        seeded.hooks = canned_hooks("1");
        workflow.open(&seeded).unwrap();
        workflow.close();

        assert!(!workflow.is_open());
        assert!(workflow.results().is_empty());
        assert!(workflow.item().is_none());
    }

    #[test]
    fn test_copy_sets_indicator_then_expires() {
        let mut seeded = item("1");
        seeded.hooks = canned_hooks("1");
        let mut workflow = HookWorkflow::new();
        workflow.open(&seeded).unwrap();

        let clipboard = MemoryClipboard::default();
        let start = Instant::now();
        workflow.copy("h2", &clipboard, start).unwrap();

        assert_eq!(workflow.copied_hook(), Some("h2"));
        assert_eq!(
            clipboard.contents.borrow().as_deref(),
            Some(seeded.hooks[1].text.as_str())
        );

        workflow.expire(start + Duration::from_millis(1999));
        assert_eq!(workflow.copied_hook(), Some("h2"));
        workflow.expire(start + Duration::from_secs(2));
        assert_eq!(workflow.copied_hook(), None);
    }

    #[test]
    fn test_new_copy_supersedes_previous() {
        let mut seeded = item("1");
        seeded.hooks = canned_hooks("1");
        let mut workflow = HookWorkflow::new();
        workflow.open(&seeded).unwrap();

        let clipboard = MemoryClipboard::default();
        let start = Instant::now();
        workflow.copy("h1", &clipboard, start).unwrap();
        workflow.copy("h2", &clipboard, start + Duration::from_secs(1)).unwrap();

        assert_eq!(workflow.copied_hook(), Some("h2"));
        workflow.expire(start + Duration::from_millis(2500));
        assert_eq!(workflow.copied_hook(), Some("h2"));
    }

    #[test]
    fn test_copy_unknown_hook() {
        let mut workflow = HookWorkflow::new();
        workflow.open(&item("1")).unwrap();

        let err = workflow
            .copy("h9", &MemoryClipboard::default(), Instant::now())
            .unwrap_err();
        assert!(matches!(
            err,
            HooklineError::Workflow(WorkflowError::HookNotFound(_))
        ));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut seeded = item("1");
        seeded.hooks = canned_hooks("1");
        let mut workflow = HookWorkflow::new();
        workflow.open(&seeded).unwrap();

        workflow.select_prev();
        assert_eq!(workflow.selected_index(), 0);
        workflow.select_next();
        workflow.select_next();
        assert_eq!(workflow.selected_index(), 1);
        assert_eq!(workflow.selected_hook().unwrap().id, "h2");
    }
}
