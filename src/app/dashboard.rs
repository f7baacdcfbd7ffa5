use std::time::Instant;

use tracing::{error, info, warn};

use crate::app::{HooklineError, Result};
use crate::domain::Hook;
use crate::feed::{self, FeedQuery, FeedView};
use crate::integrations::{HookGenerator, ScrapeBatch, ScrapeStatus, ScrapeTrigger, SyncHandle};
use crate::store::{ContentStore, SaveToggle};
use crate::workflow::transient::TOAST_DURATION;
use crate::workflow::{Clipboard, GenerationTicket, HookWorkflow, Transient};

/// Single writer for everything the dashboard shows.
///
/// Event handlers call into this; collaborator calls either run inline
/// (`scrape`, `generate_hooks`) or are split into `begin_*` / `finish_*`
/// so the caller can await them on a separate task.
pub struct Dashboard {
    store: ContentStore,
    workflow: HookWorkflow,
    sync: SyncHandle,
    toast: Transient<String>,
    is_scraping: bool,
}

impl Dashboard {
    pub fn new(store: ContentStore, sync: SyncHandle) -> Self {
        Self {
            store,
            workflow: HookWorkflow::new(),
            sync,
            toast: Transient::new(TOAST_DURATION),
            is_scraping: false,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn workflow(&self) -> &HookWorkflow {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut HookWorkflow {
        &mut self.workflow
    }

    pub fn view(&self, query: &FeedQuery) -> FeedView<'_> {
        feed::derive(self.store.items(), query)
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.get().map(String::as_str)
    }

    pub fn is_scraping(&self) -> bool {
        self.is_scraping
    }

    /// Toggle the saved flag. Newly saved items are handed to the CRM
    /// worker without waiting for it.
    pub fn toggle_save(&mut self, id: &str) -> SaveToggle {
        let outcome = self.store.toggle_save(id);
        if let SaveToggle::Saved(item) = &outcome {
            self.sync.dispatch(item.clone());
        }
        outcome
    }

    /// Mark a scrape as started. Returns false if one is already running.
    pub fn begin_scrape(&mut self) -> bool {
        if self.is_scraping {
            return false;
        }
        self.is_scraping = true;
        true
    }

    /// Apply a scrape outcome. Returns how many items were added.
    pub fn finish_scrape(&mut self, outcome: Result<ScrapeBatch>, now: Instant) -> usize {
        self.is_scraping = false;

        match outcome {
            Ok(batch) if batch.status == ScrapeStatus::Success => {
                let found = batch.items_found;
                let added = self.store.append_scraped(batch.items);
                info!("Scrape finished: {} found, {} added", found, added);
                if added == 0 {
                    warn!("Scrape found {} items but all were already present", found);
                } else {
                    self.toast
                        .set(format!("Successfully scraped {} new items!", added), now);
                }
                added
            }
            Ok(batch) => {
                info!("Scrape finished with status {:?}", batch.status);
                0
            }
            Err(e) => {
                error!("Scrape failed: {}", e);
                0
            }
        }
    }

    /// Run a whole scrape inline. Ignored if one is already in flight.
    pub async fn scrape(&mut self, trigger: &dyn ScrapeTrigger) -> usize {
        if !self.begin_scrape() {
            return 0;
        }
        let outcome = trigger.trigger().await;
        self.finish_scrape(outcome, Instant::now())
    }

    pub fn open_hooks(&mut self, item_id: &str) -> Result<()> {
        let item = self
            .store
            .get(item_id)
            .ok_or_else(|| HooklineError::ItemNotFound(item_id.to_string()))?;
        self.workflow.open(item)?;
        Ok(())
    }

    pub fn begin_generation(&mut self) -> Result<(GenerationTicket, String)> {
        Ok(self.workflow.start_generation()?)
    }

    /// Apply a generation outcome.
    ///
    /// Successful hooks always land in the store, even when the modal that
    /// asked for them has been closed since.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        item_id: &str,
        outcome: Result<Vec<Hook>>,
    ) {
        match outcome {
            Ok(hooks) => {
                self.record_hooks(item_id, hooks.clone());
                self.workflow.finish_generation(ticket, Ok(&hooks));
            }
            Err(e) => {
                self.workflow.finish_generation(ticket, Err(&e));
            }
        }
    }

    /// Store generated hooks for an item without going through the modal.
    pub fn record_hooks(&mut self, item_id: &str, hooks: Vec<Hook>) -> bool {
        let found = self.store.replace_hooks(item_id, hooks);
        if !found {
            warn!("Generated hooks for unknown item {}", item_id);
        }
        found
    }

    /// Run a whole generation for the open modal inline.
    pub async fn generate_hooks(&mut self, generator: &dyn HookGenerator) -> Result<()> {
        let (ticket, item_id) = self.begin_generation()?;
        let outcome = generator.generate(&item_id).await;
        self.complete_generation(ticket, &item_id, outcome);
        Ok(())
    }

    pub fn copy_selected_hook(&mut self, clipboard: &dyn Clipboard, now: Instant) -> Result<()> {
        let Some(hook_id) = self.workflow.selected_hook().map(|h| h.id.clone()) else {
            return Ok(());
        };
        self.workflow.copy(&hook_id, clipboard, now)
    }

    /// Clear timed notifications whose lifetime has passed.
    pub fn tick(&mut self, now: Instant) {
        self.toast.expire(now);
        self.workflow.expire(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::mock::{scraped_items, seed_items};
    use crate::integrations::spawn_crm_sync;
    use crate::integrations::MockCrm;
    use chrono::Utc;
    use std::sync::Arc;
    use std::time::Duration;

    fn dashboard() -> Dashboard {
        let sync = spawn_crm_sync(Arc::new(MockCrm::new(Duration::ZERO)), 8);
        Dashboard::new(ContentStore::new(seed_items(Utc::now())), sync)
    }

    #[tokio::test]
    async fn test_finish_scrape_prepends_and_toasts() {
        let mut dash = dashboard();
        assert!(dash.begin_scrape());
        assert!(!dash.begin_scrape());

        let now = Instant::now();
        let added = dash.finish_scrape(Ok(ScrapeBatch::success(scraped_items(Utc::now()))), now);

        assert_eq!(added, 2);
        assert!(!dash.is_scraping());
        assert_eq!(dash.store().items()[0].id, "new_1");
        assert_eq!(dash.toast(), Some("Successfully scraped 2 new items!"));

        dash.tick(now + TOAST_DURATION);
        assert_eq!(dash.toast(), None);
    }

    #[tokio::test]
    async fn test_reimported_batch_adds_nothing_and_skips_toast() {
        let mut dash = dashboard();
        let now = Instant::now();

        dash.begin_scrape();
        dash.finish_scrape(Ok(ScrapeBatch::success(scraped_items(Utc::now()))), now);
        dash.tick(now + TOAST_DURATION);
        assert_eq!(dash.toast(), None);

        dash.begin_scrape();
        let added = dash.finish_scrape(Ok(ScrapeBatch::success(scraped_items(Utc::now()))), now);

        assert_eq!(added, 0);
        assert_eq!(dash.store().len(), 7);
        assert_eq!(dash.toast(), None);
        assert!(!dash.is_scraping());
    }

    #[tokio::test]
    async fn test_partial_duplicates_toast_counts_added_items() {
        let mut dash = dashboard();
        let mut batch = scraped_items(Utc::now());
        batch.push(seed_items(Utc::now()).remove(0));

        dash.begin_scrape();
        let added = dash.finish_scrape(Ok(ScrapeBatch::success(batch)), Instant::now());

        assert_eq!(added, 2);
        assert_eq!(dash.toast(), Some("Successfully scraped 2 new items!"));
    }

    #[tokio::test]
    async fn test_failed_scrape_leaves_store_unchanged() {
        let mut dash = dashboard();
        let before = dash.store().items().to_vec();

        dash.begin_scrape();
        let added = dash.finish_scrape(
            Err(HooklineError::Integration("webhook down".into())),
            Instant::now(),
        );

        assert_eq!(added, 0);
        assert_eq!(dash.store().items(), before.as_slice());
        assert_eq!(dash.toast(), None);
        assert!(!dash.is_scraping());
    }

    #[tokio::test]
    async fn test_generation_result_lands_in_store_after_close() {
        let mut dash = dashboard();
        dash.open_hooks("1").unwrap();
        let (ticket, item_id) = dash.begin_generation().unwrap();
        dash.workflow_mut().close();

        dash.complete_generation(
            ticket,
            &item_id,
            Ok(crate::integrations::mock::canned_hooks("1")),
        );

        assert_eq!(dash.store().get("1").unwrap().hooks.len(), 2);
        assert!(!dash.workflow().is_open());
    }

    #[tokio::test]
    async fn test_open_hooks_unknown_item() {
        let mut dash = dashboard();
        assert!(matches!(
            dash.open_hooks("nope"),
            Err(HooklineError::ItemNotFound(_))
        ));
    }
}
