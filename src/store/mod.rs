//! In-memory content store.
//!
//! [`ContentStore`] owns the ordered list of content items and is the only
//! place they are mutated. Every mutation takes `&mut self`, so a reader
//! always sees an item either entirely before or entirely after a change.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::{ContentItem, Hook};

/// Outcome of [`ContentStore::toggle_save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveToggle {
    /// The item is now saved. Carries a snapshot for downstream sync.
    Saved(ContentItem),
    Unsaved,
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    items: Vec<ContentItem>,
}

impl ContentStore {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the saved flag of `id`, stamping or clearing `saved_at` with it.
    pub fn toggle_save(&mut self, id: &str) -> SaveToggle {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!("toggle_save: no item {}", id);
            return SaveToggle::NotFound;
        };

        item.is_saved = !item.is_saved;
        if item.is_saved {
            item.saved_at = Some(Utc::now());
            SaveToggle::Saved(item.clone())
        } else {
            item.saved_at = None;
            SaveToggle::Unsaved
        }
    }

    /// Prepend a freshly scraped batch, keeping its order.
    ///
    /// Items whose id is already present (in the store or earlier in the
    /// batch) are dropped. Returns how many items were added.
    pub fn append_scraped(&mut self, new_items: Vec<ContentItem>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(|item| item.id.clone()).collect();

        let mut accepted = Vec::with_capacity(new_items.len());
        for item in new_items {
            if seen.insert(item.id.clone()) {
                accepted.push(item);
            } else {
                warn!("Skipping scraped item with duplicate id {}", item.id);
            }
        }

        let added = accepted.len();
        accepted.append(&mut self.items);
        self.items = accepted;
        added
    }

    /// Replace the hooks of `item_id`. Returns `false` if no such item exists.
    pub fn replace_hooks(&mut self, item_id: &str, hooks: Vec<Hook>) -> bool {
        match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.hooks = hooks;
                true
            }
            None => {
                debug!("replace_hooks: no item {}", item_id);
                false
            }
        }
    }
}
