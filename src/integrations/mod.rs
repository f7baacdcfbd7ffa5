//! External collaborators: content scraping, CRM sync and hook generation.
//!
//! Each collaborator is an async trait so the dashboard can run against the
//! bundled mocks, a JSON import, or a real backend.
//!
//! ```text
//! Import  → ScrapeTrigger  → ScrapeBatch → ContentStore::append_scraped
//! Save    → SyncHandle     → CrmSync (detached worker, result only logged)
//! Hooks   → HookGenerator  → Vec<Hook>   → ContentStore::replace_hooks
//! ```

mod config;
mod file;
pub mod mock;
mod sync;

pub use config::IntegrationsConfig;
pub use file::FileScraper;
pub use mock::{MockCrm, MockHookGenerator, MockScraper};
pub use sync::{spawn_crm_sync, SyncHandle};

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{ContentItem, Hook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStatus {
    Success,
    /// The source ran but produced nothing usable.
    Empty,
}

/// Result of a scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeBatch {
    pub status: ScrapeStatus,
    /// Count reported by the source. Used for the user notification.
    pub items_found: usize,
    pub items: Vec<ContentItem>,
}

impl ScrapeBatch {
    pub fn success(items: Vec<ContentItem>) -> Self {
        Self {
            status: ScrapeStatus::Success,
            items_found: items.len(),
            items,
        }
    }
}

/// Kicks off a scrape of the configured sources.
#[async_trait]
pub trait ScrapeTrigger: Send + Sync {
    async fn trigger(&self) -> Result<ScrapeBatch>;
}

/// Pushes a saved item to the CRM.
#[async_trait]
pub trait CrmSync: Send + Sync {
    async fn push(&self, item: &ContentItem) -> Result<bool>;
}

/// Produces marketing hooks for a content item.
#[async_trait]
pub trait HookGenerator: Send + Sync {
    async fn generate(&self, item_id: &str) -> Result<Vec<Hook>>;
}
