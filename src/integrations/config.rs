use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the external collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationsConfig {
    /// Simulated latency of a scrape run in milliseconds (default: 2500)
    pub scrape_delay_ms: u64,

    /// Simulated latency of a CRM push in milliseconds (default: 1000)
    pub sync_delay_ms: u64,

    /// Simulated latency of hook generation in milliseconds (default: 1500)
    pub generate_delay_ms: u64,

    /// Import scraped items from this JSON file instead of the built-in batch
    pub scrape_file: Option<PathBuf>,

    /// Capacity of the CRM sync queue (default: 32)
    pub sync_queue_size: usize,
}

impl Default for IntegrationsConfig {
    fn default() -> Self {
        Self {
            scrape_delay_ms: 2500,
            sync_delay_ms: 1000,
            generate_delay_ms: 1500,
            scrape_file: None,
            sync_queue_size: 32,
        }
    }
}

impl IntegrationsConfig {
    pub fn scrape_delay(&self) -> Duration {
        Duration::from_millis(self.scrape_delay_ms)
    }

    pub fn sync_delay(&self) -> Duration {
        Duration::from_millis(self.sync_delay_ms)
    }

    pub fn generate_delay(&self) -> Duration {
        Duration::from_millis(self.generate_delay_ms)
    }
}
