use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{HooklineError, Result};
use crate::integrations::{
    CrmSync, FileScraper, HookGenerator, IntegrationsConfig, MockCrm, MockHookGenerator,
    MockScraper, ScrapeTrigger,
};

/// Wires the external collaborators together.
pub struct AppContext {
    pub scraper: Arc<dyn ScrapeTrigger>,
    pub crm: Arc<dyn CrmSync>,
    pub generator: Arc<dyn HookGenerator>,
    pub sync_queue_size: usize,
}

impl AppContext {
    pub fn new(config: &IntegrationsConfig) -> Self {
        let scraper: Arc<dyn ScrapeTrigger> = match &config.scrape_file {
            Some(path) => Arc::new(FileScraper::new(path.clone())),
            None => Arc::new(MockScraper::new(config.scrape_delay())),
        };

        Self {
            scraper,
            crm: Arc::new(MockCrm::new(config.sync_delay())),
            generator: Arc::new(MockHookGenerator::new(config.generate_delay())),
            sync_queue_size: config.sync_queue_size,
        }
    }

    /// Directory for the TUI log file: `<data dir>/hookline`.
    pub fn log_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| HooklineError::Config("Could not find data directory".into()))?;
        let hookline_dir = data_dir.join("hookline");
        std::fs::create_dir_all(&hookline_dir)?;
        Ok(hookline_dir)
    }
}
