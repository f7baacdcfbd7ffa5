use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::app::Result;
use crate::domain::RawContentItem;
use crate::integrations::{ScrapeBatch, ScrapeStatus, ScrapeTrigger};

/// Scrape source that imports a JSON array of items from disk.
///
/// Lets an external scraper drop its output somewhere and have the
/// dashboard pick it up on "Import".
pub struct FileScraper {
    path: PathBuf,
}

impl FileScraper {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ScrapeTrigger for FileScraper {
    async fn trigger(&self) -> Result<ScrapeBatch> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let raw: Vec<RawContentItem> = serde_json::from_str(&content)?;

        let now = Utc::now();
        let items: Vec<_> = raw.into_iter().map(|r| r.into_item(now)).collect();
        info!("Read {} items from {}", items.len(), self.path.display());

        if items.is_empty() {
            return Ok(ScrapeBatch {
                status: ScrapeStatus::Empty,
                items_found: 0,
                items,
            });
        }
        Ok(ScrapeBatch::success(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HooklineError;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_items_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"sourceType": "reddit", "title": "Sump pump failed", "publishedDate": "5 minutes ago",
                  "url": "https://reddit.com/r/plumbing/abc", "metrics": {{"upvotes": 3}}}},
                {{"id": "n-9", "sourceType": "newsletter", "title": "Q4 pricing", "publishedDate": "2025-01-02T00:00:00Z"}}
            ]"#
        )
        .unwrap();

        let scraper = FileScraper::new(file.path().to_path_buf());
        let batch = scraper.trigger().await.unwrap();

        assert_eq!(batch.status, ScrapeStatus::Success);
        assert_eq!(batch.items_found, 2);
        assert_eq!(batch.items[1].id, "n-9");
        assert_eq!(batch.items[0].id.len(), 64);
    }

    #[tokio::test]
    async fn test_empty_array_is_empty_status() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let batch = FileScraper::new(file.path().to_path_buf())
            .trigger()
            .await
            .unwrap();
        assert_eq!(batch.status, ScrapeStatus::Empty);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let scraper = FileScraper::new(PathBuf::from("/nonexistent/hookline/batch.json"));
        let err = scraper.trigger().await.unwrap_err();
        assert!(matches!(err, HooklineError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = FileScraper::new(file.path().to_path_buf())
            .trigger()
            .await
            .unwrap_err();
        assert!(matches!(err, HooklineError::Json(_)));
    }
}
