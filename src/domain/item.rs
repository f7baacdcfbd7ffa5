use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{Hook, PublishedDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Reddit,
    Newsletter,
}

impl SourceType {
    pub fn label(self) -> &'static str {
        match self {
            SourceType::Reddit => "Reddit",
            SourceType::Newsletter => "Newsletter",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Engagement counters. Which ones are present depends on the source:
/// Reddit posts carry upvotes and comments, newsletters carry reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reads: Option<u64>,
}

impl Metrics {
    /// Render present counters, e.g. `"452 upvotes · 89 comments"`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.upvotes, "upvotes"),
            (self.comments, "comments"),
            (self.reads, "reads"),
        ]
        .into_iter()
        .filter_map(|(value, label)| value.map(|v| format!("{} {}", v, label)))
        .collect();
        parts.join(" · ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub source_type: SourceType,
    pub title: String,
    pub excerpt: String,
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub published: PublishedDate,
    pub metrics: Metrics,
    pub tags: Vec<String>,
    pub is_saved: bool,
    pub saved_at: Option<DateTime<Utc>>,
    pub hooks: Vec<Hook>,
}

impl ContentItem {
    pub fn new(
        id: &str,
        source_type: SourceType,
        title: &str,
        excerpt: &str,
        published: PublishedDate,
    ) -> Self {
        Self {
            id: id.to_string(),
            source_type,
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            url: None,
            thumbnail: None,
            published,
            metrics: Metrics::default(),
            tags: Vec::new(),
            is_saved: false,
            saved_at: None,
            hooks: Vec::new(),
        }
    }

    /// Generate a deterministic ID from the source type and a source-side
    /// reference (permalink, or title when no link exists).
    pub fn generate_id(source_type: SourceType, reference: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source_type.label().as_bytes());
        hasher.update(reference.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn matches_query(&self, lowered_query: &str) -> bool {
        self.title.to_lowercase().contains(lowered_query)
            || self.excerpt.to_lowercase().contains(lowered_query)
    }
}

/// Content item as supplied by an external source (JSON import).
///
/// Dates are free-form strings and ids are optional; [`RawContentItem::into_item`]
/// normalizes both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContentItem {
    #[serde(default)]
    pub id: Option<String>,
    pub source_type: SourceType,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub published_date: String,
    /// Exact instant, present on items exported by hookline itself.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_saved: bool,
}

impl RawContentItem {
    pub fn into_item(self, now: DateTime<Utc>) -> ContentItem {
        let id = self.id.unwrap_or_else(|| {
            let reference = self.url.as_deref().unwrap_or(&self.title);
            ContentItem::generate_id(self.source_type, reference)
        });

        ContentItem {
            id,
            source_type: self.source_type,
            title: self.title,
            excerpt: self.excerpt,
            url: self.url,
            thumbnail: self.thumbnail,
            published: match self.published_at {
                Some(at) => PublishedDate {
                    at,
                    display: self.published_date,
                },
                None => PublishedDate::parse(&self.published_date, now),
            },
            metrics: self.metrics,
            tags: self.tags,
            is_saved: self.is_saved,
            saved_at: self.is_saved.then_some(now),
            hooks: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation_deterministic() {
        let id1 = ContentItem::generate_id(SourceType::Reddit, "https://reddit.com/r/hvac/1");
        let id2 = ContentItem::generate_id(SourceType::Reddit, "https://reddit.com/r/hvac/1");
        assert_eq!(id1, id2);
        assert_eq!(id1.len(), 64);
        assert!(id1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_id_generation_depends_on_source() {
        let reddit = ContentItem::generate_id(SourceType::Reddit, "Same title");
        let newsletter = ContentItem::generate_id(SourceType::Newsletter, "Same title");
        assert_ne!(reddit, newsletter);
    }

    #[test]
    fn test_matches_query_title_or_excerpt() {
        let item = ContentItem::new(
            "5",
            SourceType::Reddit,
            "Found a dead raccoon in the return vent today",
            "Customer complained of a sweet smell.",
            PublishedDate::from_instant(Utc::now()),
        );
        assert!(item.matches_query("raccoon"));
        assert!(item.matches_query("sweet smell"));
        assert!(!item.matches_query("drano"));
    }

    #[test]
    fn test_metrics_summary_skips_absent() {
        let metrics = Metrics {
            upvotes: Some(452),
            comments: Some(89),
            reads: None,
        };
        assert_eq!(metrics.summary(), "452 upvotes · 89 comments");
        assert_eq!(Metrics::default().summary(), "");
    }

    #[test]
    fn test_raw_item_without_id_gets_hashed_id() {
        let raw: RawContentItem = serde_json::from_str(
            r#"{
                "sourceType": "newsletter",
                "title": "Google LSA prices are skyrocketing",
                "excerpt": "Local Service Ads went up 30% in Q3.",
                "publishedDate": "Just now",
                "metrics": { "reads": 45 },
                "tags": ["Marketing"]
            }"#,
        )
        .unwrap();

        let now = Utc::now();
        let item = raw.into_item(now);
        assert_eq!(
            item.id,
            ContentItem::generate_id(SourceType::Newsletter, "Google LSA prices are skyrocketing")
        );
        assert_eq!(item.published.at, now);
        assert_eq!(item.metrics.reads, Some(45));
        assert!(!item.is_saved);
        assert!(item.saved_at.is_none());
        assert!(item.hooks.is_empty());
    }

    #[test]
    fn test_raw_saved_item_keeps_invariant() {
        let raw: RawContentItem = serde_json::from_str(
            r#"{"id": "x", "sourceType": "reddit", "title": "t",
                "publishedDate": "2 hours ago", "isSaved": true}"#,
        )
        .unwrap();
        let item = raw.into_item(Utc::now());
        assert_eq!(item.id, "x");
        assert!(item.is_saved);
        assert!(item.saved_at.is_some());
    }

    #[test]
    fn test_exported_item_imports_back() {
        let now = Utc::now();
        let mut item = ContentItem::new(
            "3",
            SourceType::Reddit,
            "Why does my breaker trip?",
            "Classic kitchen circuit overload.",
            PublishedDate::parse("4 hours ago", now),
        );
        item.url = Some("https://reddit.com/r/electricians/3".into());
        item.tags = vec!["Electrical".into()];

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["publishedDate"], "4 hours ago");
        assert!(json.get("published").is_none());

        let raw: RawContentItem = serde_json::from_value(json).unwrap();
        let imported = raw.into_item(now + chrono::Duration::days(2));
        assert_eq!(imported, item);
    }
}
