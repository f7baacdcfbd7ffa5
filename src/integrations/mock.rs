//! Built-in collaborators backed by fixture data and artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::app::Result;
use crate::domain::{ContentItem, Hook, HookType, Metrics, PublishedDate, SourceType};
use crate::integrations::{CrmSync, HookGenerator, ScrapeBatch, ScrapeTrigger};

struct Fixture {
    id: &'static str,
    source_type: SourceType,
    title: &'static str,
    excerpt: &'static str,
    published: &'static str,
    metrics: Metrics,
    tags: &'static [&'static str],
    is_saved: bool,
}

impl Fixture {
    fn build(&self, now: DateTime<Utc>) -> ContentItem {
        let mut item = ContentItem::new(
            self.id,
            self.source_type,
            self.title,
            self.excerpt,
            PublishedDate::parse(self.published, now),
        );
        item.metrics = self.metrics.clone();
        item.tags = self.tags.iter().map(|t| t.to_string()).collect();
        item.is_saved = self.is_saved;
        item.saved_at = self.is_saved.then_some(now);
        item
    }
}

fn reddit(upvotes: u64, comments: u64) -> Metrics {
    Metrics {
        upvotes: Some(upvotes),
        comments: Some(comments),
        reads: None,
    }
}

fn newsletter(reads: u64) -> Metrics {
    Metrics {
        reads: Some(reads),
        ..Metrics::default()
    }
}

/// The content every session starts with. Relative dates resolve against `now`.
pub fn seed_items(now: DateTime<Utc>) -> Vec<ContentItem> {
    [
        Fixture {
            id: "1",
            source_type: SourceType::Reddit,
            title: "Homeowner put Drano in a completely clogged kitchen sink...",
            excerpt: "Now the pipes are leaking at the joints. Why do people still buy this stuff? \
                      It eats through standard PVC if left too long. Here is a photo of the aftermath.",
            published: "2 hours ago",
            metrics: reddit(452, 89),
            tags: &["Plumbing", "Warning", "Maintenance"],
            is_saved: false,
        },
        Fixture {
            id: "2",
            source_type: SourceType::Newsletter,
            title: "The \"Shoulder Season\" Marketing Playbook",
            excerpt: "How to keep your HVAC technicians busy during the mild weeks of spring and fall. \
                      Includes 3 email templates for tune-up specials.",
            published: "1 day ago",
            metrics: newsletter(1250),
            tags: &["HVAC", "Marketing", "Business Growth"],
            is_saved: true,
        },
        Fixture {
            id: "3",
            source_type: SourceType::Reddit,
            title: "Customer asks: \"Why does my breaker trip when I run the microwave and toaster?\"",
            excerpt: "Classic kitchen circuit overload. Explained the need for a dedicated circuit. \
                      They thought I was trying to upsell them. How do you handle skepticism?",
            published: "4 hours ago",
            metrics: reddit(210, 145),
            tags: &["Electrical", "Sales", "Customer Service"],
            is_saved: false,
        },
        Fixture {
            id: "4",
            source_type: SourceType::Newsletter,
            title: "Top 5 Landscape Trends for 2025",
            excerpt: "Drought-tolerant xeriscaping is out-pacing traditional lawns by 40% in suburban areas. \
                      Here is how to price these projects profitably.",
            published: "3 days ago",
            metrics: newsletter(3400),
            tags: &["Landscaping", "Trends", "Pricing"],
            is_saved: false,
        },
        Fixture {
            id: "5",
            source_type: SourceType::Reddit,
            title: "Found a dead raccoon in the return vent today",
            excerpt: "Not the worst thing I have found, but definitely top 10. Customer complained of a \
                      \"sweet\" smell. Always wear your PPE, guys.",
            published: "6 hours ago",
            metrics: reddit(1200, 302),
            tags: &["HVAC", "Horror Story", "Safety"],
            is_saved: false,
        },
    ]
    .iter()
    .map(|fixture| fixture.build(now))
    .collect()
}

/// The batch returned by [`MockScraper`].
pub fn scraped_items(now: DateTime<Utc>) -> Vec<ContentItem> {
    [
        Fixture {
            id: "new_1",
            source_type: SourceType::Reddit,
            title: "Is a tankless water heater actually worth it?",
            excerpt: "Running the numbers on ROI for a tankless system in a 4-person household. \
                      The gas savings are real, but the install cost is the barrier.",
            published: "Just now",
            metrics: reddit(12, 5),
            tags: &["Plumbing", "Product Review"],
            is_saved: false,
        },
        Fixture {
            id: "new_2",
            source_type: SourceType::Newsletter,
            title: "Google LSA prices are skyrocketing",
            excerpt: "Local Service Ads for plumbers have gone up 30% in Q3. \
                      Here are alternative lead sources to diversify your marketing spend.",
            published: "Just now",
            metrics: newsletter(45),
            tags: &["Marketing", "Ads"],
            is_saved: false,
        },
    ]
    .iter()
    .map(|fixture| fixture.build(now))
    .collect()
}

/// Canned hooks per content id. Unknown ids yield no hooks.
pub fn canned_hooks(item_id: &str) -> Vec<Hook> {
    let table: &[(&str, HookType, &str)] = match item_id {
        "1" => &[
            ("h1", HookType::Social, "🛑 STOP! Put the Drano down. You might be dissolving your pipes along with the clog. Here is why..."),
            ("h2", HookType::Video, "This $10 bottle of chemicals just caused $2,000 in damage. Let me show you what chemical drain cleaners actually do to your PVC pipes."),
        ],
        "2" => &[
            ("h3", HookType::Email, "Subject: Is your business ready for the \"Slow Season\"?"),
            ("h4", HookType::Ad, "Keep your techs busy this spring. Download our free Shoulder Season Playbook."),
        ],
        "new_1" => &[
            ("h5", HookType::Social, "Thinking about going tankless? 🚿 Here is the real math on whether it saves you money."),
        ],
        _ => &[],
    };

    table
        .iter()
        .map(|(id, hook_type, text)| Hook::new(id, item_id, *hook_type, text))
        .collect()
}

pub struct MockScraper {
    delay: Duration,
}

impl MockScraper {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ScrapeTrigger for MockScraper {
    async fn trigger(&self) -> Result<ScrapeBatch> {
        info!("Connecting to scrape workflow...");
        tokio::time::sleep(self.delay).await;
        Ok(ScrapeBatch::success(scraped_items(Utc::now())))
    }
}

pub struct MockCrm {
    delay: Duration,
}

impl MockCrm {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CrmSync for MockCrm {
    async fn push(&self, item: &ContentItem) -> Result<bool> {
        info!("Sending to CRM: {}", item.title);
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}

pub struct MockHookGenerator {
    delay: Duration,
}

impl MockHookGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl HookGenerator for MockHookGenerator {
    async fn generate(&self, item_id: &str) -> Result<Vec<Hook>> {
        tokio::time::sleep(self.delay).await;
        Ok(canned_hooks(item_id))
    }
}
