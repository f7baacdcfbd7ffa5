use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;

use crate::app::{AppContext, Dashboard, HooklineError, Result};
use crate::domain::ContentItem;
use crate::feed::FeedQuery;
use crate::integrations::{mock::seed_items, spawn_crm_sync, FileScraper, ScrapeTrigger};
use crate::store::ContentStore;

/// Build a dashboard over the seed content, wired to the context's CRM.
pub fn seed_dashboard(ctx: &AppContext) -> Dashboard {
    let sync = spawn_crm_sync(ctx.crm.clone(), ctx.sync_queue_size);
    Dashboard::new(ContentStore::new(seed_items(Utc::now())), sync)
}

pub fn list_items(dashboard: &Dashboard, query: &FeedQuery, json: bool) -> Result<()> {
    let view = dashboard.view(query);

    if json {
        println!("{}", feed_json(dashboard, query)?);
        return Ok(());
    }

    if view.items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    for item in view.items {
        print_item(item);
    }

    Ok(())
}

/// The visible feed as a JSON array that `scrape --from` accepts.
pub fn feed_json(dashboard: &Dashboard, query: &FeedQuery) -> Result<String> {
    Ok(serde_json::to_string_pretty(&dashboard.view(query).items)?)
}

fn print_item(item: &ContentItem) {
    let saved_marker = if item.is_saved { "♥" } else { " " };
    println!(
        "{} {:<10} {:<12} {}",
        saved_marker,
        item.source_type.label(),
        item.published.display,
        item.title
    );

    let metrics = item.metrics.summary();
    if !metrics.is_empty() {
        println!("  {}", metrics);
    }
}

pub fn show_stats(dashboard: &Dashboard) {
    let stats = dashboard.view(&FeedQuery::default()).stats;
    println!("Total Scraped:  {}", stats.total_projects);
    println!("Saved Items:    {}", stats.saved);
    println!("Pending Review: {}", stats.pending);
    println!("Hooks Created:  {}", stats.hooks);
}

/// Run one scrape, from `from` if given, and print the resulting feed.
pub async fn scrape(ctx: &AppContext, dashboard: &mut Dashboard, from: Option<&Path>) -> Result<()> {
    let scraper: Arc<dyn ScrapeTrigger> = match from {
        Some(path) => Arc::new(FileScraper::new(path.to_path_buf())),
        None => ctx.scraper.clone(),
    };

    println!("Scraping...");
    let added = dashboard.scrape(scraper.as_ref()).await;

    match dashboard.toast() {
        Some(message) => println!("{}", message),
        None => println!("No new items"),
    }
    if added > 0 {
        println!();
        list_items(dashboard, &FeedQuery::default(), false)?;
    }

    Ok(())
}

/// Generate hooks for each id concurrently and store them. No modal is
/// involved, so several generations can be in flight at once.
pub async fn generate_hooks(ctx: &AppContext, dashboard: &mut Dashboard, ids: &[String]) -> Result<()> {
    if let Some(missing) = ids.iter().find(|id| dashboard.store().get(id).is_none()) {
        return Err(HooklineError::ItemNotFound(missing.clone()));
    }

    let outcomes = join_all(ids.iter().map(|id| ctx.generator.generate(id))).await;

    for (id, outcome) in ids.iter().zip(outcomes) {
        match outcome {
            Ok(hooks) => {
                dashboard.record_hooks(id, hooks);
            }
            Err(e) => eprintln!("  ! {} - generation failed: {}", id, e),
        }

        let Some(item) = dashboard.store().get(id) else {
            continue;
        };
        println!("{}", item.title);
        if item.hooks.is_empty() {
            println!("  (no hooks)");
        }
        for hook in &item.hooks {
            println!(
                "  [{}] {} ({} chars)",
                hook.hook_type.label(),
                hook.text,
                hook.character_count
            );
        }
    }

    Ok(())
}
