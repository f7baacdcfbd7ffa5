//! Feed view derivation.
//!
//! [`derive`] turns the store contents plus the user's current view
//! settings into the ordered list to render and the dashboard counters.
//! It is a pure function and is re-run whenever any input changes.

use std::fmt;

use crate::domain::{ContentItem, SourceType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Feed,
    Saved,
}

impl Tab {
    pub fn toggle(self) -> Self {
        match self {
            Tab::Feed => Tab::Saved,
            Tab::Saved => Tab::Feed,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Feed => "Content Dashboard",
            Tab::Saved => "Saved Content",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFilter {
    #[default]
    All,
    Only(SourceType),
}

impl SourceFilter {
    pub fn next(self) -> Self {
        match self {
            SourceFilter::All => SourceFilter::Only(SourceType::Reddit),
            SourceFilter::Only(SourceType::Reddit) => SourceFilter::Only(SourceType::Newsletter),
            SourceFilter::Only(SourceType::Newsletter) => SourceFilter::All,
        }
    }

    fn accepts(self, item: &ContentItem) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(source) => item.source_type == source,
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFilter::All => f.write_str("All Sources"),
            SourceFilter::Only(SourceType::Reddit) => f.write_str("Reddit"),
            SourceFilter::Only(SourceType::Newsletter) => f.write_str("Newsletters"),
        }
    }
}

/// Sort selector shown in the filter bar.
///
/// Display only: the feed is always ordered by recency whichever option is
/// selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOption {
    #[default]
    Newest,
    Trending,
    Engaging,
}

impl SortOption {
    pub fn next(self) -> Self {
        match self {
            SortOption::Newest => SortOption::Trending,
            SortOption::Trending => SortOption::Engaging,
            SortOption::Engaging => SortOption::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOption::Newest => "Newest First",
            SortOption::Trending => "Trending",
            SortOption::Engaging => "Most Engaging",
        }
    }
}

/// User-controlled view settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub tab: Tab,
    pub search: String,
    pub filter: SourceFilter,
}

/// Dashboard counters, always computed over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_projects: usize,
    pub saved: usize,
    pub pending: usize,
    pub hooks: usize,
}

impl Stats {
    pub fn compute(items: &[ContentItem]) -> Self {
        let saved = items.iter().filter(|item| item.is_saved).count();
        Self {
            total_projects: items.len(),
            saved,
            pending: items.len() - saved,
            hooks: items.iter().map(|item| item.hooks.len()).sum(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedView<'a> {
    pub items: Vec<&'a ContentItem>,
    pub stats: Stats,
}

/// Tab filter, then search, then source filter, then newest first.
///
/// The sort is stable, so items with equal timestamps keep store order.
pub fn derive<'a>(items: &'a [ContentItem], query: &FeedQuery) -> FeedView<'a> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<&ContentItem> = items
        .iter()
        .filter(|item| query.tab == Tab::Feed || item.is_saved)
        .filter(|item| needle.is_empty() || item.matches_query(&needle))
        .filter(|item| query.filter.accepts(item))
        .collect();

    visible.sort_by(|a, b| b.published.at.cmp(&a.published.at));

    FeedView {
        items: visible,
        stats: Stats::compute(items),
    }
}
