//! # Hookline
//!
//! A terminal dashboard for scraped trade content (Reddit threads and
//! industry newsletters) and the marketing hooks generated from it.
//!
//! ## Architecture
//!
//! ```text
//! ScrapeTrigger → ContentStore → feed::derive → TUI
//!                      ↑  │
//!      HookGenerator ──┘  └── save → CRM sync worker
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the dashboard
//! hookline
//!
//! # List saved newsletter items
//! hookline list --saved --source newsletter
//!
//! # Generate hooks for an item
//! hookline hooks 1
//! ```

/// Application context, the [`Dashboard`](app::Dashboard) state owner,
/// and error types.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the dashboard (default)
/// - `list` - Print the feed with optional filters
/// - `stats` - Print dashboard totals
/// - `scrape [--from FILE]` - Run a scrape
/// - `hooks <ID>...` - Generate hooks
pub mod cli;

/// Configuration loaded from `~/.config/hookline/config.toml`.
pub mod config;

/// Core domain models: [`ContentItem`](domain::ContentItem),
/// [`Hook`](domain::Hook) and [`PublishedDate`](domain::PublishedDate).
pub mod domain;

/// Pure derivation of the visible feed and dashboard counters.
pub mod feed;

/// External collaborators (scraper, CRM, hook generator) and their mocks.
pub mod integrations;

/// In-memory content store.
pub mod store;

/// Terminal user interface.
///
/// Single-screen layout built with ratatui: header with search, stats row,
/// filter bar, item list and preview, with the hook generator as a modal.
pub mod tui;

/// Hook generation modal state machine and timed notifications.
pub mod workflow;
