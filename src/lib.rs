//! # Newsdesk
//!
//! A terminal news reader over NewsAPI with endless scrolling.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Controller → Store → UI
//! ```
//!
//! - [`fetcher`]: HTTP gateway for the headline and paged article lists
//! - [`normalizer`]: Converts provider JSON into domain articles
//! - [`controller`]: Refresh, search and load-more with stale-result discarding
//! - [`store`]: Observable state that replays the latest value to subscribers
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the headline and the first two pages of the default feed
//! newsdesk headlines --pages 2
//!
//! # Search
//! newsdesk search "harga beras"
//!
//! # Launch TUI
//! newsdesk
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config, gateway
/// and controller.
pub mod app;

/// Configuration management.
///
/// Loads from `~/.config/newsdesk/config.toml`, supporting:
/// - API endpoint, credential and paging options
/// - Custom keybindings
pub mod config;

/// Command-line interface using clap.
///
/// - `headlines [--pages N]` - Print the headline and default feed
/// - `search <query> [--pages N]` - Print search results
/// - `tui` - Launch the TUI (default)
pub mod cli;

/// Pagination controller and view state.
pub mod controller;

/// Core domain models.
///
/// - [`Article`](domain::Article): A normalized news article
pub mod domain;

/// Article gateway.
///
/// - [`ArticleGateway`](fetcher::ArticleGateway): Async trait for headline and page fetches
/// - [`NewsApiGateway`](fetcher::NewsApiGateway): reqwest-based implementation
/// - [`RetryingGateway`](fetcher::RetryingGateway): Retries transient failures with backoff
pub mod fetcher;

/// Provider response parsing and normalization.
pub mod normalizer;

/// Replay-latest state store.
pub mod store;

/// Terminal user interface.
///
/// Search bar, headline pane and an article list that loads the next page
/// as the cursor nears the end.
///
/// Keybindings: j/k navigate, / searches, o opens in browser, R refreshes,
/// m loads more, q quits.
pub mod tui;
