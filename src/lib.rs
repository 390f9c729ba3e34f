//! # Newsdesk
//!
//! A news-browsing client: keyword and filtered search against a REST news
//! API, local bookmarks, recent searches, and saved articles with comments
//! for signed-in users.
//!
//! ## Architecture
//!
//! ```text
//! SearchFilterState → SearchController → NewsApi
//!                            ↓
//!          BookmarkController / SavedArticleController → Store
//! ```
//!
//! - [`client`]: HTTP client for the news API
//! - [`controller`]: Search routing, bookmark toggling, saved articles
//! - [`store`]: Key-value and SQLite persistence
//! - [`auth`]: Observable authentication session
//!
//! ## Quick Start
//!
//! ```bash
//! # Search with filters
//! newsdesk search climate --source bbc-news
//!
//! # Top headlines for a category
//! newsdesk search --category business --country us
//!
//! # Bookmark the second result
//! newsdesk search rust --bookmark 2
//!
//! # Save an article with a comment
//! newsdesk login reader@example.com
//! newsdesk search rust --save 1 --comment "read later"
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all components:
/// stores, HTTP client, auth session and controllers.
pub mod app;

/// Authentication session.
///
/// - [`Authenticator`](auth::Authenticator): read-only signed-in check
/// - [`AuthSession`](auth::AuthSession): observable user, unsubscribe on drop
/// - [`LocalAuthProvider`](auth::LocalAuthProvider): device-local sign-in
pub mod auth;

/// Command-line interface using clap.
pub mod cli;

/// News API client.
///
/// - [`NewsApi`](client::NewsApi): Async trait for issuing queries
/// - [`NewsQuery`](client::NewsQuery): top-headlines and everything shapes
/// - [`HttpNewsClient`](client::HttpNewsClient): reqwest-based implementation
pub mod client;

/// Configuration loaded from `~/.config/newsdesk/config.toml`.
pub mod config;

/// Controllers used by the UI layer.
pub mod controller;

/// Core domain models.
///
/// - [`ArticleRecord`](domain::ArticleRecord): a news item keyed by url
/// - [`BookmarkSet`](domain::BookmarkSet): ordered set of bookmarks
/// - [`SearchFilterState`](domain::SearchFilterState): query plus facets
/// - [`SavedArticle`](domain::SavedArticle), [`Comment`](domain::Comment)
pub mod domain;

/// Persistence.
///
/// - [`KeyValueStore`](store::KeyValueStore): string key-value storage
/// - [`SavedArticleStore`](store::SavedArticleStore): articles and comments
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation of both
pub mod store;
