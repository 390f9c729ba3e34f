use std::sync::Arc;

use crate::app::{NewsError, Result};
use crate::domain::{ArticleRecord, BookmarkSet};
use crate::store::KeyValueStore;

pub const BOOKMARKS_KEY: &str = "bookmarkedArticles";

/// Bookmark snapshot persisted as one JSON array under [`BOOKMARKS_KEY`].
#[derive(Clone)]
pub struct BookmarkStore {
    kv: Arc<dyn KeyValueStore + Send + Sync>,
}

impl BookmarkStore {
    pub fn new(kv: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { kv }
    }

    /// Read the persisted set. Missing or unreadable data yields an empty set.
    pub fn load(&self) -> BookmarkSet {
        let raw = match self.kv.get(BOOKMARKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BookmarkSet::new(),
            Err(e) => {
                tracing::warn!("Failed to read bookmarks, starting empty: {}", e);
                return BookmarkSet::new();
            }
        };

        match serde_json::from_str::<Vec<ArticleRecord>>(&raw) {
            Ok(articles) => BookmarkSet::from_articles(articles),
            Err(e) => {
                tracing::warn!("Discarding corrupt bookmark data: {}", e);
                BookmarkSet::new()
            }
        }
    }

    /// Replace the stored snapshot with `set`.
    pub fn save(&self, set: &BookmarkSet) -> Result<()> {
        let raw =
            serde_json::to_string(set).map_err(|e| NewsError::write_failed("bookmarks", e))?;
        self.kv.set(BOOKMARKS_KEY, &raw).map_err(|e| {
            tracing::error!("Failed to persist bookmarks: {}", e);
            NewsError::write_failed("bookmarks", e)
        })
    }
}
