use std::sync::{Arc, Mutex};

use crate::app::{NewsError, Result};
use crate::store::KeyValueStore;

pub const RECENT_SEARCHES_KEY: &str = "recentSearches";
pub const MAX_RECENT_SEARCHES: usize = 10;

/// Most-recent-first list of search terms, bounded and deduplicated.
///
/// Clones share one write lock, so concurrent records never drop a term.
#[derive(Clone)]
pub struct RecentSearchStore {
    kv: Arc<dyn KeyValueStore + Send + Sync>,
    write_lock: Arc<Mutex<()>>,
}

impl RecentSearchStore {
    pub fn new(kv: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self {
            kv,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Move `term` to the front, evicting the oldest entry past the limit.
    /// A blank term returns the current list without writing.
    pub fn record_search(&self, term: &str) -> Result<Vec<String>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(self.load_recent());
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| NewsError::write_failed("recent searches", e))?;

        let mut recent = self.load_recent();
        recent.retain(|t| t != term);
        recent.insert(0, term.to_string());
        recent.truncate(MAX_RECENT_SEARCHES);

        let raw = serde_json::to_string(&recent)
            .map_err(|e| NewsError::write_failed("recent searches", e))?;
        self.kv.set(RECENT_SEARCHES_KEY, &raw).map_err(|e| {
            tracing::warn!("Failed to persist recent searches: {}", e);
            NewsError::write_failed("recent searches", e)
        })?;

        Ok(recent)
    }

    /// Persisted list, or empty on absence or corruption.
    pub fn load_recent(&self) -> Vec<String> {
        match self.kv.get(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding corrupt recent searches: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read recent searches: {}", e);
                Vec::new()
            }
        }
    }
}
