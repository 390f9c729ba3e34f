use tokio::sync::Mutex;

use crate::app::Result;
use crate::domain::{ArticleRecord, BookmarkSet};
use crate::store::BookmarkStore;

/// Toggles bookmark membership. Every toggle reads the latest snapshot,
/// flips one entry and writes the whole set back. Toggles are applied
/// one at a time in call order.
pub struct BookmarkController {
    store: BookmarkStore,
    write_lock: Mutex<()>,
}

impl BookmarkController {
    pub fn new(store: BookmarkStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn toggle_bookmark(&self, article: &ArticleRecord) -> Result<BookmarkSet> {
        let _guard = self.write_lock.lock().await;

        let mut set = self.store.load();
        let bookmarked = set.toggle(article);
        self.store.save(&set)?;

        tracing::info!(
            "{} bookmark {}",
            if bookmarked { "Added" } else { "Removed" },
            article.url
        );
        Ok(set)
    }

    /// Remove a bookmark by url. Returns the removed article, if it was present.
    pub async fn remove_bookmark(&self, url: &str) -> Result<Option<ArticleRecord>> {
        let _guard = self.write_lock.lock().await;

        let mut set = self.store.load();
        let Some(article) = set.get(url).cloned() else {
            return Ok(None);
        };
        set.toggle(&article);
        self.store.save(&set)?;

        tracing::info!("Removed bookmark {}", url);
        Ok(Some(article))
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.store.load().contains(url)
    }

    pub fn load_bookmarks(&self) -> BookmarkSet {
        self.store.load()
    }
}
