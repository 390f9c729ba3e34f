pub mod bookmarks;
pub mod kv;
pub mod recent;
pub mod sqlite;
#[cfg(test)]
pub mod testing;

use crate::app::Result;
use crate::domain::{NewSavedArticle, SavedArticleRow};

pub use bookmarks::BookmarkStore;
pub use kv::{KeyValueStore, MemoryKvStore};
pub use recent::{RecentSearchStore, MAX_RECENT_SEARCHES};
pub use sqlite::SqliteStore;

/// Relational storage for saved articles and their comments.
///
/// Deleting an article must cascade to its comments.
pub trait SavedArticleStore {
    // Article operations
    fn insert_article(&self, article: &NewSavedArticle) -> Result<i64>;
    fn delete_article(&self, id: i64) -> Result<bool>;
    fn is_saved(&self, title: &str) -> Result<bool>;

    // Comment operations
    fn insert_comment(&self, article_id: i64, text: &str) -> Result<i64>;
    fn update_comment(&self, comment_id: i64, text: &str) -> Result<bool>;
    fn delete_comment(&self, comment_id: i64) -> Result<bool>;

    /// Every article joined with its comments; articles without comments
    /// appear once with `comment: None`.
    fn list_with_comments(&self) -> Result<Vec<SavedArticleRow>>;
}
