//! Test doubles for the persistence traits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::app::{NewsError, Result};
use crate::domain::{NewSavedArticle, SavedArticleRow};
use crate::store::{KeyValueStore, MemoryKvStore, SavedArticleStore, SqliteStore};

/// Every read and write fails.
#[derive(Debug, Default)]
pub struct FailingKvStore;

impl FailingKvStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for FailingKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Err(NewsError::Io(std::io::Error::other(format!(
            "read of {} refused",
            key
        ))))
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(NewsError::Io(std::io::Error::other(format!(
            "write of {} refused",
            key
        ))))
    }
}

/// In-memory store that counts writes.
#[derive(Debug, Default)]
pub struct CountingKvStore {
    inner: MemoryKvStore,
    writes: AtomicUsize,
}

impl CountingKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for CountingKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}

/// Wraps an in-memory SQLite store, recording every write call and
/// optionally failing comment inserts.
pub struct SpySavedStore {
    inner: SqliteStore,
    writes: Mutex<Vec<&'static str>>,
    fail_comments: bool,
}

impl SpySavedStore {
    pub fn new() -> Self {
        Self {
            inner: SqliteStore::in_memory().expect("in-memory store"),
            writes: Mutex::new(Vec::new()),
            fail_comments: false,
        }
    }

    pub fn failing_comments() -> Self {
        Self {
            fail_comments: true,
            ..Self::new()
        }
    }

    pub fn writes(&self) -> Vec<&'static str> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str) {
        self.writes.lock().unwrap().push(op);
    }
}

impl SavedArticleStore for SpySavedStore {
    fn insert_article(&self, article: &NewSavedArticle) -> Result<i64> {
        self.record("insert_article");
        self.inner.insert_article(article)
    }

    fn delete_article(&self, id: i64) -> Result<bool> {
        self.record("delete_article");
        self.inner.delete_article(id)
    }

    fn is_saved(&self, title: &str) -> Result<bool> {
        self.inner.is_saved(title)
    }

    fn insert_comment(&self, article_id: i64, text: &str) -> Result<i64> {
        self.record("insert_comment");
        if self.fail_comments {
            return Err(NewsError::Database(rusqlite::Error::InvalidQuery));
        }
        self.inner.insert_comment(article_id, text)
    }

    fn update_comment(&self, comment_id: i64, text: &str) -> Result<bool> {
        self.record("update_comment");
        self.inner.update_comment(comment_id, text)
    }

    fn delete_comment(&self, comment_id: i64) -> Result<bool> {
        self.record("delete_comment");
        self.inner.delete_comment(comment_id)
    }

    fn list_with_comments(&self) -> Result<Vec<SavedArticleRow>> {
        self.inner.list_with_comments()
    }
}
