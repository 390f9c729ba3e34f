use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{NewsError, Result};
use crate::domain::{Comment, NewSavedArticle, SavedArticle, SavedArticleRow};
use crate::store::{KeyValueStore, SavedArticleStore};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| NewsError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            NewsError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| s.parse::<DateTime<Utc>>().ok())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;

        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }
}

impl SavedArticleStore for SqliteStore {
    fn insert_article(&self, article: &NewSavedArticle) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO articles (title, description, content, saved_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                article.title,
                article.description,
                article.content,
                Utc::now().to_rfc3339()
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn delete_article(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM articles WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    fn is_saved(&self, title: &str) -> Result<bool> {
        let conn = self.conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE title = ?1",
            params![title],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn insert_comment(&self, article_id: i64, text: &str) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO comments (article_id, comment_text) VALUES (?1, ?2)",
            params![article_id, text],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn update_comment(&self, comment_id: i64, text: &str) -> Result<bool> {
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE comments SET comment_text = ?1 WHERE id = ?2",
            params![text, comment_id],
        )?;

        Ok(updated > 0)
    }

    fn delete_comment(&self, comment_id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let deleted = conn.execute("DELETE FROM comments WHERE id = ?1", params![comment_id])?;
        Ok(deleted > 0)
    }

    fn list_with_comments(&self) -> Result<Vec<SavedArticleRow>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT a.id, a.title, a.description, a.content, a.saved_at, c.id, c.comment_text
             FROM articles a
             LEFT JOIN comments c ON a.id = c.article_id
             ORDER BY a.id, c.id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let article_id: i64 = row.get(0)?;
                let comment_id: Option<i64> = row.get(5)?;
                let comment_text: Option<String> = row.get(6)?;

                Ok(SavedArticleRow {
                    article: SavedArticle {
                        id: article_id,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        content: row.get(3)?,
                        saved_at: row
                            .get::<_, String>(4)
                            .ok()
                            .and_then(|s| Self::parse_datetime(&s))
                            .unwrap_or_else(Utc::now),
                    },
                    comment: comment_id.map(|id| Comment {
                        id,
                        article_id,
                        comment_text: comment_text.unwrap_or_default(),
                    }),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
