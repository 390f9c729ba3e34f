use std::sync::Arc;

use crate::app::{NewsError, Result};
use crate::auth::Authenticator;
use crate::domain::{ArticleRecord, NewSavedArticle, SaveOutcome, SavedArticleRow};
use crate::store::SavedArticleStore;

/// Saved articles with comments. Every write requires a signed-in user and
/// is checked before the store is touched.
pub struct SavedArticleController {
    store: Arc<dyn SavedArticleStore + Send + Sync>,
    auth: Arc<dyn Authenticator + Send + Sync>,
}

impl SavedArticleController {
    pub fn new(
        store: Arc<dyn SavedArticleStore + Send + Sync>,
        auth: Arc<dyn Authenticator + Send + Sync>,
    ) -> Self {
        Self { store, auth }
    }

    fn require_user(&self) -> Result<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(NewsError::AuthRequired)
        }
    }

    fn non_blank(text: &str, what: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NewsError::Validation(format!("{} must not be blank", what)));
        }
        Ok(text.to_string())
    }

    /// Save `article`, plus a comment when `comment` is non-blank.
    ///
    /// If the article row is written but the comment is not, the article is
    /// kept and [`SaveOutcome::CommentFailed`] is returned.
    pub fn save_article(
        &self,
        article: &ArticleRecord,
        comment: Option<&str>,
    ) -> Result<SaveOutcome> {
        self.require_user()?;

        let article_id = self
            .store
            .insert_article(&NewSavedArticle::from(article))
            .map_err(|e| {
                tracing::error!("Failed to save article {}: {}", article.url, e);
                NewsError::write_failed("article", e)
            })?;

        let Some(text) = comment.map(str::trim).filter(|t| !t.is_empty()) else {
            tracing::info!("Saved article #{}", article_id);
            return Ok(SaveOutcome::Saved {
                article_id,
                comment_id: None,
            });
        };

        match self.store.insert_comment(article_id, text) {
            Ok(comment_id) => {
                tracing::info!("Saved article #{} with comment #{}", article_id, comment_id);
                Ok(SaveOutcome::Saved {
                    article_id,
                    comment_id: Some(comment_id),
                })
            }
            Err(e) => {
                tracing::warn!("Article #{} saved but comment failed: {}", article_id, e);
                Ok(SaveOutcome::CommentFailed {
                    article_id,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Second attempt at the comment of a partially completed save.
    pub fn retry_comment(&self, article_id: i64, text: &str) -> Result<i64> {
        let text = Self::non_blank(text, "comment")?;
        self.require_user()?;

        self.store
            .insert_comment(article_id, &text)
            .map_err(|e| NewsError::write_failed("comment", e))
    }

    /// Delete an article together with all of its comments.
    pub fn delete_article(&self, id: i64) -> Result<()> {
        self.require_user()?;

        let deleted = self
            .store
            .delete_article(id)
            .map_err(|e| NewsError::write_failed("article", e))?;
        if !deleted {
            return Err(NewsError::NotFound(format!("saved article #{}", id)));
        }

        tracing::info!("Deleted saved article #{}", id);
        Ok(())
    }

    pub fn update_comment(&self, comment_id: i64, new_text: &str) -> Result<()> {
        let text = Self::non_blank(new_text, "comment")?;
        self.require_user()?;

        let updated = self
            .store
            .update_comment(comment_id, &text)
            .map_err(|e| NewsError::write_failed("comment", e))?;
        if !updated {
            return Err(NewsError::NotFound(format!("comment #{}", comment_id)));
        }
        Ok(())
    }

    pub fn delete_comment(&self, comment_id: i64) -> Result<()> {
        self.require_user()?;

        let deleted = self
            .store
            .delete_comment(comment_id)
            .map_err(|e| NewsError::write_failed("comment", e))?;
        if !deleted {
            return Err(NewsError::NotFound(format!("comment #{}", comment_id)));
        }
        Ok(())
    }

    pub fn is_article_saved(&self, title: &str) -> bool {
        self.store.is_saved(title).unwrap_or_else(|e| {
            tracing::warn!("Failed to check saved state: {}", e);
            false
        })
    }

    /// Saved articles joined with their comments. Empty while signed out or
    /// when the store cannot be read.
    pub fn list_saved_with_comments(&self) -> Vec<SavedArticleRow> {
        if !self.auth.is_authenticated() {
            return Vec::new();
        }

        self.store.list_with_comments().unwrap_or_else(|e| {
            tracing::warn!("Failed to load saved articles: {}", e);
            Vec::new()
        })
    }
}
