use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ArticleRecord;

/// An article persisted by an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArticle {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// Fields written when saving an article; the id is generated by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedArticle {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
}

impl From<&ArticleRecord> for NewSavedArticle {
    fn from(article: &ArticleRecord) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            content: article.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub article_id: i64,
    pub comment_text: String,
}

/// One row of the saved-articles left join: an article with at most one comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArticleRow {
    pub article: SavedArticle,
    pub comment: Option<Comment>,
}

/// Result of a save that may have completed only its first step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved {
        article_id: i64,
        comment_id: Option<i64>,
    },
    /// The article row exists but the comment insert failed; retry with
    /// `SavedArticleController::retry_comment`.
    CommentFailed { article_id: i64, reason: String },
}

impl SaveOutcome {
    pub fn article_id(&self) -> i64 {
        match self {
            SaveOutcome::Saved { article_id, .. } => *article_id,
            SaveOutcome::CommentFailed { article_id, .. } => *article_id,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}
