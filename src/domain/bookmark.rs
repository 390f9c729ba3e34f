use serde::{Deserialize, Serialize};

use crate::domain::ArticleRecord;

/// Ordered set of bookmarked articles keyed by `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookmarkSet {
    articles: Vec<ArticleRecord>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a possibly duplicated list, keeping the first entry per url.
    pub fn from_articles(articles: Vec<ArticleRecord>) -> Self {
        let mut set = Self::new();
        for article in articles {
            if !set.contains(&article.url) {
                set.articles.push(article);
            }
        }
        set
    }

    pub fn contains(&self, url: &str) -> bool {
        self.articles.iter().any(|a| a.url == url)
    }

    pub fn get(&self, url: &str) -> Option<&ArticleRecord> {
        self.articles.iter().find(|a| a.url == url)
    }

    /// Remove the article if present, append it otherwise.
    /// Returns `true` when the article is bookmarked afterwards.
    pub fn toggle(&mut self, article: &ArticleRecord) -> bool {
        if self.contains(&article.url) {
            self.articles.retain(|a| a.url != article.url);
            false
        } else {
            self.articles.push(article.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.articles.iter()
    }

    pub fn as_slice(&self) -> &[ArticleRecord] {
        &self.articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str) -> ArticleRecord {
        ArticleRecord::new(url, format!("Title for {}", url))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut set = BookmarkSet::new();
        assert!(set.toggle(&article("https://example.com/1")));
        assert!(set.contains("https://example.com/1"));
        assert!(!set.toggle(&article("https://example.com/1")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let mut set = BookmarkSet::new();
        set.toggle(&article("https://example.com/1"));
        set.toggle(&article("https://example.com/2"));
        set.toggle(&article("https://example.com/3"));
        set.toggle(&article("https://example.com/2"));

        let urls: Vec<&str> = set.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.com/1", "https://example.com/3"]);
    }

    #[test]
    fn test_from_articles_drops_duplicate_urls() {
        let mut dup = article("https://example.com/1");
        dup.title = "Other".into();
        let set = BookmarkSet::from_articles(vec![article("https://example.com/1"), dup]);
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("https://example.com/1").unwrap().title,
            "Title for https://example.com/1"
        );
    }
}
