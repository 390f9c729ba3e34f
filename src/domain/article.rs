use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_TITLE: &str = "No Title Available";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// A single news item as returned by the remote search endpoint.
///
/// `url` is the identity key; records are stored verbatim and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
}

impl ArticleRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: None,
            content: None,
            image_url: None,
            source_name: None,
        }
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(PLACEHOLDER_DESCRIPTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let json = r#"{"url":"https://example.com/a","title":"A"}"#;
        let article: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(article, ArticleRecord::new("https://example.com/a", "A"));
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let mut article = ArticleRecord::new("https://example.com/a", "A");
        article.image_url = Some("https://example.com/a.png".into());
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"sourceName\""));
    }

    #[test]
    fn test_display_description_placeholder() {
        let article = ArticleRecord::new("https://example.com/a", "A");
        assert_eq!(article.display_description(), PLACEHOLDER_DESCRIPTION);
    }
}
