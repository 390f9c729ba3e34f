pub mod http_client;

use async_trait::async_trait;
use serde::Deserialize;

use crate::app::Result;
use crate::domain::{Category, Country, Language, Source};

pub use http_client::HttpNewsClient;

/// One request against the news API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsQuery {
    /// Breaking headlines, narrowed by country and/or category.
    TopHeadlines {
        country: Option<Country>,
        category: Option<Category>,
        q: Option<String>,
        from: Option<String>,
        to: Option<String>,
    },
    /// Full archive search.
    Everything {
        q: Option<String>,
        sources: Option<Source>,
        language: Option<Language>,
        from: Option<String>,
        to: Option<String>,
    },
}

impl NewsQuery {
    pub fn path(&self) -> &'static str {
        match self {
            NewsQuery::TopHeadlines { .. } => "top-headlines",
            NewsQuery::Everything { .. } => "everything",
        }
    }

    /// Query parameters in request order. Unset and empty values are left out.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let pairs: Vec<(&'static str, Option<String>)> = match self {
            NewsQuery::TopHeadlines {
                country,
                category,
                q,
                from,
                to,
            } => vec![
                ("country", country.map(|c| c.as_str().to_string())),
                ("category", category.map(|c| c.as_str().to_string())),
                ("q", q.clone()),
                ("from", from.clone()),
                ("to", to.clone()),
            ],
            NewsQuery::Everything {
                q,
                sources,
                language,
                from,
                to,
            } => vec![
                ("q", q.clone()),
                ("sources", sources.map(|s| s.as_str().to_string())),
                ("language", language.map(|l| l.as_str().to_string())),
                ("from", from.clone()),
                ("to", to.clone()),
            ],
        };

        pairs
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (name, v))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Article as it appears on the wire. Every field may be missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiArticle {
    pub source: Option<ApiSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub articles: Vec<ApiArticle>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait NewsApi {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<ApiArticle>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_headlines_params_skip_unset() {
        let query = NewsQuery::TopHeadlines {
            country: Some(Country::UnitedStates),
            category: Some(Category::Business),
            q: None,
            from: None,
            to: None,
        };
        assert_eq!(query.path(), "top-headlines");
        assert_eq!(
            query.params(),
            vec![
                ("country", "us".to_string()),
                ("category", "business".to_string())
            ]
        );
    }

    #[test]
    fn test_everything_params_skip_empty_strings() {
        let query = NewsQuery::Everything {
            q: Some("climate".into()),
            sources: Some(Source::BbcNews),
            language: None,
            from: Some(String::new()),
            to: Some("2024-02-01".into()),
        };
        assert_eq!(query.path(), "everything");
        assert_eq!(
            query.params(),
            vec![
                ("q", "climate".to_string()),
                ("sources", "bbc-news".to_string()),
                ("to", "2024-02-01".to_string())
            ]
        );
    }

    #[test]
    fn test_api_article_tolerates_nulls() {
        let json = r#"{"source":{"id":null,"name":"BBC News"},"title":null,"url":"https://bbc.co.uk/1"}"#;
        let article: ApiArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, None);
        assert_eq!(article.source.unwrap().name, Some("BBC News".into()));
    }
}
