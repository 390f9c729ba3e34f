use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{NewsError, Result};
use crate::client::{ApiArticle, ApiResponse, NewsApi, NewsQuery};
use crate::config::NewsApiConfig;

pub struct HttpNewsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpNewsClient {
    pub fn new(config: &NewsApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request_url(&self, query: &NewsQuery) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, query.path()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.params() {
                pairs.append_pair(name, &value);
            }
            if let Some(ref key) = self.api_key {
                pairs.append_pair("apiKey", key);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl NewsApi for HttpNewsClient {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<ApiArticle>> {
        let url = self.request_url(query)?;
        tracing::debug!("GET {} {:?}", query.path(), query.params());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let parsed = serde_json::from_slice::<ApiResponse>(&body);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").into());
            return Err(NewsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed.map_err(|e| NewsError::Api {
            status: status.as_u16(),
            message: format!("malformed response: {}", e),
        })?;

        if parsed.status != "ok" {
            return Err(NewsError::Api {
                status: status.as_u16(),
                message: parsed
                    .message
                    .or(parsed.code)
                    .unwrap_or_else(|| format!("status {}", parsed.status)),
            });
        }

        Ok(parsed.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ErrorKind;
    use crate::domain::{Category, Country, Source};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpNewsClient {
        let config = NewsApiConfig {
            base_url: format!("{}/v2", server.uri()),
            api_key: Some("test-key".into()),
            ..Default::default()
        };
        HttpNewsClient::new(&config).unwrap()
    }

    fn ok_body() -> serde_json::Value {
        json!({
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": "bbc-news", "name": "BBC News"},
                "title": "Headline",
                "description": null,
                "url": "https://bbc.co.uk/1",
                "urlToImage": null,
                "publishedAt": "2024-01-01T00:00:00Z",
                "content": null
            }]
        })
    }

    #[tokio::test]
    async fn test_top_headlines_sends_only_set_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/top-headlines"))
            .and(query_param("category", "business"))
            .and(query_param("country", "us"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param_is_missing("q"))
            .and(query_param_is_missing("from"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let query = NewsQuery::TopHeadlines {
            country: Some(Country::UnitedStates),
            category: Some(Category::Business),
            q: None,
            from: None,
            to: None,
        };
        let articles = client_for(&server).fetch(&query).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Headline"));
    }

    #[tokio::test]
    async fn test_everything_query_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("q", "climate"))
            .and(query_param("sources", "bbc-news"))
            .and(query_param_is_missing("language"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let query = NewsQuery::Everything {
            q: Some("climate".into()),
            sources: Some(Source::BbcNews),
            language: None,
            from: None,
            to: None,
        };
        let articles = client_for(&server).fetch(&query).await.unwrap();
        assert_eq!(articles[0].url.as_deref(), Some("https://bbc.co.uk/1"));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_network_kind() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid."
            })))
            .mount(&server)
            .await;

        let query = NewsQuery::Everything {
            q: Some("rust".into()),
            sources: None,
            language: None,
            from: None,
            to: None,
        };
        let err = client_for(&server).fetch(&query).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        match err {
            NewsError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Your API key is invalid.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_with_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "code": "rateLimited"
            })))
            .mount(&server)
            .await;

        let query = NewsQuery::TopHeadlines {
            country: Some(Country::Germany),
            category: None,
            q: None,
            from: None,
            to: None,
        };
        let err = client_for(&server).fetch(&query).await.unwrap_err();
        assert!(matches!(err, NewsError::Api { ref message, .. } if message == "rateLimited"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = NewsApiConfig {
            base_url: "http://127.0.0.1:1/v2".into(),
            ..Default::default()
        };
        let client = HttpNewsClient::new(&config).unwrap();
        let query = NewsQuery::Everything {
            q: Some("rust".into()),
            sources: None,
            language: None,
            from: None,
            to: None,
        };
        let err = client.fetch(&query).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
