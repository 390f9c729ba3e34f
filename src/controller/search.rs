use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use html_escape::decode_html_entities;

use crate::app::{NewsError, Result};
use crate::client::{ApiArticle, NewsApi, NewsQuery};
use crate::config::TrendingConfig;
use crate::domain::{
    ArticleRecord, Country, SearchFilterState, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE,
};
use crate::store::RecentSearchStore;

const REMOVED_TITLE: &str = "[Removed]";

/// Turns filter state into news API requests.
pub struct SearchController {
    api: Arc<dyn NewsApi + Send + Sync>,
    recent: Option<RecentSearchStore>,
    trending: TrendingConfig,
    latest: AtomicU64,
}

impl SearchController {
    pub fn new(api: Arc<dyn NewsApi + Send + Sync>) -> Self {
        Self {
            api,
            recent: None,
            trending: TrendingConfig::default(),
            latest: AtomicU64::new(0),
        }
    }

    /// Record keywords of successful searches in `recent`.
    pub fn with_recent(mut self, recent: RecentSearchStore) -> Self {
        self.recent = Some(recent);
        self
    }

    pub fn with_trending(mut self, trending: TrendingConfig) -> Self {
        self.trending = trending;
        self
    }

    /// Pick the endpoint for `filters`.
    ///
    /// Category or country selects top headlines; otherwise source,
    /// language or a keyword selects the full archive. With nothing set
    /// there is no query to run.
    pub fn route(filters: &SearchFilterState) -> Option<NewsQuery> {
        let q = filters.keyword().map(str::to_string);
        let from = filters.date_range.from_param();
        let to = filters.date_range.to_param();

        if filters.has_headline_facets() {
            Some(NewsQuery::TopHeadlines {
                country: filters.country,
                category: filters.category,
                q,
                from,
                to,
            })
        } else if filters.has_everything_facets() {
            Some(NewsQuery::Everything {
                q,
                sources: filters.source,
                language: filters.language,
                from,
                to,
            })
        } else {
            None
        }
    }

    /// Run a search. Zero matches is an empty list; a failed request is an error.
    pub async fn search(&self, filters: &SearchFilterState) -> Result<Vec<ArticleRecord>> {
        let Some(query) = Self::route(filters) else {
            tracing::debug!("No filters set, skipping search");
            return Ok(Vec::new());
        };

        let articles = self.api.fetch(&query).await.map_err(|e| {
            tracing::warn!("Search against {} failed: {}", query.path(), e);
            e
        })?;
        let articles = normalize(articles);
        tracing::info!("Search returned {} articles", articles.len());

        if let (Some(recent), Some(keyword)) = (&self.recent, filters.keyword()) {
            if let Err(e) = recent.record_search(keyword) {
                tracing::warn!("Could not record recent search: {}", e);
            }
        }

        Ok(articles)
    }

    /// Like [`search`](Self::search), but yields `None` when another search
    /// started on this controller before this one finished.
    pub async fn search_latest(
        &self,
        filters: &SearchFilterState,
    ) -> Result<Option<Vec<ArticleRecord>>> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.search(filters).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!("Dropping superseded search #{}", ticket);
            return Ok(None);
        }
        result.map(Some)
    }

    /// Top headlines for the configured country, without removed entries.
    pub async fn trending(&self) -> Result<Vec<ArticleRecord>> {
        let country = self
            .trending
            .country
            .parse::<Country>()
            .map_err(NewsError::Config)?;

        let query = NewsQuery::TopHeadlines {
            country: Some(country),
            category: None,
            q: None,
            from: None,
            to: None,
        };

        let articles = self.api.fetch(&query).await?;
        Ok(normalize(articles)
            .into_iter()
            .filter(|a| a.title != REMOVED_TITLE)
            .take(self.trending.limit)
            .collect())
    }
}

fn decode(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
        .map(|s| decode_html_entities(&s).to_string())
}

/// Convert wire articles to records, filling placeholders. Entries without
/// a url cannot be identified and are dropped.
fn normalize(articles: Vec<ApiArticle>) -> Vec<ArticleRecord> {
    articles
        .into_iter()
        .filter_map(|a| {
            let url = a.url.filter(|u| !u.trim().is_empty())?;
            Some(ArticleRecord {
                url,
                title: decode(a.title).unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
                description: Some(
                    decode(a.description).unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string()),
                ),
                content: a.content,
                image_url: a.url_to_image,
                source_name: a.source.and_then(|s| s.name),
            })
        })
        .collect()
}
