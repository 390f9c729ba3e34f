use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{NewsError, Result};
use crate::auth::{AuthSession, LocalAuthProvider};
use crate::client::{HttpNewsClient, NewsApi};
use crate::config::Config;
use crate::controller::{BookmarkController, SavedArticleController, SearchController};
use crate::store::{BookmarkStore, KeyValueStore, RecentSearchStore, SavedArticleStore, SqliteStore};

/// Shared application state handed to every command. The auth provider is
/// the single writer of the session; controllers only read it.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<AuthSession>,
    pub auth: LocalAuthProvider,
    pub recent: RecentSearchStore,
    pub search: SearchController,
    pub bookmarks: BookmarkController,
    pub saved: SavedArticleController,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match config.storage.database_path.clone() {
            Some(p) => p,
            None => Self::default_db_path()?,
        };
        let store = Arc::new(SqliteStore::new(&db_path)?);
        let api: Arc<dyn NewsApi + Send + Sync> = Arc::new(HttpNewsClient::new(&config.news_api)?);
        Ok(Self::with_parts(config, store, api))
    }

    pub fn in_memory(config: Config, api: Arc<dyn NewsApi + Send + Sync>) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Ok(Self::with_parts(config, store, api))
    }

    fn with_parts(
        config: Config,
        store: Arc<SqliteStore>,
        api: Arc<dyn NewsApi + Send + Sync>,
    ) -> Self {
        let kv: Arc<dyn KeyValueStore + Send + Sync> = store.clone();
        let saved_store: Arc<dyn SavedArticleStore + Send + Sync> = store;

        let session = Arc::new(AuthSession::new());
        let auth = LocalAuthProvider::new(kv.clone(), session.clone());
        auth.restore();

        let recent = RecentSearchStore::new(kv.clone());
        let search = SearchController::new(api)
            .with_recent(recent.clone())
            .with_trending(config.trending.clone());
        let bookmarks = BookmarkController::new(BookmarkStore::new(kv));
        let saved = SavedArticleController::new(saved_store, session.clone());

        Self {
            config,
            session,
            auth,
            recent,
            search,
            bookmarks,
            saved,
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewsError::Config("Could not find data directory".into()))?;
        let newsdesk_dir = data_dir.join("newsdesk");
        std::fs::create_dir_all(&newsdesk_dir)?;
        Ok(newsdesk_dir.join("newsdesk.db"))
    }
}
