use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("News API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist {0}")]
    PersistenceWrite(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used by callers to pick user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    PersistenceRead,
    PersistenceWrite,
    AuthRequired,
    Validation,
    Other,
}

impl NewsError {
    /// Any failure while persisting `what`, including encoding the value.
    pub fn write_failed(what: &str, err: impl std::fmt::Display) -> Self {
        NewsError::PersistenceWrite(format!("{}: {}", what, err))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NewsError::Http(_) | NewsError::Api { .. } | NewsError::InvalidUrl(_) => {
                ErrorKind::Network
            }
            NewsError::Database(_) | NewsError::Serialization(_) => ErrorKind::PersistenceRead,
            NewsError::PersistenceWrite(_) => ErrorKind::PersistenceWrite,
            NewsError::AuthRequired => ErrorKind::AuthRequired,
            NewsError::Validation(_) => ErrorKind::Validation,
            NewsError::Io(_) | NewsError::NotFound(_) | NewsError::Config(_) => ErrorKind::Other,
        }
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Network => "Failed to fetch news articles. Try again later.".to_string(),
            ErrorKind::AuthRequired => {
                "Please log in to save articles and comments.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;
