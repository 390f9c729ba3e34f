pub mod article;
pub mod bookmark;
pub mod filter;
pub mod saved;
pub mod user;

pub use article::{ArticleRecord, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE};
pub use bookmark::BookmarkSet;
pub use filter::{Category, Country, DateRange, Language, SearchFilterState, Source};
pub use saved::{Comment, NewSavedArticle, SaveOutcome, SavedArticle, SavedArticleRow};
pub use user::User;
