pub mod bookmark;
pub mod saved;
pub mod search;

pub use bookmark::BookmarkController;
pub use saved::SavedArticleController;
pub use search::SearchController;
