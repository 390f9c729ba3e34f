pub mod commands;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{Category, Country, DateRange, Language, SearchFilterState, Source};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Search, bookmark and save news articles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search articles by keyword and filters
    Search(SearchArgs),
    /// Show trending headlines
    Trending {
        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,
    },
    /// Manage bookmarked articles
    Bookmarks {
        #[command(subcommand)]
        action: Option<BookmarkAction>,
    },
    /// List recent search terms
    Recent,
    /// Manage saved articles and comments (requires login)
    Saved {
        #[command(subcommand)]
        action: Option<SavedAction>,
    },
    /// Sign in on this device
    Login {
        /// Account email
        email: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Search keyword
    pub keyword: Option<String>,

    /// Category (business, entertainment, general, health, science, sports, technology)
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Source (cnn, bbc-news)
    #[arg(short, long)]
    pub source: Option<Source>,

    /// Country (us, gb, fi, de)
    #[arg(long)]
    pub country: Option<Country>,

    /// Language (en, fr, es)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Toggle the bookmark on result N (1-based)
    #[arg(long, value_name = "N")]
    pub bookmark: Option<usize>,

    /// Save result N (1-based) to your saved articles
    #[arg(long, value_name = "N")]
    pub save: Option<usize>,

    /// Comment to attach when saving
    #[arg(long, requires = "save")]
    pub comment: Option<String>,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilterState {
        SearchFilterState {
            keyword: self.keyword.clone().unwrap_or_default(),
            category: self.category,
            source: self.source,
            country: self.country,
            language: self.language,
            date_range: DateRange {
                from: self.from,
                to: self.to,
            },
        }
    }
}

#[derive(Subcommand)]
pub enum BookmarkAction {
    /// List bookmarks
    List,
    /// Remove a bookmark by article URL
    Remove { url: String },
    /// Open bookmark N (1-based) in the browser
    Open { index: usize },
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved articles with their comments
    List,
    /// Delete a saved article and its comments
    Delete { id: i64 },
    /// Add a comment to a saved article
    Comment { article_id: i64, text: String },
    /// Replace the text of a comment
    EditComment { comment_id: i64, text: String },
    /// Delete a comment
    DeleteComment { comment_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_filters() {
        let cli = Cli::try_parse_from([
            "newsdesk", "search", "climate", "--source", "bbc-news", "--from", "2024-01-01",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        let filters = args.filters();
        assert_eq!(filters.keyword, "climate");
        assert_eq!(filters.source, Some(Source::BbcNews));
        assert_eq!(filters.date_range.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filters.date_range.to, None);
    }

    #[test]
    fn test_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["newsdesk", "search", "--category", "gossip"]).is_err());
    }

    #[test]
    fn test_comment_requires_save() {
        assert!(Cli::try_parse_from(["newsdesk", "search", "rust", "--comment", "hi"]).is_err());
    }

    #[test]
    fn test_saved_subcommands() {
        let cli =
            Cli::try_parse_from(["newsdesk", "saved", "edit-comment", "3", "better text"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Saved {
                action: Some(SavedAction::EditComment { comment_id: 3, .. })
            }
        ));
    }
}
