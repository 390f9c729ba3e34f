use crate::app::{AppContext, NewsError, Result};
use crate::auth::Authenticator;
use crate::cli::{BookmarkAction, Commands, SavedAction, SearchArgs};
use crate::domain::{ArticleRecord, SaveOutcome};

/// Execute one parsed command. Errors are returned unprinted; the caller
/// reports them.
pub async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search(ctx, &args).await,
        Commands::Trending { watch } => trending(ctx, watch).await,
        Commands::Bookmarks { action } => match action.unwrap_or(BookmarkAction::List) {
            BookmarkAction::List => list_bookmarks(ctx),
            BookmarkAction::Remove { url } => remove_bookmark(ctx, &url).await,
            BookmarkAction::Open { index } => open_bookmark(ctx, index),
        },
        Commands::Recent => list_recent(ctx),
        Commands::Saved { action } => match action.unwrap_or(SavedAction::List) {
            SavedAction::List => list_saved(ctx),
            SavedAction::Delete { id } => delete_saved(ctx, id),
            SavedAction::Comment { article_id, text } => add_comment(ctx, article_id, &text),
            SavedAction::EditComment { comment_id, text } => edit_comment(ctx, comment_id, &text),
            SavedAction::DeleteComment { comment_id } => delete_comment(ctx, comment_id),
        },
        Commands::Login { email } => login(ctx, &email),
        Commands::Logout => logout(ctx),
        Commands::Whoami => {
            whoami(ctx);
            Ok(())
        }
    }
}

fn pick<'a>(articles: &'a [ArticleRecord], index: usize) -> Result<&'a ArticleRecord> {
    index
        .checked_sub(1)
        .and_then(|i| articles.get(i))
        .ok_or_else(|| {
            NewsError::Validation(format!(
                "No result #{} (have {})",
                index,
                articles.len()
            ))
        })
}

fn print_article(ctx: &AppContext, n: usize, article: &ArticleRecord) {
    let marker = if ctx.bookmarks.is_bookmarked(&article.url) {
        "★"
    } else {
        " "
    };
    let source = article
        .source_name
        .as_deref()
        .map(|s| format!(" ({})", s))
        .unwrap_or_default();
    println!("{:>3}. {} {}{}", n, marker, article.title, source);
    println!("       {}", article.display_description());
    println!("       {}", article.url);
}

pub async fn search(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let filters = args.filters();
    if filters.is_empty() {
        println!("Enter a keyword or pick at least one filter");
        return Ok(());
    }

    let articles = ctx.search.search(&filters).await?;

    if articles.is_empty() {
        println!("No articles found");
        return Ok(());
    }

    for (i, article) in articles.iter().enumerate() {
        print_article(ctx, i + 1, article);
    }

    if let Some(n) = args.bookmark {
        let article = pick(&articles, n)?;
        ctx.bookmarks.toggle_bookmark(article).await?;
        if ctx.bookmarks.is_bookmarked(&article.url) {
            println!("Bookmarked: {}", article.title);
        } else {
            println!("Removed bookmark: {}", article.title);
        }
    }

    if let Some(n) = args.save {
        let article = pick(&articles, n)?;
        save_article(ctx, article, args.comment.as_deref())?;
    }

    Ok(())
}

fn save_article(ctx: &AppContext, article: &ArticleRecord, comment: Option<&str>) -> Result<()> {
    if ctx.saved.is_article_saved(&article.title) {
        println!("Already saved: {}", article.title);
        return Ok(());
    }

    match ctx.saved.save_article(article, comment)? {
        SaveOutcome::Saved { article_id, .. } => {
            println!("Saved #{}: {}", article_id, article.title);
        }
        SaveOutcome::CommentFailed { article_id, reason } => {
            eprintln!(
                "Saved #{} but the comment was not stored ({}). Retry with: newsdesk saved comment {} \"...\"",
                article_id, reason, article_id
            );
        }
    }
    Ok(())
}

pub async fn trending(ctx: &AppContext, watch: bool) -> Result<()> {
    if !watch {
        return print_trending(ctx).await;
    }

    let mut ticker = tokio::time::interval(ctx.config.trending.refresh_interval());
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // A failed refresh keeps the loop alive until the next tick
                if let Err(e) = print_trending(ctx).await {
                    tracing::warn!("Trending refresh failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Stopping trending refresh");
                return Ok(());
            }
        }
    }
}

async fn print_trending(ctx: &AppContext) -> Result<()> {
    let articles = ctx.search.trending().await?;
    println!("Trending News");
    for (i, article) in articles.iter().enumerate() {
        println!("{:>3}. {}", i + 1, article.title);
        println!("       {}", article.url);
    }
    Ok(())
}

pub fn list_bookmarks(ctx: &AppContext) -> Result<()> {
    let bookmarks = ctx.bookmarks.load_bookmarks();

    if bookmarks.is_empty() {
        println!("No articles bookmarked yet.");
        return Ok(());
    }

    for (i, article) in bookmarks.iter().enumerate() {
        print_article(ctx, i + 1, article);
    }
    Ok(())
}

pub async fn remove_bookmark(ctx: &AppContext, url: &str) -> Result<()> {
    match ctx.bookmarks.remove_bookmark(url).await? {
        Some(article) => println!("Removed bookmark: {}", article.title),
        None => println!("Not bookmarked: {}", url),
    }
    Ok(())
}

pub fn open_bookmark(ctx: &AppContext, index: usize) -> Result<()> {
    let bookmarks = ctx.bookmarks.load_bookmarks();
    let article = pick(bookmarks.as_slice(), index)?;
    open::that(&article.url)?;
    Ok(())
}

pub fn list_recent(ctx: &AppContext) -> Result<()> {
    let recent = ctx.recent.load_recent();

    if recent.is_empty() {
        println!("No recent searches");
        return Ok(());
    }

    for term in recent {
        println!("{}", term);
    }
    Ok(())
}

pub fn list_saved(ctx: &AppContext) -> Result<()> {
    if !ctx.auth.is_authenticated() {
        println!("Please log in to view your saved articles and comments.");
        return Ok(());
    }

    let rows = ctx.saved.list_saved_with_comments();
    if rows.is_empty() {
        println!("No saved articles");
        return Ok(());
    }

    let mut last_article = None;
    for row in rows {
        if last_article != Some(row.article.id) {
            println!("#{} {}", row.article.id, row.article.title);
            if let Some(ref description) = row.article.description {
                println!("    {}", description);
            }
            last_article = Some(row.article.id);
        }
        match row.comment {
            Some(comment) => println!("    [comment {}] {}", comment.id, comment.comment_text),
            None => println!("    No comments for this article."),
        }
    }
    Ok(())
}

pub fn delete_saved(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.saved.delete_article(id)?;
    println!("Deleted saved article #{}", id);
    Ok(())
}

pub fn add_comment(ctx: &AppContext, article_id: i64, text: &str) -> Result<()> {
    let comment_id = ctx.saved.retry_comment(article_id, text)?;
    println!("Added comment #{} to article #{}", comment_id, article_id);
    Ok(())
}

pub fn edit_comment(ctx: &AppContext, comment_id: i64, text: &str) -> Result<()> {
    ctx.saved.update_comment(comment_id, text)?;
    println!("Updated comment #{}", comment_id);
    Ok(())
}

pub fn delete_comment(ctx: &AppContext, comment_id: i64) -> Result<()> {
    ctx.saved.delete_comment(comment_id)?;
    println!("Deleted comment #{}", comment_id);
    Ok(())
}

pub fn login(ctx: &AppContext, email: &str) -> Result<()> {
    let user = ctx.auth.sign_in(email)?;
    println!("Logged in as {}", user.email);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.auth.sign_out()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) {
    match ctx.auth.current_user() {
        Some(user) => println!("{}", user.email),
        None => println!("Not logged in"),
    }
}
