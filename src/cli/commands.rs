use std::fmt::Write;

use crate::app::{AppContext, Result};
use crate::controller::ViewState;
use crate::domain::Article;

pub async fn headlines(ctx: &AppContext, pages: u32) -> Result<()> {
    ctx.controller.refresh().await?;
    load_more_pages(ctx, pages).await?;
    report(&ctx.controller.snapshot());
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, pages: u32) -> Result<()> {
    ctx.controller.search(query).await?;
    load_more_pages(ctx, pages).await?;
    report(&ctx.controller.snapshot());
    Ok(())
}

/// Load up to `pages - 1` follow-up pages, stopping at the end of the feed or
/// on the first failure.
async fn load_more_pages(ctx: &AppContext, pages: u32) -> Result<()> {
    for _ in 1..pages {
        let Some(handle) = ctx.controller.load_next_page() else {
            break;
        };
        handle.await?;

        if ctx.controller.snapshot().error_message.is_some() {
            break;
        }
    }
    Ok(())
}

fn report(state: &ViewState) {
    print!("{}", render_listing(state));
    if let Some(error) = &state.error_message {
        eprintln!("Error: {}", error);
    }
}

pub fn render_listing(state: &ViewState) -> String {
    let mut out = String::new();

    if let Some(headline) = &state.headline {
        let _ = writeln!(out, "== Headline ==");
        write_article(&mut out, None, headline);
        let _ = writeln!(out);
    }

    if state.articles.is_empty() {
        if state.error_message.is_none() {
            let _ = writeln!(out, "No articles");
        }
        return out;
    }

    for (i, article) in state.articles.iter().enumerate() {
        write_article(&mut out, Some(i + 1), article);
    }

    if state.is_end_reached {
        let _ = writeln!(out, "-- end of feed --");
    }
    out
}

fn write_article(out: &mut String, index: Option<usize>, article: &Article) {
    let prefix = index.map(|i| format!("{:>3}. ", i)).unwrap_or_default();
    let _ = writeln!(out, "{}{}", prefix, article.display_title());

    let mut meta = Vec::new();
    if let Some(byline) = article.byline() {
        meta.push(byline);
    }
    if let Some(date) = article.display_published() {
        meta.push(date);
    }
    if !meta.is_empty() {
        let _ = writeln!(out, "     {}", meta.join(" | "));
    }
    let _ = writeln!(out, "     {}", article.url);
}
