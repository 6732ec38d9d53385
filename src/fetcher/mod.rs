pub mod news_api;
pub mod retry;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Article;

pub use news_api::NewsApiGateway;
pub use retry::RetryingGateway;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Remote source of articles.
///
/// Implementations report every failure as an `Err` value; nothing panics
/// across this boundary and nothing retries unless wrapped in
/// [`RetryingGateway`].
#[async_trait]
pub trait ArticleGateway {
    /// The single top-of-feed article.
    async fn fetch_headline(&self) -> Result<Article>;

    /// One page of articles, newest first. `query: None` selects the default
    /// topic feed. Pages are numbered from 1.
    async fn fetch_page(&self, query: Option<&str>, page: u32, page_size: u32)
        -> Result<Vec<Article>>;
}
