use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Article;
use crate::fetcher::ArticleGateway;

/// Retries transient failures of an inner gateway with exponential backoff.
pub struct RetryingGateway<G> {
    inner: G,
    max_retries: u32,
    backoff: Duration,
}

impl<G> RetryingGateway<G> {
    pub fn new(inner: G, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }

    async fn run<T, F, Fut>(&self, what: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T>> + Send,
        T: Send,
    {
        let mut delay = self.backoff;
        let mut retries = 0;
        loop {
            match attempt().await {
                Err(e) if retries < self.max_retries && e.is_transient() => {
                    retries += 1;
                    tracing::warn!(
                        "{} failed ({}), retry {}/{} in {:?}",
                        what,
                        e,
                        retries,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl<G> ArticleGateway for RetryingGateway<G>
where
    G: ArticleGateway + Send + Sync,
{
    async fn fetch_headline(&self) -> Result<Article> {
        self.run("headline fetch", move || self.inner.fetch_headline())
            .await
    }

    async fn fetch_page(
        &self,
        query: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Article>> {
        self.run("page fetch", move || self.inner.fetch_page(query, page, page_size))
            .await
    }
}
