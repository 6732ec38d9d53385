use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::{NewsError, Result};
use crate::config::ApiConfig;
use crate::domain::Article;
use crate::fetcher::ArticleGateway;
use crate::normalizer::Normalizer;

const API_KEY_HEADER: &str = "X-Api-Key";

/// [`ArticleGateway`] backed by the NewsAPI `top-headlines` and `everything`
/// endpoints.
pub struct NewsApiGateway {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    country: String,
    language: String,
    default_query: String,
    sort_by: String,
    normalizer: Normalizer,
}

impl NewsApiGateway {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Url::join drops the last path segment unless the base ends in '/'.
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            api_key: config.credential().map(String::from),
            country: config.country.clone(),
            language: config.language.clone(),
            default_query: config.default_query.clone(),
            sort_by: config.sort_by.clone(),
            normalizer: Normalizer::new(),
        })
    }

    pub fn headline_url(&self) -> Result<Url> {
        let mut url = self.base_url.join("top-headlines")?;
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("pageSize", "1");
        Ok(url)
    }

    pub fn page_url(&self, query: Option<&str>, page: u32, page_size: u32) -> Result<Url> {
        let mut url = self.base_url.join("everything")?;
        url.query_pairs_mut()
            .append_pair("q", query.unwrap_or(&self.default_query))
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("sortBy", &self.sort_by)
            .append_pair("language", &self.language);
        Ok(url)
    }

    fn credential(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(NewsError::MissingCredential)
    }

    async fn get(&self, url: Url) -> Result<Vec<Article>> {
        let api_key = self.credential()?;
        tracing::debug!("GET {}", url.path());

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            // Provider errors come back as a JSON body with a code.
            return Err(match self.normalizer.parse(&body) {
                Err(api @ NewsError::Api { .. }) => api,
                _ => NewsError::Status(status.as_u16()),
            });
        }

        self.normalizer.normalize(&body)
    }
}

#[async_trait]
impl ArticleGateway for NewsApiGateway {
    async fn fetch_headline(&self) -> Result<Article> {
        self.credential()?;
        let url = self.headline_url()?;
        self.get(url)
            .await?
            .into_iter()
            .next()
            .ok_or(NewsError::HeadlineUnavailable)
    }

    async fn fetch_page(
        &self,
        query: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Article>> {
        self.credential()?;
        let url = self.page_url(query, page, page_size)?;
        self.get(url).await
    }
}
