pub mod wire;

use chrono::DateTime;
use html_escape::decode_html_entities;
use url::Url;

use crate::app::{NewsError, Result};
use crate::domain::Article;

pub use wire::{ArticleDto, NewsResponse, SourceDto};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Decode a response body into articles, dropping entries without a
    /// usable url.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Article>> {
        let response = self.parse(body)?;
        Ok(response
            .articles
            .into_iter()
            .filter_map(|dto| self.normalize_article(dto))
            .collect())
    }

    pub fn parse(&self, body: &[u8]) -> Result<NewsResponse> {
        let response: NewsResponse = serde_json::from_slice(body)?;

        if response.status != "ok" {
            return Err(NewsError::Api {
                code: response.code.unwrap_or_else(|| response.status.clone()),
                message: response
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            });
        }

        Ok(response)
    }

    pub fn normalize_article(&self, dto: ArticleDto) -> Option<Article> {
        let url = dto.url.map(|u| u.trim().to_string())?;
        if Url::parse(&url).is_err() {
            tracing::debug!("Dropping article with unresolvable url {:?}", url);
            return None;
        }

        let published_at = dto
            .published_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok());

        Some(Article {
            title: dto.title.map(|t| decode(&t)).unwrap_or_default(),
            description: dto.description.map(|d| decode(&d)),
            author: dto.author.map(|a| decode(&a)),
            published_at,
            image_url: dto.image_url,
            source_name: dto.source.and_then(|s| s.name),
            url,
        })
    }
}

fn decode(text: &str) -> String {
    decode_html_entities(text).to_string()
}
