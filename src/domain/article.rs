use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub image_url: Option<String>,
    pub source_name: Option<String>,
    /// Identity key for list rows and detail navigation.
    pub url: String,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            author: None,
            published_at: None,
            image_url: None,
            source_name: None,
            url: url.into(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Publish time in local time, e.g. `05 Mar 2024 | 14.30`.
    pub fn display_published(&self) -> Option<String> {
        self.published_at.map(|published| {
            published
                .with_timezone(&Local)
                .format("%d %b %Y | %H.%M")
                .to_string()
        })
    }

    /// `source · author`, skipping whichever is missing.
    pub fn byline(&self) -> Option<String> {
        match (self.source_name.as_deref(), self.author.as_deref()) {
            (Some(source), Some(author)) => Some(format!("{} · {}", source, author)),
            (Some(source), None) => Some(source.to_string()),
            (None, Some(author)) => Some(author.to_string()),
            (None, None) => None,
        }
    }
}

/// Appends `incoming` to `existing`, skipping articles whose url is already
/// present. Returns how many were actually added.
pub fn extend_unique(existing: &mut Vec<Article>, incoming: Vec<Article>) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|a| a.url.clone()).collect();
    let before = existing.len();
    for article in incoming {
        if seen.insert(article.url.clone()) {
            existing.push(article);
        }
    }
    existing.len() - before
}

/// Collapses articles sharing a url, keeping the first occurrence.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut unique = Vec::with_capacity(articles.len());
    extend_unique(&mut unique, articles);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str) -> Article {
        Article::new(format!("Title {}", url), url)
    }

    #[test]
    fn test_display_title_with_title() {
        let item = Article::new("Rupiah menguat", "https://example.com/a");
        assert_eq!(item.display_title(), "Rupiah menguat");
    }

    #[test]
    fn test_display_title_without_title() {
        let item = Article::new("", "https://example.com/a");
        assert_eq!(item.display_title(), "(Untitled)");
    }

    #[test]
    fn test_display_published_absent() {
        let item = Article::new("t", "https://example.com/a");
        assert_eq!(item.display_published(), None);
    }

    #[test]
    fn test_display_published_format() {
        let mut item = Article::new("t", "https://example.com/a");
        item.published_at = DateTime::parse_from_rfc3339("2024-03-05T14:30:00+07:00").ok();
        let formatted = item.display_published().unwrap();
        // Local timezone varies between machines; check the shape only.
        assert!(formatted.contains(" | "));
        assert!(formatted.contains("2024"));
    }

    #[test]
    fn test_byline_variants() {
        let mut item = Article::new("t", "https://example.com/a");
        assert_eq!(item.byline(), None);

        item.author = Some("Ani".into());
        assert_eq!(item.byline(), Some("Ani".into()));

        item.source_name = Some("Kompas".into());
        assert_eq!(item.byline(), Some("Kompas · Ani".into()));

        item.author = None;
        assert_eq!(item.byline(), Some("Kompas".into()));
    }

    #[test]
    fn test_dedup_by_url_keeps_first() {
        let mut dup = article("https://example.com/1");
        dup.title = "Later copy".into();
        let articles = vec![
            article("https://example.com/1"),
            article("https://example.com/2"),
            dup,
        ];

        let unique = dedup_by_url(articles);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "Title https://example.com/1");
    }

    #[test]
    fn test_extend_unique_counts_added() {
        let mut existing = vec![article("https://example.com/1")];
        let added = extend_unique(
            &mut existing,
            vec![article("https://example.com/1"), article("https://example.com/2")],
        );
        assert_eq!(added, 1);
        assert_eq!(existing.len(), 2);
    }
}
