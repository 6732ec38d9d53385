use crate::domain::Article;

/// What the controller is currently waiting on.
///
/// A single variant instead of separate loading/paginating flags, so the two
/// can never be set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// Headline plus first page of the default feed.
    Refreshing,
    /// First page of a search.
    Searching,
    /// A follow-up page for the current mode.
    Paginating,
}

/// Coarse status for indicators, derived from a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Refreshing,
    Searching,
    Paginating,
    Error,
    EndOfFeed,
}

/// Snapshot rendered by views. Replaced wholesale by refresh/search and
/// copied-and-extended by page loads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Only populated by a refresh; searches never carry one.
    pub headline: Option<Article>,
    pub articles: Vec<Article>,
    pub activity: Activity,
    pub is_end_reached: bool,
    pub error_message: Option<String>,
}

impl ViewState {
    pub fn loading(activity: Activity) -> Self {
        Self {
            activity,
            ..Default::default()
        }
    }

    /// A full refresh or search is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.activity, Activity::Refreshing | Activity::Searching)
    }

    pub fn is_paginating(&self) -> bool {
        self.activity == Activity::Paginating
    }

    pub fn is_empty(&self) -> bool {
        self.headline.is_none() && self.articles.is_empty()
    }

    pub fn status(&self) -> FeedStatus {
        match self.activity {
            Activity::Refreshing => FeedStatus::Refreshing,
            Activity::Searching => FeedStatus::Searching,
            Activity::Paginating => FeedStatus::Paginating,
            Activity::Idle if self.error_message.is_some() => FeedStatus::Error,
            Activity::Idle if self.is_end_reached => FeedStatus::EndOfFeed,
            Activity::Idle => FeedStatus::Idle,
        }
    }
}
