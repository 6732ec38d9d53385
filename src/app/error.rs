use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("credential not configured")]
    MissingCredential,

    #[error("headline unavailable")]
    HeadlineUnavailable,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("news API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NewsError {
    /// Whether repeating the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            NewsError::Http(e) => e.is_timeout() || e.is_connect(),
            NewsError::Status(code) => *code == 429 || (500..600).contains(code),
            NewsError::Api { code, .. } => code == "rateLimited" || code == "unexpectedError",
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;
