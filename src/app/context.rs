use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::{NewsError, Result};
use crate::config::Config;
use crate::controller::PaginationController;
use crate::fetcher::{ArticleGateway, NewsApiGateway, RetryingGateway};

pub struct AppContext {
    pub config: Config,
    pub gateway: Arc<dyn ArticleGateway + Send + Sync>,
    pub controller: PaginationController,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let api = &config.api;
        if api.credential().is_none() {
            tracing::warn!("No API credential configured; every fetch will fail");
        }

        let http = NewsApiGateway::new(api)?;
        let gateway: Arc<dyn ArticleGateway + Send + Sync> = if api.max_retries > 0 {
            Arc::new(RetryingGateway::new(
                http,
                api.max_retries,
                Duration::from_millis(api.retry_backoff_ms),
            ))
        } else {
            Arc::new(http)
        };

        Ok(Self::with_gateway(config, gateway))
    }

    /// Wire a context around an already-built gateway.
    pub fn with_gateway(config: Config, gateway: Arc<dyn ArticleGateway + Send + Sync>) -> Self {
        let controller = PaginationController::new(gateway.clone(), config.api.page_size);
        Self {
            config,
            gateway,
            controller,
        }
    }

    /// Where the TUI writes its log file.
    pub fn log_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewsError::Config("Could not find data directory".into()))?;
        let newsdesk_dir = data_dir.join("newsdesk");
        std::fs::create_dir_all(&newsdesk_dir)?;
        Ok(newsdesk_dir.join("newsdesk.log"))
    }
}
