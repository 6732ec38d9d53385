//! Configuration management for newsdesk.
//!
//! Configuration is read from `~/.config/newsdesk/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! The API key may also come from the `NEWS_API_KEY` environment variable,
//! which takes precedence over the file.

pub mod keybindings;

pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable consulted for the API credential.
pub const API_KEY_ENV: &str = "NEWS_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub keybindings: KeybindingConfig,
}

/// Settings for the remote news provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Country code for the top-headlines endpoint.
    pub country: String,
    /// Language code for the everything endpoint.
    pub language: String,
    /// Search terms used for the default listing.
    pub default_query: String,
    pub sort_by: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://newsapi.org/v2/".to_string(),
            country: "id".to_string(),
            language: "id".to_string(),
            default_query: "bank mandiri OR ekonomi".to_string(),
            sort_by: "publishedAt".to_string(),
            page_size: crate::fetcher::DEFAULT_PAGE_SIZE,
            timeout_secs: 10,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl ApiConfig {
    /// The configured credential, or `None` when blank.
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Overlay a credential from the environment, ignoring blank values.
    pub fn apply_env_key(&mut self, value: Option<String>) {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                self.api_key = value.trim().to_string();
            }
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it when missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let mut config = if config_path.exists() {
            let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            })?;

            toml::from_str::<Config>(&content).map_err(|e| ConfigError::Parse {
                path: config_path.to_path_buf(),
                source: e,
            })?
        } else {
            Self::create_default_config(config_path)?;
            Self::default()
        };

        config.api.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Get the default config file path: `~/.config/newsdesk/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsdesk").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# newsdesk configuration
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[api]
# NewsAPI credential. NEWS_API_KEY in the environment overrides this.
api_key = ""
base_url = "https://newsapi.org/v2/"

# Country for top headlines, language for listings and search
country = "id"
language = "id"

# Search terms for the default listing
default_query = "bank mandiri OR ekonomi"
sort_by = "publishedAt"
page_size = 20

# Request timeout in seconds
timeout_secs = 10

# Retries for transient failures (0 disables), first backoff in milliseconds
max_retries = 0
retry_backoff_ms = 500

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
open_in_browser = ["o", "Enter"]
refresh = ["R"]
search = ["/"]
load_more = ["m"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.country, "id");
        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.keybindings.search, vec!["/"]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
api_key = "abc123"
page_size = 50
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.credential(), Some("abc123"));
        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.api.default_query, "bank mandiri OR ekonomi");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.api.credential(), None);
        assert_eq!(config.api.base_url, "https://newsapi.org/v2/");
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
    }

    #[test]
    fn test_blank_key_is_no_credential() {
        let api = ApiConfig {
            api_key: "   ".into(),
            ..Default::default()
        };
        assert_eq!(api.credential(), None);
    }

    #[test]
    fn test_env_key_overrides_unless_blank() {
        let mut api = ApiConfig {
            api_key: "from-file".into(),
            ..Default::default()
        };

        api.apply_env_key(Some("  ".into()));
        assert_eq!(api.credential(), Some("from-file"));

        api.apply_env_key(None);
        assert_eq!(api.credential(), Some("from-file"));

        api.apply_env_key(Some("from-env".into()));
        assert_eq!(api.credential(), Some("from-env"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.language, "id");
    }

    #[test]
    fn test_load_from_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\npage_size = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
