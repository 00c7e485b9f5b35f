//! Console configuration
//!
//! Loaded from an optional YAML file, then overridden from the environment.
//!
//! ```yaml
//! api:
//!   base_url: "https://dt.example.com"
//!   api_key: "..."
//!   timeout_secs: 30
//! session:
//!   path: "/var/tmp/cfp-session.json"
//! log_level: debug
//! ```

use crate::error::{Error, Result};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

/// Environment variable overriding `api.base_url`
pub const ENV_BASE_URL: &str = "CFP_API_BASE_URL";

/// Environment variable overriding `api.api_key`
pub const ENV_API_KEY: &str = "CFP_API_KEY";

/// Environment variable overriding `session.path`
pub const ENV_SESSION_FILE: &str = "CFP_SESSION_FILE";

/// File name of the default session file in the temp dir
pub const DEFAULT_SESSION_FILE: &str = "cfp-console-session.json";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data-transport API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Session file settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

/// Data-transport API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value of the `apiKey` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Custom user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Session file settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file path; defaults to a file in the temp dir
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// ============================================================================
// Loading
// ============================================================================

impl AppConfig {
    /// Load config from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML config document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document is a valid all-defaults config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var(ENV_BASE_URL) {
            info!("{ENV_BASE_URL} set, using base URL {url}");
            self.api.base_url = url;
        }
        if let Some(key) = var(ENV_API_KEY) {
            info!("{ENV_API_KEY} set, overriding API key");
            self.api.api_key = Some(key);
        }
        if let Some(path) = var(ENV_SESSION_FILE) {
            info!("{ENV_SESSION_FILE} set, using session file {path}");
            self.session.path = Some(PathBuf::from(path));
        }
    }

    /// Check the settings that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| Error::config(format!("Invalid api.base_url '{}': {e}", self.api.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "api.base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::config("api.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Session file path, falling back to the temp dir default
    pub fn session_path(&self) -> PathBuf {
        self.session
            .path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_SESSION_FILE))
    }
}
