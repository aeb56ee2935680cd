use crate::guard::DefaultAccess;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Route guard policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AccessSettings {
    #[serde(default)]
    pub default_access: DefaultAccess,
}

/// Top-level config file structure matching `config.toml`.
///
/// Every field defaults so a missing or partial file still yields a
/// working client against a local backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub access: AccessSettings,
}

impl AppConfig {
    /// Parse TOML, falling back to defaults on error.
    pub fn from_toml_or_default(contents: &str) -> Self {
        match toml::from_str(contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "config.toml unparseable; using defaults");
                Self::default()
            }
        }
    }

    /// Replace the base URL when `value` is non-empty. Trailing slashes are dropped.
    pub fn with_base_url_override(mut self, value: Option<&str>) -> Self {
        if let Some(url) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.api.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}
