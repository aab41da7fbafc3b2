//! Client configuration.

use std::time::Duration;

/// Host of the share listing API.
pub const DEFAULT_API_BASE: &str = "https://www.1024tera.com";

/// Fixed application identifier sent with every listing call.
pub const DEFAULT_APP_ID: &str = "250528";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How `FileEntry::relative_path` is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathLayout {
    /// Every file is placed under the manifest title, whatever its depth.
    #[default]
    Flat,
    /// Files keep the chain of folder names from the share root.
    Nested,
}

/// Settings for the listing client and tree walk.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub app_id: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub path_layout: PathLayout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            app_id: DEFAULT_APP_ID.to_string(),
            user_agent: BROWSER_UA.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            path_layout: PathLayout::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_path_layout(mut self, path_layout: PathLayout) -> Self {
        self.path_layout = path_layout;
        self
    }

    /// Full URL of the listing endpoint.
    pub fn list_url(&self) -> String {
        format!("{}/share/list", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.list_url(), "https://www.1024tera.com/share/list");
        assert_eq!(config.app_id, "250528");
        assert_eq!(config.path_layout, PathLayout::Flat);
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let config = ClientConfig::default().with_api_base("http://127.0.0.1:8080/");
        assert_eq!(config.list_url(), "http://127.0.0.1:8080/share/list");
    }
}
