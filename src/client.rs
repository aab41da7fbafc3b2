//! HTTP client for the share landing page and the `share/list` API.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ClientConfig;
use crate::cookies::CookieSet;
use crate::error::Result;
use crate::models::{ListItem, ListResponse};

/// Registrable domains the provider serves shares and cookies from.
const PROVIDER_DOMAINS: &[&str] = &[
    "terabox.com",
    "teraboxapp.com",
    "1024tera.com",
    "nephobox.com",
    "4funbox.com",
    "mirrobox.com",
    "momerybox.com",
    "freeterabox.com",
];

/// Authenticated session for one resolution.
///
/// Holds its own cookie jar; dropping the client releases the connection pool.
pub struct ShareClient {
    config: ClientConfig,
    http: Client,
}

impl ShareClient {
    /// Create a client whose jar carries `cookies` for the provider domains,
    /// the share URL host and the API host.
    pub fn new(config: ClientConfig, cookies: &CookieSet, share_url: &Url) -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let mut origins = vec![share_url.clone()];
        if let Ok(api) = Url::parse(&config.api_base) {
            origins.push(api);
        }
        origins.retain(|url| !is_provider_host(url));

        for (name, value) in cookies.iter() {
            for domain in PROVIDER_DOMAINS {
                if let Ok(url) = Url::parse(&format!("https://www.{}/", domain)) {
                    jar.add_cookie_str(
                        &format!("{}={}; Domain=.{}; Path=/", name, value, domain),
                        &url,
                    );
                }
            }
            for origin in &origins {
                jar.add_cookie_str(&format!("{}={}; Path=/", name, value), origin);
            }
        }

        let http = Client::builder()
            .cookie_provider(jar)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the share landing page, following redirects.
    ///
    /// Returns the body and the final URL after redirects.
    pub async fn fetch_landing(&self, share_url: &Url) -> Result<(String, Url)> {
        let response = self.http.get(share_url.clone()).send().await?;
        let final_url = response.url().clone();
        let body = response.text().await?;

        debug!(
            "Landing page {} resolved to {} ({} bytes)",
            share_url,
            final_url,
            body.len()
        );
        Ok((body, final_url))
    }

    /// List the immediate children of a folder in the share.
    ///
    /// # Arguments
    /// * `dir` - Provider-side folder path; `None` or empty lists the share root
    /// * `share_id` - The share's `surl`
    /// * `token` - The `jsToken` from the landing page
    pub async fn list(
        &self,
        dir: Option<&str>,
        share_id: &str,
        token: &str,
    ) -> Result<Vec<ListItem>> {
        let mut request = self.http.get(self.config.list_url()).query(&[
            ("app_id", self.config.app_id.as_str()),
            ("jsToken", token),
            ("shorturl", share_id),
        ]);

        request = match dir.filter(|d| !d.is_empty()) {
            Some(dir) => request.query(&[("dir", dir)]),
            None => request.query(&[("root", "1")]),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            "share/list dir={} status={} ({} bytes)",
            dir.unwrap_or("<root>"),
            status,
            body.len()
        );

        let list_response: ListResponse = serde_json::from_str(&body)?;
        list_response.into_items()
    }
}

fn is_provider_host(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    PROVIDER_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_provider_host() {
        let url = Url::parse("https://www.terabox.com/s/1abc").unwrap();
        assert!(is_provider_host(&url));

        let url = Url::parse("https://1024tera.com/share/list").unwrap();
        assert!(is_provider_host(&url));

        let url = Url::parse("http://127.0.0.1:1234/s/1abc").unwrap();
        assert!(!is_provider_host(&url));

        let url = Url::parse("https://notterabox.com/").unwrap();
        assert!(!is_provider_host(&url));
    }

    // Request tests are in tests/resolver_test.rs
}
