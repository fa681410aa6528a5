// Networking - the shared HTTP collaborator behind every feature API client
//
// One reqwest client with connection pooling, constructed once in the
// composition root and cloned into each API client. Retry/backoff policy is
// deliberately absent: transport behavior belongs here, delivery semantics
// belong to the callers.

use anyhow::{Context, Result};
use std::time::Duration;

/// Shared HTTP transport for the feature API clients
#[derive(Clone)]
pub struct Networking {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    /// Base URL of the backend-for-frontend, without trailing slash
    base_url: String,
}

impl Networking {
    /// Build the shared HTTP client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a path against the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a JSON resource
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Request to {} returned an error status", url))?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_doubled_slashes() {
        let net = Networking::new("https://bff.wefriendz.example/").unwrap();
        assert_eq!(
            net.url("/v1/feed"),
            "https://bff.wefriendz.example/v1/feed"
        );
        assert_eq!(net.url("v1/feed"), "https://bff.wefriendz.example/v1/feed");
    }

    #[test]
    fn base_url_is_normalized() {
        let net = Networking::new("https://bff.wefriendz.example///").unwrap();
        assert_eq!(net.base_url(), "https://bff.wefriendz.example");
    }
}
