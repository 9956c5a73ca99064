//! HTTP client for the GRC platform API with connection pooling.

use std::time::Duration;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Pooled JSON client carrying the platform host and bearer token.
///
/// Cloning is cheap and shares the underlying connection pool, so one
/// instance is created at startup and handed to every consumer.
#[derive(Clone)]
pub struct GrcClient {
    base_url: String,
    http_client: reqwest::Client,
    api_token: String,
}

impl GrcClient {
    pub fn new(base_url: String, api_token: String) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("grc-cli/1.0")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            api_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource. `path_and_query` is everything after the host,
    /// already urlencoded by the caller.
    pub async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> anyhow::Result<T> {
        let url = format!("{}/{}", self.base_url, path_and_query);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Request failed: GET {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("GET {} returned {}: {}", url, status, body);
            anyhow::bail!("GET {} returned {}", url, status);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from GET {}", url))
    }

    /// GET a JSON resource that may legitimately not exist. A 404 or an
    /// empty/`null` body maps to `Ok(None)`.
    pub async fn get_json_opt<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> anyhow::Result<Option<T>> {
        let url = format!("{}/{}", self.base_url, path_and_query);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Request failed: GET {}", url))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("GET {} returned {}: {}", url, status, body);
            anyhow::bail!("GET {} returned {}", url, status);
        }

        let text = response.text().await?;
        if text.trim().is_empty() || text.trim() == "null" {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .with_context(|| format!("Failed to parse response from GET {}", url))
    }

    /// PUT a JSON body. Only 200 and 201 count as success; every other
    /// status is an error for the caller to surface.
    pub async fn put_json<B: Serialize>(
        &self,
        path_and_query: &str,
        body: &B,
    ) -> anyhow::Result<u16> {
        let url = format!("{}/{}", self.base_url, path_and_query);
        log::debug!("PUT {}", url);

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request failed: PUT {}", url))?;

        let status = response.status().as_u16();
        match status {
            200 | 201 => {
                log::info!("PUT {} returned {}", url, status);
                Ok(status)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                log::warn!("PUT {} returned {}: {}", url, status, body);
                anyhow::bail!("PUT {} returned {}", url, status)
            }
        }
    }
}
