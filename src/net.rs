//! Fetching dialog fragments from the host server.

use crate::config::NetworkConfig;
use crate::error::ShortcutError;
use crate::fragment::FragmentRequest;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use std::time::Duration;

/// Accept header the page's own remote links send.
pub const SCRIPT_ACCEPT: &str =
    "*/*;q=0.5, text/javascript, application/javascript, application/ecmascript, application/x-ecmascript";

/// Longest slice of an error body echoed back to the user.
const ERROR_SNIPPET_CHARS: usize = 200;

/// Retrieves the script body behind a [`FragmentRequest`].
#[allow(async_fn_in_trait)]
pub trait FragmentFetcher {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, ShortcutError>;
}

/// reqwest-backed fetcher resolving hrefs against the host origin.
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL {}", config.base_url))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, base })
    }

    /// Resolve `href` against the base and refuse other origins.
    pub fn resolve(&self, href: &str) -> Result<Url, String> {
        let url = self.base.join(href).map_err(|e| e.to_string())?;
        if url.origin() != self.base.origin() {
            return Err(format!("refusing cross-origin action link {}", url));
        }
        Ok(url)
    }

    fn headers(request: &FragmentRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(SCRIPT_ACCEPT));
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        if let Some(token) = request
            .csrf_token
            .as_deref()
            .and_then(|t| HeaderValue::from_str(t).ok())
        {
            headers.insert("X-CSRF-Token", token);
        }
        headers
    }
}

impl FragmentFetcher for HttpFetcher {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, ShortcutError> {
        let remote = |reason: String| ShortcutError::Remote {
            action: request.kind.label(),
            reason,
        };

        let url = self.resolve(&request.href).map_err(remote)?;
        tracing::debug!(%url, "fetching dialog fragment");

        let response = self
            .client
            .get(url)
            .headers(Self::headers(request))
            .send()
            .await
            .map_err(|e| remote(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| remote(e.to_string()))?;
        if !status.is_success() {
            let snippet: String = body.chars().take(ERROR_SNIPPET_CHARS).collect();
            return Err(remote(format!("HTTP {} :: {}", status, snippet)));
        }
        Ok(body)
    }
}

/// Fetcher for replays without network access; every request fails.
#[derive(Debug, Default)]
pub struct OfflineFetcher;

impl FragmentFetcher for OfflineFetcher {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, ShortcutError> {
        tracing::info!(href = %request.href, "offline: not fetching dialog fragment");
        Err(ShortcutError::Remote {
            action: request.kind.label(),
            reason: "network access is disabled".to_string(),
        })
    }
}
