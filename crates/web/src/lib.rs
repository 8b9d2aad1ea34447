//! # repostly-web: Video Page Fetching
//!
//! Retrieves the raw HTML of a public video page with browser-like headers.
//! The URL is checked against the allowed platform domains before any network
//! call is made. Each fetch is a single attempt; there is no retry.

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    redirect, Client,
};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// A desktop Chrome user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("URL is not on a supported domain: {0}")]
    UnsupportedDomain(String),
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to fetch content: {0}")]
    Request(reqwest::Error),
    #[error("Remote server returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),
}

impl FetchError {
    /// True when the URL was rejected before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FetchError::InvalidUrl { .. } | FetchError::UnsupportedDomain(_)
        )
    }

    /// True when the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(e) if e.is_timeout())
    }
}

// --- Configuration ---

/// Options for outbound page retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    /// A URL is accepted when it contains any of these strings.
    pub allowed_domains: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allowed_domains: vec!["tiktok.com".to_string()],
        }
    }
}

// --- Fetcher ---

/// Fetches video pages. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    options: FetchOptions,
}

impl ContentFetcher {
    pub fn new(options: FetchOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(options.timeout_secs))
            .redirect(redirect::Policy::limited(options.max_redirects))
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Checks the domain and parses the URL.
    pub fn validate_url(&self, raw: &str) -> Result<Url, FetchError> {
        let raw = raw.trim();
        if !self
            .options
            .allowed_domains
            .iter()
            .any(|domain| raw.contains(domain.as_str()))
        {
            return Err(FetchError::UnsupportedDomain(raw.to_string()));
        }

        let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FetchError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    /// Fetches the page body as text after validating the URL.
    pub async fn fetch_page(&self, raw_url: &str) -> Result<String, FetchError> {
        let url = self.validate_url(raw_url)?;
        info!("Fetching page: {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(FetchError::Body)?;
        debug!(bytes = body.len(), "Fetched page body");
        Ok(body)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}
