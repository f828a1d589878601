//! URL shortener client
//!
//! Posts a URL to the shortening backend and builds the redirect link from
//! the returned short id. The backend is an opaque HTTP endpoint:
//! `POST {base}/url/shorten?actualUrl=...` answering
//! `{"actualUrl": "...", "shortUrl": "<id>"}`.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::ShortenerConfig;

/// Shortener error
#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("Please enter a URL")]
    EmptyUrl,

    #[error("invalid shortener base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Failed to connect to the server: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to shorten URL (HTTP {0})")]
    Status(u16),

    #[error("unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Body returned by the backend
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShortenResponse {
    actual_url: String,
    short_url: String,
}

/// A shortened link ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub actual_url: String,
    pub short_url: String,
}

/// Blocking client for the shortening backend
pub struct ShortenClient {
    base_url: Url,
    redirect_prefix: String,
    client: reqwest::blocking::Client,
}

impl ShortenClient {
    /// Build a client from configuration
    pub fn new(config: &ShortenerConfig) -> Result<Self, ShortenError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("domlens/{}", crate::VERSION))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        // Keep any base path when joining the endpoint
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            base_url: Url::parse(&base)?,
            redirect_prefix: config.redirect_prefix.clone(),
            client,
        })
    }

    /// Endpoint URL for shortening `actual_url`, with the target percent-encoded
    pub fn request_url(&self, actual_url: &str) -> Result<Url, ShortenError> {
        let mut url = self.base_url.join("url/shorten")?;
        url.query_pairs_mut().append_pair("actualUrl", actual_url);
        Ok(url)
    }

    /// Shorten a URL
    pub fn shorten(&self, actual_url: &str) -> Result<ShortenedUrl, ShortenError> {
        let actual_url = actual_url.trim();
        if actual_url.is_empty() {
            return Err(ShortenError::EmptyUrl);
        }

        let endpoint = self.request_url(actual_url)?;
        tracing::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Shortener returned HTTP {}", status.as_u16());
            return Err(ShortenError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let shortened = self.shortened_from_body(&body)?;
        tracing::info!("Shortened {} -> {}", shortened.actual_url, shortened.short_url);
        Ok(shortened)
    }

    /// Decode a backend response body into a display link
    pub fn shortened_from_body(&self, body: &str) -> Result<ShortenedUrl, ShortenError> {
        let response: ShortenResponse = serde_json::from_str(body)?;
        Ok(ShortenedUrl {
            actual_url: response.actual_url,
            short_url: format!("{}{}", self.redirect_prefix, response.short_url),
        })
    }
}
