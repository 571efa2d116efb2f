//! HTTP retrieval of raw page markup.

use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use url::Url;

use webgist_common::FetchError;

const MAX_REDIRECT_HOPS: usize = 5;
const USER_AGENT: &str = "Mozilla/5.0 (compatible; webgist/0.1)";

/// A page exactly as the server returned it.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub url: String,
    pub raw_html: String,
    pub fetched_at: DateTime<Utc>,
}

/// Retrieves raw HTML for a URL and classifies network/HTTP failures.
///
/// Redirects are followed up to a bounded hop count; any status of 400 or
/// above is a failure carrying the status code. The fetcher never retries —
/// retry policy belongs to the caller.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
            .user_agent(USER_AGENT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// Fetch the raw markup behind `url`.
    pub async fn fetch(&self, url: &str) -> Result<SourceDocument, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        tracing::debug!(%url, "fetch.start");
        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = resp.status();
        if status.as_u16() >= 400 {
            tracing::warn!(%url, status = status.as_u16(), "fetch.http_error");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let raw_html = resp.text().await.map_err(classify_transport_error)?;
        tracing::debug!(%url, bytes = raw_html.len(), "fetch.done");

        Ok(SourceDocument {
            url: url.to_string(),
            raw_html,
            fetched_at: Utc::now(),
        })
    }
}

fn classify_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        // Everything below HTTP (refused connections, DNS failures, dropped
        // sockets, redirect loops) surfaces as a connection-level failure.
        FetchError::ConnectionRefused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unparsable_url() {
        let fetcher = Fetcher::new(Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("not a url").await;
        assert!(matches!(err, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let fetcher = Fetcher::new(Duration::from_secs(1)).unwrap();
        let err = fetcher.fetch("ftp://example.com/file").await;
        assert!(matches!(err, Err(FetchError::InvalidUrl(_))));

        let err = fetcher.fetch("file:///etc/passwd").await;
        assert!(matches!(err, Err(FetchError::InvalidUrl(_))));
    }
}
