// Fetch capability for the stats API, plus the reqwest-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// StatsSource
// ---------------------------------------------------------------------------

/// Anything that can GET a URL and hand back parsed JSON.
///
/// The pipeline only talks to the network through this trait, so tests can
/// substitute canned responses.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// A shared source, so callers can keep a handle to it after handing one to
/// `StatsApi`.
#[async_trait]
impl<T: StatsSource + ?Sized> StatsSource for Arc<T> {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).fetch_json(url).await
    }
}

/// Live HTTP source backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpStatsSource {
    http: reqwest::Client,
}

impl HttpStatsSource {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "GET");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
