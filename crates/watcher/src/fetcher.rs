//! Review-status fetching and response classification.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use review_common::config::AppConfig;
use review_common::error::WatchError;
use review_common::types::{Cursor, PollResponse};

/// Source of review-status snapshots.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch everything reviewed since `from_date`. No retries.
    async fn fetch(&self, from_date: Cursor) -> Result<PollResponse, WatchError>;
}

/// HTTP client for the review-status endpoint.
pub struct StatusFetcher {
    http: Client,
    url: String,
    token: String,
}

impl StatusFetcher {
    pub fn new(http: Client, url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self::new(
            http,
            config.status_url.clone(),
            config.praktikum_token.clone(),
        ))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn transport_error(&self, e: reqwest::Error) -> WatchError {
        WatchError::Transport {
            target: self.url.clone(),
            cause: e.to_string(),
        }
    }
}

#[async_trait]
impl StatusSource for StatusFetcher {
    async fn fetch(&self, from_date: Cursor) -> Result<PollResponse, WatchError> {
        tracing::debug!(url = %self.url, from_date, "Polling review statuses");

        let response = self
            .http
            .get(&self.url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        classify_body(&self.url, from_date, status, &body)
    }
}

/// Turn a raw response body into a [`PollResponse`] or a classified error.
///
/// Error envelopes are checked before the normal payload: `error` first,
/// then `code`. The HTTP status only shows up in [`WatchError::MalformedResponse`].
pub fn classify_body(
    target: &str,
    from_date: Cursor,
    status: u16,
    body: &str,
) -> Result<PollResponse, WatchError> {
    let malformed = |cause: String| WatchError::MalformedResponse {
        target: target.to_string(),
        status,
        cause,
    };
    let params = format!("from_date={from_date}");

    let value: Value = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;

    if let Some(error) = value.get("error") {
        return Err(WatchError::Server {
            target: target.to_string(),
            error: describe_error(error),
            params,
        });
    }

    if let Some(code) = value.get("code") {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(WatchError::ServerCode {
            target: target.to_string(),
            code: code.as_str().map_or_else(|| code.to_string(), str::to_string),
            message,
            params,
        });
    }

    let response: PollResponse =
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;

    if response.homeworks().iter().any(|record| record.name.trim().is_empty()) {
        return Err(malformed("homework record with an empty name".to_string()));
    }

    Ok(response)
}

/// The service nests the text as `{"error": {"error": "..."}}`; tolerate flatter shapes too.
fn describe_error(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        Value::Object(inner) => match inner.get("error") {
            Some(Value::String(text)) => text.clone(),
            _ => error.to_string(),
        },
        other => other.to_string(),
    }
}
