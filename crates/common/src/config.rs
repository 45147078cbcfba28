use std::path::PathBuf;
use std::time::Duration;

/// Default review-status endpoint.
pub const DEFAULT_STATUS_URL: &str = "https://praktikum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Global application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// OAuth token for the review-status API
    pub praktikum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: String,

    /// Review-status endpoint URL
    pub status_url: String,

    /// Telegram Bot API base URL (overridable for testing against a local stub)
    pub telegram_api_url: String,

    /// Delay between successful polls in seconds (default: 300)
    pub poll_interval_secs: u64,

    /// Delay before retrying a failed cycle in seconds (default: 5)
    pub retry_backoff_secs: u64,

    /// Per-request timeout in seconds for both outbound APIs (default: 30)
    pub request_timeout_secs: u64,

    /// Optional log file; logs go to stdout when unset
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            var(key).ok_or_else(|| anyhow::anyhow!("{key} environment variable is required"))
        };
        let seconds = |key: &str, default: u64| -> anyhow::Result<u64> {
            match var(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("{key} must be a valid u64")),
                None => Ok(default),
            }
        };

        Ok(Self {
            praktikum_token: required("PRAKTIKUM_TOKEN")?,
            telegram_token: required("TELEGRAM_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
            status_url: var("REVIEW_STATUS_URL").unwrap_or_else(|| DEFAULT_STATUS_URL.to_string()),
            telegram_api_url: var("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            poll_interval_secs: seconds("POLL_INTERVAL_SECS", 300)?,
            retry_backoff_secs: seconds("RETRY_BACKOFF_SECS", 5)?,
            request_timeout_secs: seconds("REQUEST_TIMEOUT_SECS", 30)?,
            log_file: var("LOG_FILE").map(PathBuf::from),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("praktikum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("status_url", &self.status_url)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("retry_backoff_secs", &self.retry_backoff_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_file", &self.log_file)
            .finish()
    }
}
