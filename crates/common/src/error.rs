use thiserror::Error;

/// Failure to deliver a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Delivery transport error: {0}")]
    Transport(String),

    #[error("Messaging API rejected the message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Errors that can end a polling cycle.
///
/// Every variant is recoverable: the poll loop logs it, backs off, and retries
/// the same window.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Request to {target} failed: {cause}")]
    Transport { target: String, cause: String },

    #[error("Server at {target} reported error {error:?}, params: {params}")]
    Server {
        target: String,
        error: String,
        params: String,
    },

    #[error("Server at {target} returned code {code:?}: {message}, params: {params}")]
    ServerCode {
        target: String,
        code: String,
        message: String,
        params: String,
    },

    #[error("Malformed response from {target} (HTTP {status}): {cause}")]
    MalformedResponse {
        target: String,
        status: u16,
        cause: String,
    },

    #[error("Unexpected review status: {status:?}")]
    UnknownStatus { status: String },

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl WatchError {
    /// Name of the cycle step the error came from.
    pub fn operation(&self) -> &'static str {
        match self {
            WatchError::Transport { .. }
            | WatchError::Server { .. }
            | WatchError::ServerCode { .. }
            | WatchError::MalformedResponse { .. } => "fetch",
            WatchError::UnknownStatus { .. } => "translate",
            WatchError::Notify(_) => "notify",
        }
    }
}
