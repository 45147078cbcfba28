//! Telegram Bot API delivery via `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use review_common::config::AppConfig;
use review_common::error::NotifyError;

use crate::Notifier;

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sends notifications to one chat through a Telegram bot.
pub struct TelegramNotifier {
    http: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        api_url: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        Self::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
            config.request_timeout(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }

    /// Map a Bot API answer onto delivery success or a classified failure.
    fn check_reply(status: u16, body: &str) -> Result<(), NotifyError> {
        match serde_json::from_str::<ApiReply>(body) {
            Ok(reply) if reply.ok && (200..300).contains(&status) => Ok(()),
            Ok(reply) => Err(NotifyError::Rejected {
                status,
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
            Err(e) => Err(NotifyError::Rejected {
                status,
                description: format!("unreadable reply: {e}"),
            }),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // The request URL embeds the bot token, so it is stripped from every error.
        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        Self::check_reply(status, &body)?;

        tracing::info!(chat_id = %self.chat_id, chars = text.chars().count(), "Notification delivered");
        Ok(())
    }
}
