//! Typed client for the Telegram Bot API.
//!
//! Inbound updates come from `getUpdates` long polling; outbound text
//! goes through `sendMessage` with Markdown and link previews off.
//! Delivery runs a bounded retry loop carrying explicit attempt state:
//! a 429 with `retry_after` sleeps that long (clamped to 60s), any
//! other error logs and retries, and an exhausted budget is swallowed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, warn};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Outbound delivery attempt budget.
pub const SEND_ATTEMPTS: u32 = 10;

/// Longest rate-limit wait we honor, in seconds.
pub const MAX_RETRY_WAIT_SECS: u64 = 60;

/// One inbound update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,

    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,

    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,

    #[serde(default)]
    result: Option<T>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, thiserror::Error)]
enum SendError {
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str, poll_timeout_secs: u64) -> Self {
        Self::with_api_url(TELEGRAM_API_URL, token, poll_timeout_secs)
    }

    /// Point the client at a non-default API host (tests).
    pub fn with_api_url(api_url: &str, token: &str, poll_timeout_secs: u64) -> Self {
        // The request timeout must outlast the long-poll window or
        // every idle getUpdates call would abort early.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 30))
            .build()
            .unwrap_or_default();

        Self { client, base_url: format!("{}/bot{}", api_url, token) }
    }

    /// Long poll for inbound updates at or past `offset`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("timeout", timeout_secs as i64)])
            .send()
            .await
            .context("getUpdates request failed")?;

        let body: ApiResponse<Vec<Update>> = response
            .json()
            .await
            .context("getUpdates: undecodable response")?;

        if !body.ok {
            anyhow::bail!(
                "getUpdates rejected: {}",
                body.description.unwrap_or_else(|| "no description".to_string())
            );
        }

        Ok(body.result.unwrap_or_default())
    }

    /// Deliver one Markdown message, retrying within the attempt
    /// budget. Failure to deliver is logged and swallowed; the
    /// dispatcher must keep serving other commands regardless.
    pub async fn send_message(&self, chat_id: i64, text: &str) {
        let url = format!("{}/sendMessage", self.base_url);
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };

        for attempt in 1..=SEND_ATTEMPTS {
            match self.try_send(&url, &request).await {
                Ok(()) => return,
                Err(SendError::RateLimited(retry_after)) => {
                    let wait = retry_after.min(MAX_RETRY_WAIT_SECS);
                    warn!(
                        "sendMessage rate limited (attempt {}/{}), waiting {}s",
                        attempt, SEND_ATTEMPTS, wait
                    );
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                }
                Err(SendError::Other(e)) => {
                    warn!("sendMessage failed (attempt {}/{}): {}", attempt, SEND_ATTEMPTS, e);
                }
            }
        }

        error!("Giving up on message to chat {} after {} attempts", chat_id, SEND_ATTEMPTS);
    }

    async fn try_send(&self, url: &str, request: &SendMessageRequest<'_>) -> Result<(), SendError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| SendError::Other(e.to_string()))?;

        let status = response.status();
        let body: ApiResponse<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| SendError::Other(format!("undecodable response: {}", e)))?;

        if body.ok {
            return Ok(());
        }

        if let Some(retry_after) = body.parameters.and_then(|p| p.retry_after) {
            return Err(SendError::RateLimited(retry_after));
        }

        Err(SendError::Other(format!(
            "{}: {}",
            status,
            body.description.unwrap_or_else(|| "no description".to_string())
        )))
    }
}
