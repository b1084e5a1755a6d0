//! Error types for Mixwatch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Registry file error: {0}")]
    Registry(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Missing bot token. Pass --token or set TELEGRAM_BOT_TOKEN.")]
    MissingToken,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
