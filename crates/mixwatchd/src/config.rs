//! Bot configuration, resolved once at process start.
//!
//! The token and the registry path come from the command line or the
//! environment; everything else has built-in defaults. No config file
//! and no other persisted state.

use mixwatch_common::BotError;
use std::env;

/// Environment variable holding the bot credential token.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

fn default_api_base_url() -> String {
    "https://validator.nymtech.net/api/v1".to_string()
}

fn default_apy_url() -> String {
    "https://mixnet.api.explorers.guru/api/mixnodes".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_poll_timeout() -> u64 {
    30
}

/// Runtime configuration for the bot process.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot credential token.
    pub token: String,

    /// Path to the mixnode registry JSON file.
    pub mixnodes_path: String,

    /// Reply to unrecognized commands/messages with a static hint.
    pub reply_unknown: bool,

    /// Base URL of the validator API (network params, delegations).
    pub api_base_url: String,

    /// URL of the explorers.guru mixnode table (APY source).
    pub apy_url: String,

    /// Per-request timeout for data fetches, in seconds.
    pub fetch_timeout_secs: u64,

    /// Long-poll window for inbound updates, in seconds.
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    /// Build the config from process arguments, falling back to the
    /// environment for the token. A missing token is fatal.
    pub fn resolve(
        token: Option<String>,
        mixnodes_path: String,
        reply_unknown: bool,
    ) -> Result<Self, BotError> {
        let token = token
            .or_else(|| env::var(TOKEN_ENV_VAR).ok())
            .filter(|t| !t.is_empty())
            .ok_or(BotError::MissingToken)?;

        Ok(Self {
            token,
            mixnodes_path,
            reply_unknown,
            api_base_url: default_api_base_url(),
            apy_url: default_apy_url(),
            fetch_timeout_secs: default_fetch_timeout(),
            poll_timeout_secs: default_poll_timeout(),
        })
    }
}
