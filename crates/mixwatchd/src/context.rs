//! Bot context: everything a command handler needs, constructed once
//! at startup and passed explicitly. No process-wide mutable state.

use crate::config::BotConfig;
use crate::telegram::TelegramClient;
use mixwatch_common::MixnodeRegistry;

/// Shared, read-only state for the running bot.
#[derive(Debug)]
pub struct BotContext {
    pub config: BotConfig,
    pub registry: MixnodeRegistry,
    pub telegram: TelegramClient,
}

impl BotContext {
    pub fn new(config: BotConfig, registry: MixnodeRegistry) -> Self {
        let telegram = TelegramClient::new(&config.token, config.poll_timeout_secs);
        Self { config, registry, telegram }
    }
}
