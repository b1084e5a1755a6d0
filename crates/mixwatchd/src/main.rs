//! Mixwatch Daemon - Telegram bot for mixnode delegation reports.
//!
//! Loads the node registry, then long polls Telegram for commands and
//! answers with live-enriched reports.

use anyhow::Result;
use clap::Parser;
use mixwatch_common::MixnodeRegistry;
use mixwatchd::config::BotConfig;
use mixwatchd::context::BotContext;
use mixwatchd::dispatcher;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "mixwatchd")]
#[command(about = "Telegram bot reporting mixnode delegation stats", long_about = None)]
#[command(version)]
struct Cli {
    /// Telegram bot token (falls back to TELEGRAM_BOT_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Path to the mixnode registry JSON file
    #[arg(long, default_value = "mixnodes.json")]
    mixnodes: String,

    /// Reply to unrecognized commands with a usage hint
    #[arg(long)]
    reply_unknown: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    info!("Mixwatch v{} starting", env!("CARGO_PKG_VERSION"));

    let config = BotConfig::resolve(cli.token, cli.mixnodes, cli.reply_unknown)?;
    let registry = MixnodeRegistry::load(&config.mixnodes_path)?;

    let ctx = BotContext::new(config, registry);
    dispatcher::run(&ctx).await
}
