//! Command dispatcher: the long-poll receive loop and the handlers
//! behind `/start`, `/help` and `/mixnodes`.
//!
//! One command is processed at a time; each handler fetches fresh data,
//! renders one report and sends one reply. Poll errors are logged and
//! the loop continues; only process shutdown stops it.

use crate::context::BotContext;
use crate::enrich::enrich;
use crate::explorer::ExplorerClient;
use crate::telegram::Update;
use mixwatch_common::format_reports;
use std::time::Duration;
use tracing::{info, warn};

/// Pause before re-polling after a transport error.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

const HELP_TEXT: &str =
    "Available Commands :\n\t/mixnodes - Retrieve No Trust Verify mixnodes";

const UNKNOWN_TEXT: &str =
    "Sorry, I don't recognize that. Try /help for the available commands.";

/// A recognized inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Mixnodes,
    Unknown,
}

/// Parse the leading command out of a message text. Plain text (no
/// leading slash) is not a command and yields `None`; `/cmd@BotName`
/// addressing is accepted.
pub fn parse_command(text: &str) -> Option<Command> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);

    match name {
        "start" => Some(Command::Start),
        "help" => Some(Command::Help),
        "mixnodes" | "m" => Some(Command::Mixnodes),
        _ => Some(Command::Unknown),
    }
}

/// Receive loop. Blocks on the long poll, dispatches synchronously,
/// loops until the process is shut down.
pub async fn run(ctx: &BotContext) -> anyhow::Result<()> {
    info!("Dispatcher started, watching {} mixnodes", ctx.registry.len());

    let mut offset = 0i64;
    loop {
        let updates = match ctx.telegram.get_updates(offset, ctx.config.poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("Polling failed: {}", e);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            handle_update(ctx, &update).await;
        }
    }
}

async fn handle_update(ctx: &BotContext, update: &Update) {
    let Some(message) = &update.message else { return };
    let Some(text) = &message.text else { return };
    let chat_id = message.chat.id;

    match parse_command(text) {
        Some(Command::Start) => {
            info!("start command from chat {}", chat_id);
            let report = build_report(ctx).await;
            ctx.telegram.send_message(chat_id, &greeting(&report)).await;
        }
        Some(Command::Help) => {
            ctx.telegram.send_message(chat_id, HELP_TEXT).await;
        }
        Some(Command::Mixnodes) => {
            info!("mixnodes command from chat {}", chat_id);
            let report = build_report(ctx).await;
            ctx.telegram.send_message(chat_id, &report).await;
        }
        Some(Command::Unknown) | None => {
            if ctx.config.reply_unknown {
                ctx.telegram.send_message(chat_id, UNKNOWN_TEXT).await;
            }
        }
    }
}

/// Generate one full report: fresh HTTP session, enrich every registry
/// node, render. Partial data never fails the report.
async fn build_report(ctx: &BotContext) -> String {
    let client = ExplorerClient::new(&ctx.config);
    let reports = enrich(&client, ctx.registry.nodes()).await;
    format_reports(&reports)
}

fn greeting(report: &str) -> String {
    format!(
        "Hello!\n[No Trust Verify](https://nym.notrustverify.ch) mixnodes are\n\n{}\n\
         Visit [nym.notrustverify.ch](https://nym.notrustverify.ch) or join us on \
         [Telegram](https://t.me/notrustverify)",
        report
    )
}
