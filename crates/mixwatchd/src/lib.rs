//! Mixwatch Daemon - Telegram bot reporting mixnode delegation stats.
//!
//! Answers `/mixnodes` (and friends) with a formatted report on a fixed
//! set of monitored mixnodes, enriched with live data from the validator
//! API and the explorers.guru APY table.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod enrich;
pub mod explorer;
pub mod telegram;
