//! Mixwatch Common - Shared types for the mixnode report bot.
//!
//! Holds the node registry, the per-node report record, the report
//! formatter, and the magnitude humanizer. Everything here is pure:
//! no I/O, no HTTP. The daemon crate owns the fetching.

pub mod error;
pub mod humanize;
pub mod registry;
pub mod report;

pub use error::BotError;
pub use registry::{Mixnode, MixnodeRegistry};
pub use report::{format_reports, NodeReport};
