//! Node registry: the static list of monitored mixnodes.
//!
//! Loaded once at startup from a JSON file shaped as
//! `{ "mixnodes": [ { "mix_id": .., "idkey": .., "name": .., "accept_delegation": .. } ] }`.
//! Read-only for the rest of the process lifetime; iteration preserves
//! file order, which is also the order of every rendered report.

use crate::error::BotError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// One monitored mixnode, as declared in the registry file.
#[derive(Debug, Clone, Deserialize)]
pub struct Mixnode {
    /// Numeric id used in remote endpoint paths and explorer links.
    pub mix_id: u32,

    /// Stable identity key.
    pub idkey: String,

    /// Display name.
    pub name: String,

    /// Whether the operator accepts new delegations.
    pub accept_delegation: bool,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    mixnodes: Vec<Mixnode>,
}

/// Static, ordered collection of monitored mixnodes.
#[derive(Debug, Clone)]
pub struct MixnodeRegistry {
    nodes: Vec<Mixnode>,
}

impl MixnodeRegistry {
    /// Load the registry from a JSON file.
    ///
    /// A missing or malformed file is fatal: the bot must not start
    /// serving commands without its node list.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BotError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BotError::Registry(format!("cannot read {}: {}", path.display(), e))
        })?;

        let file: RegistryFile = serde_json::from_str(&content).map_err(|e| {
            BotError::Registry(format!("cannot parse {}: {}", path.display(), e))
        })?;

        info!("Loaded {} mixnodes from {}", file.mixnodes.len(), path.display());
        Ok(Self { nodes: file.mixnodes })
    }

    /// Nodes in file order.
    pub fn nodes(&self) -> &[Mixnode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
