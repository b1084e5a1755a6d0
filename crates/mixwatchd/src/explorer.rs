//! Remote data fetcher for the validator API and the APY table.
//!
//! Every fetch returns `Option`: `None` is the failure sentinel for
//! network errors, non-success statuses and undecodable bodies. Causes
//! are logged here and never propagated past this boundary; callers
//! apply fallback values. No retry at this layer.

use crate::config::BotConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, warn};

/// Network-wide reward parameters, fetched once per report generation.
#[derive(Debug, Clone, Deserialize)]
pub struct RewardParams {
    pub interval: IntervalParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntervalParams {
    /// Stake amount (base units) at which a node is fully saturated.
    /// The API has served this both as a number and a numeric string.
    #[serde(default, deserialize_with = "string_or_number")]
    pub stake_saturation_point: f64,
}

/// One delegation toward a node.
#[derive(Debug, Clone, Deserialize)]
pub struct Delegation {
    pub amount: Coin,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Coin {
    /// Amount in base units, as a numeric string.
    pub amount: String,
}

/// One row of the explorers.guru mixnode table; only the fields we
/// match on.
#[derive(Debug, Clone, Deserialize)]
pub struct ApyEntry {
    #[serde(rename = "identityKey")]
    pub identity_key: String,

    #[serde(default)]
    pub apy: f64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// HTTP client for the external data sources. One instance (and thus
/// one connection pool) is shared across all fetches of a single
/// report generation.
#[derive(Debug)]
pub struct ExplorerClient {
    client: reqwest::Client,
    api_base_url: String,
    apy_url: String,
}

impl ExplorerClient {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.fetch_timeout_secs))
                .build()
                .unwrap_or_default(),
            api_base_url: config.api_base_url.clone(),
            apy_url: config.apy_url.clone(),
        }
    }

    /// Fetch the network reward parameters.
    pub async fn fetch_reward_params(&self) -> Option<RewardParams> {
        let url = format!("{}/epoch/reward_params", self.api_base_url);
        self.fetch_json(&url).await
    }

    /// Fetch the delegation set for one node.
    pub async fn fetch_delegations(&self, mix_id: u32) -> Option<Vec<Delegation>> {
        let url = format!("{}/mixnodes/{}/delegations", self.api_base_url, mix_id);
        self.fetch_json(&url).await
    }

    /// Fetch the network-wide APY table.
    pub async fn fetch_apy_table(&self) -> Option<Vec<ApyEntry>> {
        self.fetch_json(&self.apy_url).await
    }

    /// One GET, decoded into `T`. Failures of any kind become `None`.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        debug!("GET {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("GET {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("GET {} returned {}", url, response.status());
            return None;
        }

        match response.json::<T>().await {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("GET {}: undecodable body: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturation_point_as_string() {
        let params: RewardParams = serde_json::from_str(
            r#"{"interval": {"stake_saturation_point": "940523.75"}}"#,
        )
        .unwrap();
        assert_eq!(params.interval.stake_saturation_point, 940523.75);
    }

    #[test]
    fn test_saturation_point_as_number() {
        let params: RewardParams =
            serde_json::from_str(r#"{"interval": {"stake_saturation_point": 1000}}"#).unwrap();
        assert_eq!(params.interval.stake_saturation_point, 1000.0);
    }

    #[test]
    fn test_saturation_point_missing_defaults_to_zero() {
        let params: RewardParams = serde_json::from_str(r#"{"interval": {}}"#).unwrap();
        assert_eq!(params.interval.stake_saturation_point, 0.0);
    }

    #[test]
    fn test_saturation_point_garbage_string_is_an_error() {
        let result: Result<RewardParams, _> =
            serde_json::from_str(r#"{"interval": {"stake_saturation_point": "lots"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_delegation_decoding() {
        let delegations: Vec<Delegation> = serde_json::from_str(
            r#"[{"amount": {"denom": "unym", "amount": "100"}}, {"amount": {"amount": "50"}}]"#,
        )
        .unwrap();
        assert_eq!(delegations.len(), 2);
        assert_eq!(delegations[0].amount.amount, "100");
    }

    #[test]
    fn test_apy_entry_decoding_ignores_extra_fields() {
        let entries: Vec<ApyEntry> = serde_json::from_str(
            r#"[{"identityKey": "ABC", "apy": 0.052, "mixId": 1, "status": "active"}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].identity_key, "ABC");
        assert_eq!(entries[0].apy, 0.052);
    }
}
