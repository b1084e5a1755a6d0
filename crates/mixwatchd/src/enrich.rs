//! Enrichment engine: combines the registry with fetched data into
//! per-node report records.
//!
//! A failure on one node never aborts the batch. Whenever a value is
//! missing or malformed, that node's stake and saturation both reset
//! to the 0.0 "unknown" sentinel and processing continues; the
//! formatter suppresses the affected lines.

use crate::explorer::{ApyEntry, Delegation, ExplorerClient};
use mixwatch_common::{Mixnode, NodeReport};

/// Base units per displayed NYM.
pub const UNYM: f64 = 1_000_000.0;

/// Saturation above this renders a node as not accepting delegations,
/// regardless of the operator flag.
pub const SATURATION_CUTOFF: f64 = 0.99;

/// Produce one report per registry node, in registry order.
///
/// Reward parameters and the APY table are fetched once and shared
/// across all nodes of this call; delegations are fetched per node.
pub async fn enrich(client: &ExplorerClient, nodes: &[Mixnode]) -> Vec<NodeReport> {
    let saturation_point = client
        .fetch_reward_params()
        .await
        .map(|params| params.interval.stake_saturation_point)
        .unwrap_or(0.0);

    let apy_table = client.fetch_apy_table().await.unwrap_or_default();

    let mut reports = Vec::with_capacity(nodes.len());
    for node in nodes {
        let delegations = client.fetch_delegations(node.mix_id).await;
        let apy = lookup_apy(&apy_table, &node.idkey);
        reports.push(compute_report(node, saturation_point, delegations, apy));
    }

    reports
}

/// Pure enrichment kernel for one node.
///
/// `delegations: None` means the fetch failed. A single unparsable
/// amount poisons the whole set, on the grounds that a partial sum
/// would silently understate the stake.
pub fn compute_report(
    node: &Mixnode,
    saturation_point: f64,
    delegations: Option<Vec<Delegation>>,
    apy: f64,
) -> NodeReport {
    let (stake, saturation) = match delegations.as_deref().map(sum_delegations) {
        Some(Some(raw_stake)) => {
            let saturation = if saturation_point > 0.0 {
                raw_stake / saturation_point
            } else {
                0.0
            };
            (raw_stake / UNYM, saturation)
        }
        _ => (0.0, 0.0),
    };

    let delegations_open = saturation <= SATURATION_CUTOFF && node.accept_delegation;

    NodeReport {
        name: node.name.clone(),
        identity_key: node.idkey.clone(),
        mix_id: node.mix_id,
        stake,
        saturation,
        delegations_open,
        apy,
    }
}

fn sum_delegations(delegations: &[Delegation]) -> Option<f64> {
    let mut total = 0.0;
    for delegation in delegations {
        total += delegation.amount.amount.parse::<f64>().ok()?;
    }
    Some(total)
}

fn lookup_apy(table: &[ApyEntry], identity_key: &str) -> f64 {
    table
        .iter()
        .find(|entry| entry.identity_key == identity_key)
        .map(|entry| entry.apy)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::Coin;
    use approx::assert_relative_eq;

    fn node(accept_delegation: bool) -> Mixnode {
        Mixnode {
            mix_id: 1,
            idkey: "ABC".to_string(),
            name: "Node1".to_string(),
            accept_delegation,
        }
    }

    fn delegations(amounts: &[&str]) -> Vec<Delegation> {
        amounts
            .iter()
            .map(|amount| Delegation { amount: Coin { amount: (*amount).to_string() } })
            .collect()
    }

    #[test]
    fn test_normal_enrichment() {
        let report = compute_report(&node(true), 1000.0, Some(delegations(&["100", "50"])), 0.0);

        assert_relative_eq!(report.saturation, 0.15);
        assert_relative_eq!(report.stake, 150.0 / UNYM);
        assert!(report.delegations_open);
    }

    #[test]
    fn test_fetch_failure_resets_both_values() {
        let report = compute_report(&node(true), 1000.0, None, 0.0);

        assert_eq!(report.stake, 0.0);
        assert_eq!(report.saturation, 0.0);
    }

    #[test]
    fn test_malformed_amount_resets_both_values() {
        let report =
            compute_report(&node(true), 1000.0, Some(delegations(&["100", "oops"])), 0.0);

        assert_eq!(report.stake, 0.0);
        assert_eq!(report.saturation, 0.0);
    }

    #[test]
    fn test_zero_saturation_point_keeps_stake() {
        let report = compute_report(&node(true), 0.0, Some(delegations(&["5000000"])), 0.0);

        assert_relative_eq!(report.stake, 5.0);
        assert_eq!(report.saturation, 0.0);
    }

    #[test]
    fn test_negative_saturation_point_is_treated_as_unknown() {
        let report = compute_report(&node(true), -10.0, Some(delegations(&["100"])), 0.0);
        assert_eq!(report.saturation, 0.0);
    }

    #[test]
    fn test_unit_conversion() {
        let report = compute_report(&node(true), 10_000_000.0, Some(delegations(&["5000000"])), 0.0);
        assert_relative_eq!(report.stake, 5.0);
    }

    #[test]
    fn test_oversaturated_node_is_closed_despite_flag() {
        // saturation 0.995 > cutoff: flag no longer matters
        let report = compute_report(&node(true), 1000.0, Some(delegations(&["995"])), 0.0);

        assert_relative_eq!(report.saturation, 0.995);
        assert!(!report.delegations_open);
    }

    #[test]
    fn test_operator_flag_closes_delegations() {
        let report = compute_report(&node(false), 1000.0, Some(delegations(&["100"])), 0.0);
        assert!(!report.delegations_open);
    }

    #[test]
    fn test_cutoff_is_exclusive() {
        let report = compute_report(&node(true), 1000.0, Some(delegations(&["990"])), 0.0);
        assert!(report.delegations_open);
    }

    #[test]
    fn test_empty_delegation_set_is_a_genuine_zero() {
        let report = compute_report(&node(true), 1000.0, Some(Vec::new()), 0.0);

        assert_eq!(report.stake, 0.0);
        assert_eq!(report.saturation, 0.0);
    }

    #[test]
    fn test_apy_lookup() {
        let table = vec![
            ApyEntry { identity_key: "XYZ".to_string(), apy: 0.08 },
            ApyEntry { identity_key: "ABC".to_string(), apy: 0.052 },
        ];

        assert_relative_eq!(lookup_apy(&table, "ABC"), 0.052);
        assert_eq!(lookup_apy(&table, "NOPE"), 0.0);
    }
}
