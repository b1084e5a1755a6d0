//! Per-node report record and the report formatter.
//!
//! `format_reports` is a pure function of its input: identical report
//! sequences yield byte-identical text. All fallback policy lives in
//! the enrichment side; here `0.0` simply means "unknown" and the
//! corresponding lines are omitted rather than rendering a misleading
//! zero.

use crate::humanize::human_format;

/// Marker for a node accepting delegations.
pub const STATE_ACTIVE: &str = "🟩";

/// Marker for a node not accepting delegations (full or closed).
pub const STATE_INACTIVE: &str = "🟥";

/// Explorer page for a single mixnode, keyed by mix id.
pub const EXPLORER_NODE_URL: &str = "https://explorer.nymtech.net/network-components/mixnode";

/// Enriched statistics for one mixnode, computed fresh per report.
///
/// `stake` is in display units (NYM), `saturation` and `apy` are
/// ratios. A value of `0.0` for stake/saturation/apy is the "unknown"
/// sentinel applied when upstream data was missing or malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeReport {
    pub name: String,
    pub identity_key: String,
    pub mix_id: u32,
    pub stake: f64,
    pub saturation: f64,
    /// Whether the node currently takes new delegations. Only
    /// meaningful (and only rendered) when `saturation > 0.0`.
    pub delegations_open: bool,
    pub apy: f64,
}

/// Render the ordered report sequence into one Markdown text block.
pub fn format_reports(reports: &[NodeReport]) -> String {
    let blocks: Vec<String> = reports.iter().map(format_node).collect();
    blocks.join("\n\n")
}

fn format_node(report: &NodeReport) -> String {
    let mut lines = vec![
        report.name.clone(),
        format!("Identity Key: `{}`", report.identity_key),
    ];

    if report.saturation > 0.0 {
        lines.push(format!(
            "Stake saturation: {:.2}% ({} NYM)",
            report.saturation * 100.0,
            human_format(report.stake, 2)
        ));

        let marker = if report.delegations_open { STATE_ACTIVE } else { STATE_INACTIVE };
        lines.push(format!("**Delegations accepted: {}**", marker));
    }

    if report.apy > 0.0 {
        lines.push(format!("APY: {:.2}%", report.apy * 100.0));
    }

    lines.push(format!("[Explorer]({}/{})", EXPLORER_NODE_URL, report.mix_id));

    lines.join("\n")
}
