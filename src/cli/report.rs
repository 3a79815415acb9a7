use anyhow::Result;

use freshkeep_inventory::stats;

use crate::snapshot::load_snapshot;

/// Monthly statistics report for the current month.
#[tracing::instrument]
pub fn report(snapshot_path: &str) -> Result<String> {
    let snapshot = load_snapshot(snapshot_path)?;
    let report = stats::monthly_report(&snapshot.foods, super::local_now());

    Ok(serde_json::to_string_pretty(&report)?)
}
