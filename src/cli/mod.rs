mod assistant;
mod inventory;
mod recipe;
mod report;

pub use assistant::*;
pub use inventory::*;
pub use recipe::*;
pub use report::*;

use chrono::NaiveDateTime;

use freshkeep_inventory::InventorySession;

use crate::config::Config;
use crate::snapshot::{load_snapshot, Snapshot};

/// Wall-clock reference for expiry math. Dates in snapshots are local
/// dates, so commands compare against local time.
pub(crate) fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub(crate) fn open_session(
    config: &Config,
    snapshot_path: &str,
) -> freshkeep_shared::Result<(Snapshot, InventorySession)> {
    let snapshot = load_snapshot(snapshot_path)?;
    let session = snapshot.session(config.inventory.session_options());
    Ok((snapshot, session))
}
