use std::path::Path;

use serde::Deserialize;

use freshkeep_inventory::{InventorySession, MemoryStore, SessionOptions};
use freshkeep_shared::food::{FoodItem, TakenOutRecord};

/// On-disk inventory state backing a CLI run.
///
/// Two wire shapes are accepted: a bare JSON array of items, or a document
/// with `foods` plus the optional `takenOutFoods` ledger.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    #[serde(default)]
    pub taken_out_foods: Vec<TakenOutRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Items(Vec<FoodItem>),
    Document(Snapshot),
}

impl Snapshot {
    pub fn session(&self, options: SessionOptions) -> InventorySession {
        InventorySession::with_options(self.foods.clone(), options)
            .with_taken_out(self.taken_out_foods.clone())
    }

    pub fn store(&self) -> MemoryStore {
        MemoryStore::with_items(self.foods.clone())
    }
}

/// Read a snapshot file. A missing file is an empty inventory; anything
/// else that fails is an infrastructure error.
pub fn load_snapshot(path: impl AsRef<Path>) -> freshkeep_shared::Result<Snapshot> {
    let path = path.as_ref();

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "snapshot file missing, starting empty");
            return Ok(Snapshot::default());
        }
        Err(err) => {
            freshkeep_shared::bail!("failed to read snapshot {}: {err}", path.display())
        }
    };

    match serde_json::from_str(&raw) {
        Ok(SnapshotFile::Items(foods)) => Ok(Snapshot {
            foods,
            taken_out_foods: Vec::new(),
        }),
        Ok(SnapshotFile::Document(snapshot)) => Ok(snapshot),
        Err(err) => {
            freshkeep_shared::bail!("malformed snapshot {}: {err}", path.display())
        }
    }
}
