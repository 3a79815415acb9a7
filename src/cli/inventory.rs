use anyhow::Result;
use serde::Serialize;
use strum::VariantArray;

use freshkeep_inventory::FoodStore;
use freshkeep_shared::category::Category;

use crate::config::Config;
use crate::snapshot::load_snapshot;

/// Stock counters plus the expiry summary, as display lines.
#[tracing::instrument(skip(config))]
pub fn status(config: &Config, snapshot_path: &str) -> Result<String> {
    let (_, session) = super::open_session(config, snapshot_path)?;
    let summary = session.summary(super::local_now().date());

    Ok(format!(
        "{}\n即将过期: {}项\n已过期: {}项",
        session.stock_overview(),
        summary.expiring_soon_count,
        summary.expired_count
    ))
}

/// Recent additions and take-outs, newest first. `all` lifts the
/// collapsed-view row cap.
#[tracing::instrument(skip(config))]
pub fn recent(config: &Config, snapshot_path: &str, all: bool) -> Result<String> {
    let (_, session) = super::open_session(config, snapshot_path)?;
    let entries = session.recent_view(super::local_now(), all);

    Ok(serde_json::to_string_pretty(&entries)?)
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub id: u8,
    pub label: String,
    pub count: usize,
}

/// Item counts for every category bucket.
#[tracing::instrument(skip(config))]
pub fn categories(config: &Config, snapshot_path: &str) -> Result<String> {
    let (_, session) = super::open_session(config, snapshot_path)?;
    let now = super::local_now();

    let counts: Vec<CategoryCount> = Category::VARIANTS
        .iter()
        .map(|category| CategoryCount {
            id: category.id(),
            label: category.to_string(),
            count: session.foods_by_category(category.id(), now).len(),
        })
        .collect();

    Ok(serde_json::to_string_pretty(&counts)?)
}

/// Items resolved into one category bucket. An unknown id is an empty
/// list, not an error.
#[tracing::instrument(skip(config))]
pub fn category(config: &Config, snapshot_path: &str, id: u8) -> Result<String> {
    let (_, session) = super::open_session(config, snapshot_path)?;
    let entries = session.foods_by_category(id, super::local_now());

    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Keyword search across names, categories, locations, synonyms and
/// descriptions.
#[tracing::instrument]
pub async fn search(snapshot_path: &str, query: &str, limit: usize) -> Result<String> {
    let store = load_snapshot(snapshot_path)?.store();
    let items = store.search(query, limit).await?;

    Ok(serde_json::to_string_pretty(&items)?)
}

/// Name completions for a prefix, one per line.
#[tracing::instrument]
pub async fn suggest(snapshot_path: &str, prefix: &str, limit: usize) -> Result<String> {
    let store = load_snapshot(snapshot_path)?.store();
    let items = store.suggestions(prefix, limit).await?;

    let names: Vec<String> = items.into_iter().map(|item| item.name).collect();
    Ok(names.join("\n"))
}
