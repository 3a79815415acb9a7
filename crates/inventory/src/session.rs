use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::Serialize;

use freshkeep_shared::category::{resolve_image, Category, ImageKey};
use freshkeep_shared::food::{FoodItem, TakenOutRecord};
use freshkeep_shared::{days_until_expiry, parse_date, parse_date_time, WARNING_THRESHOLD};

use crate::error::InventoryResult;
use crate::store::FoodStore;

/// Days a taken-out record stays visible before it is purged.
pub const TAKEN_OUT_RETENTION_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub total_capacity: u32,
    pub recent_window_days: i64,
    pub recent_visible: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            total_capacity: 100,
            recent_window_days: 7,
            recent_visible: 4,
        }
    }
}

pub type SnapshotObserver = Box<dyn Fn() + Send + Sync>;

/// One client's view over an immutable inventory snapshot plus the local
/// taken-out ledger. Mutations (`take_out`, `refresh`) invalidate the
/// snapshot and notify subscribed observers; reads never block each other.
pub struct InventorySession {
    snapshot: Vec<FoodItem>,
    taken_out: Vec<TakenOutRecord>,
    options: SessionOptions,
    observers: Vec<SnapshotObserver>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub active_count: usize,
    pub expired_count: usize,
    pub expiring_soon_count: usize,
    pub low_stock: i64,
}

/// Row of the merged recent view: active additions and taken-out records of
/// the last window, newest first.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub storage_location: String,
    pub expire_date: String,
    pub image: ImageKey,
    pub days_left: i64,
    pub added_at: String,
    pub is_taken_out: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    #[serde(flatten)]
    pub item: FoodItem,
    pub image: ImageKey,
    pub days_left: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyEntry {
    #[serde(flatten)]
    pub item: FoodItem,
    pub days_left: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringSpotlight {
    pub name: String,
    pub image: ImageKey,
    pub days_left: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuickRecipe {
    pub name: String,
    pub image: ImageKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecommendCard {
    pub ingredient: ExpiringSpotlight,
    pub recipe: QuickRecipe,
}

/// Spotlight ingredient name fragment -> quick recipe, first hit wins.
const QUICK_RECIPES: &[(&str, &str, ImageKey)] = &[
    ("番茄", "意面", ImageKey::Noodles),
    ("土豆", "土豆丝", ImageKey::Potato),
    ("鸡蛋", "炒蛋", ImageKey::Eggs),
    ("牛奶", "奶昔", ImageKey::Milk),
    ("面包", "三明治", ImageKey::Bread),
    ("蔬菜", "蔬菜沙拉", ImageKey::Salad),
];

impl InventorySession {
    pub fn new(snapshot: Vec<FoodItem>) -> Self {
        Self::with_options(snapshot, SessionOptions::default())
    }

    pub fn with_options(snapshot: Vec<FoodItem>, options: SessionOptions) -> Self {
        Self {
            snapshot,
            taken_out: Vec::new(),
            options,
            observers: Vec::new(),
        }
    }

    /// Seed the taken-out ledger, e.g. from a persisted snapshot file.
    pub fn with_taken_out(mut self, records: Vec<TakenOutRecord>) -> Self {
        self.taken_out = records;
        self
    }

    pub fn snapshot(&self) -> &[FoodItem] {
        &self.snapshot
    }

    pub fn active_count(&self) -> usize {
        self.snapshot.len()
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Replace the snapshot after external mutations; notifies observers.
    pub fn refresh(&mut self, snapshot: Vec<FoodItem>) {
        self.snapshot = snapshot;
        self.notify_observers();
    }

    pub fn subscribe(&mut self, observer: impl Fn() + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify_observers(&self) {
        for observer in &self.observers {
            observer();
        }
    }

    /// Count of items already past their expiry date, at day granularity.
    pub fn expired_count(&self, today: NaiveDate) -> usize {
        self.snapshot
            .iter()
            .filter_map(|item| parse_date(&item.expire_date))
            .filter(|expire| (*expire - today).num_days() < 0)
            .count()
    }

    /// Count of items expiring within the warning window, expired excluded.
    pub fn expiring_soon_count(&self, today: NaiveDate) -> usize {
        self.snapshot
            .iter()
            .filter_map(|item| parse_date(&item.expire_date))
            .filter(|expire| (0..=WARNING_THRESHOLD).contains(&(*expire - today).num_days()))
            .count()
    }

    pub fn low_stock(&self) -> i64 {
        self.options.total_capacity as i64 - self.snapshot.len() as i64
    }

    pub fn summary(&self, today: NaiveDate) -> InventorySummary {
        InventorySummary {
            active_count: self.snapshot.len(),
            expired_count: self.expired_count(today),
            expiring_soon_count: self.expiring_soon_count(today),
            low_stock: self.low_stock(),
        }
    }

    pub fn stock_overview(&self) -> String {
        format!(
            "总库存: {}项\n已使用: {}项\n剩余库存: {}项",
            self.options.total_capacity,
            self.snapshot.len(),
            self.low_stock()
        )
    }

    /// Merged recent view over the full window, newest first. Active items
    /// need a parseable creation or update timestamp; taken-out records are
    /// tagged and win over an active item with the same id.
    pub fn recent_entries(&self, now: NaiveDateTime) -> Vec<RecentEntry> {
        let window_start = (now - Duration::days(self.options.recent_window_days)).date();

        let mut order: Vec<String> = Vec::new();
        let mut merged: HashMap<String, (NaiveDateTime, RecentEntry)> = HashMap::new();

        for item in &self.snapshot {
            let Some(ts) = item.effective_timestamp() else {
                tracing::debug!(name = %item.name, "recent view skips item without timestamp");
                continue;
            };
            if ts.date() < window_start {
                continue;
            }
            if !merged.contains_key(&item.id) {
                order.push(item.id.clone());
            }
            let added_at = added_at_string(item).unwrap_or_default();
            merged.insert(item.id.clone(), (ts, recent_entry(item, added_at, false, now)));
        }

        for record in &self.taken_out {
            let Some(out_ts) = record.taken_out_timestamp() else {
                continue;
            };
            if out_ts.date() < window_start {
                continue;
            }
            let sort_ts = record.item.effective_timestamp().unwrap_or(out_ts);
            let added_at =
                added_at_string(&record.item).unwrap_or_else(|| record.taken_out_date.clone());
            if !merged.contains_key(&record.item.id) {
                order.push(record.item.id.clone());
            }
            merged.insert(
                record.item.id.clone(),
                (sort_ts, recent_entry(&record.item, added_at, true, now)),
            );
        }

        let mut entries: Vec<(NaiveDateTime, RecentEntry)> = order
            .iter()
            .filter_map(|id| merged.remove(id))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        entries.into_iter().map(|(_, entry)| entry).collect()
    }

    /// The capped recent view unless `expanded`.
    pub fn recent_view(&self, now: NaiveDateTime, expanded: bool) -> Vec<RecentEntry> {
        let entries = self.recent_entries(now);
        if expanded {
            entries
        } else {
            entries
                .into_iter()
                .take(self.options.recent_visible)
                .collect()
        }
    }

    pub fn recent_count(&self, now: NaiveDateTime) -> usize {
        self.recent_entries(now).len()
    }

    /// Items of one canonical bucket: exact label pass first, name-keyword
    /// fallback only when the label pass matched nothing.
    pub fn foods_by_category(&self, category_id: u8, now: NaiveDateTime) -> Vec<CategoryEntry> {
        let Some(category) = Category::from_id(category_id) else {
            return vec![];
        };

        let mut matched: Vec<&FoodItem> = self
            .snapshot
            .iter()
            .filter(|item| category.matches_label(&item.category))
            .collect();
        if matched.is_empty() {
            matched = self
                .snapshot
                .iter()
                .filter(|item| category.matches_name(&item.name))
                .collect();
        }

        matched
            .into_iter()
            .map(|item| {
                let label = if item.category.is_empty() {
                    category.as_ref()
                } else {
                    item.category.as_str()
                };
                CategoryEntry {
                    image: resolve_image(&item.name, label),
                    days_left: days_until_expiry(&item.expire_date, now),
                    item: item.clone(),
                }
            })
            .collect()
    }

    /// Distinct raw category labels present in the snapshot, sorted.
    pub fn actual_categories(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .snapshot
            .iter()
            .map(|item| item.category.clone())
            .filter(|label| !label.is_empty())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Items expiring within the warning window, most urgent first.
    pub fn expiring_items(&self, now: NaiveDateTime) -> Vec<UrgencyEntry> {
        let mut expiring: Vec<UrgencyEntry> = self
            .snapshot
            .iter()
            .filter(|item| parse_date_time(&item.expire_date).is_some())
            .map(|item| UrgencyEntry {
                days_left: days_until_expiry(&item.expire_date, now),
                item: item.clone(),
            })
            .filter(|entry| (0..=WARNING_THRESHOLD).contains(&entry.days_left))
            .collect();
        expiring.sort_by_key(|entry| entry.days_left);
        expiring
    }

    /// Already-expired items, longest expired first.
    pub fn expired_items(&self, now: NaiveDateTime) -> Vec<UrgencyEntry> {
        let mut expired: Vec<UrgencyEntry> = self
            .snapshot
            .iter()
            .filter(|item| parse_date_time(&item.expire_date).is_some())
            .map(|item| UrgencyEntry {
                days_left: days_until_expiry(&item.expire_date, now),
                item: item.clone(),
            })
            .filter(|entry| entry.days_left < 0)
            .collect();
        expired.sort_by_key(|entry| entry.days_left);
        expired
    }

    /// The most urgent expiring item, or the fixed placeholder when nothing
    /// is close to expiry.
    pub fn spotlight(&self, now: NaiveDateTime) -> ExpiringSpotlight {
        match self.expiring_items(now).into_iter().next() {
            Some(entry) => ExpiringSpotlight {
                image: resolve_image(&entry.item.name, &entry.item.category),
                name: entry.item.name,
                days_left: entry.days_left,
            },
            None => ExpiringSpotlight {
                name: "番茄".into(),
                image: ImageKey::Potato,
                days_left: 2,
            },
        }
    }

    /// Spotlight ingredient paired with its quick recipe suggestion.
    pub fn recommend_card(&self, now: NaiveDateTime) -> RecommendCard {
        let ingredient = self.spotlight(now);
        let recipe = QUICK_RECIPES
            .iter()
            .find(|(key, _, _)| ingredient.name.contains(key))
            .map(|(_, name, image)| QuickRecipe {
                name: (*name).to_owned(),
                image: *image,
            })
            .unwrap_or(QuickRecipe {
                name: "意面".into(),
                image: ImageKey::Noodles,
            });
        RecommendCard { ingredient, recipe }
    }

    /// Remove the item from the store and move it into the taken-out
    /// ledger (front-inserted, pruned to the retention window).
    pub async fn take_out(
        &mut self,
        store: &dyn FoodStore,
        id: &str,
        now: NaiveDateTime,
    ) -> InventoryResult<TakenOutRecord> {
        let item = match self.snapshot.iter().find(|item| item.id == id) {
            Some(item) => item.clone(),
            None => store.get_by_id(id).await?,
        };

        store.delete(id).await?;
        self.snapshot.retain(|entry| entry.id != id);

        let record = TakenOutRecord {
            item,
            taken_out_date: now.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.taken_out.insert(0, record.clone());
        self.prune_taken_out(now);
        self.notify_observers();
        Ok(record)
    }

    /// Ledger records still inside the retention window, newest first.
    pub fn taken_out_records(&self, now: NaiveDateTime) -> Vec<TakenOutRecord> {
        let cutoff = now - Duration::days(TAKEN_OUT_RETENTION_DAYS);
        self.taken_out
            .iter()
            .filter(|record| {
                record
                    .taken_out_timestamp()
                    .map(|ts| ts >= cutoff)
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    pub fn clear_taken_out(&mut self) {
        self.taken_out.clear();
        self.notify_observers();
    }

    fn prune_taken_out(&mut self, now: NaiveDateTime) {
        let cutoff = now - Duration::days(TAKEN_OUT_RETENTION_DAYS);
        self.taken_out.retain(|record| {
            record
                .taken_out_timestamp()
                .map(|ts| ts >= cutoff)
                .unwrap_or(false)
        });
    }
}

fn added_at_string(item: &FoodItem) -> Option<String> {
    item.created_at
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            item.updated_at
                .as_deref()
                .filter(|value| !value.trim().is_empty())
        })
        .map(str::to_owned)
}

fn recent_entry(item: &FoodItem, added_at: String, is_taken_out: bool, now: NaiveDateTime) -> RecentEntry {
    RecentEntry {
        id: item.id.clone(),
        name: item.name.clone(),
        category: item.category.clone(),
        storage_location: item.storage_location.clone(),
        expire_date: item.expire_date.clone(),
        image: resolve_image(&item.name, &item.category),
        days_left: days_until_expiry(&item.expire_date, now),
        added_at,
        is_taken_out,
    }
}
