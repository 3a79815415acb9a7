use chrono::{SecondsFormat, Utc};
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;
use ulid::Ulid;
use validator::Validate;

use freshkeep_shared::food::FoodItem;
use freshkeep_shared::parse_date_time;

use crate::command::{CreateFoodInput, UpdateFoodInput};
use crate::error::{InventoryError, InventoryResult};
use crate::store::FoodStore;

/// In-memory `FoodStore` backing tests and the CLI snapshot commands.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<FoodItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<FoodItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    fn check_id(id: &str) -> InventoryResult<()> {
        if id.trim().is_empty() {
            return Err(InventoryError::InvalidId(id.to_owned()));
        }
        Ok(())
    }

    fn pattern(query: &str) -> InventoryResult<Regex> {
        RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map_err(|err| InventoryError::Store(format!("invalid search pattern: {err}")))
    }

    fn now_stamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[async_trait::async_trait]
impl FoodStore for MemoryStore {
    async fn list(&self) -> InventoryResult<Vec<FoodItem>> {
        let items = self.items.read().await;
        let mut listed: Vec<FoodItem> = items.clone();
        // Newest first; items without a creation timestamp sort last.
        listed.sort_by(|a, b| {
            let key_a = a.created_at.as_deref().and_then(parse_date_time);
            let key_b = b.created_at.as_deref().and_then(parse_date_time);
            key_b.cmp(&key_a)
        });
        Ok(listed)
    }

    async fn get_by_id(&self, id: &str) -> InventoryResult<FoodItem> {
        Self::check_id(id)?;
        let items = self.items.read().await;
        items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(InventoryError::NotFound)
    }

    async fn create(&self, input: CreateFoodInput) -> InventoryResult<FoodItem> {
        input.validate()?;
        let stamp = Self::now_stamp();
        let item = FoodItem {
            id: Ulid::new().to_string(),
            name: input.name,
            category: input.category,
            storage_location: input.storage_location,
            expire_date: input.expire_date,
            purchase_date: input.purchase_date,
            shelf_life: input.shelf_life,
            quantity: input.quantity.unwrap_or(1),
            unit: input.unit,
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
            synonyms: input.synonyms,
            description: input.description,
            nutrition_info: input.nutrition_info,
        };

        let mut items = self.items.write().await;
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &str, input: UpdateFoodInput) -> InventoryResult<FoodItem> {
        Self::check_id(id)?;
        input.validate()?;

        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(InventoryError::NotFound)?;

        if let Some(name) = input.name {
            item.name = name;
        }
        if let Some(category) = input.category {
            item.category = category;
        }
        if let Some(storage_location) = input.storage_location {
            item.storage_location = storage_location;
        }
        if let Some(expire_date) = input.expire_date {
            item.expire_date = expire_date;
        }
        if let Some(purchase_date) = input.purchase_date {
            item.purchase_date = Some(purchase_date);
        }
        if let Some(shelf_life) = input.shelf_life {
            item.shelf_life = Some(shelf_life);
        }
        if let Some(quantity) = input.quantity {
            item.quantity = quantity;
        }
        if let Some(unit) = input.unit {
            item.unit = Some(unit);
        }
        if let Some(synonyms) = input.synonyms {
            item.synonyms = synonyms;
        }
        if let Some(description) = input.description {
            item.description = Some(description);
        }
        if let Some(nutrition_info) = input.nutrition_info {
            item.nutrition_info = Some(nutrition_info);
        }
        item.updated_at = Some(Self::now_stamp());

        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> InventoryResult<()> {
        Self::check_id(id)?;
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Err(InventoryError::NotFound);
        }
        Ok(())
    }

    async fn search(&self, query: &str, limit: usize) -> InventoryResult<Vec<FoodItem>> {
        if query.is_empty() {
            return Ok(vec![]);
        }
        let pattern = Self::pattern(query)?;
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| {
                pattern.is_match(&item.name)
                    || pattern.is_match(&item.category)
                    || pattern.is_match(&item.storage_location)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|description| pattern.is_match(description))
                    || item.synonyms.iter().any(|s| pattern.is_match(s))
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn suggestions(&self, query: &str, limit: usize) -> InventoryResult<Vec<FoodItem>> {
        if query.is_empty() {
            return Ok(vec![]);
        }
        let prefix = Self::pattern(&format!("^{query}"))?;
        let contains = Self::pattern(query)?;

        let items = self.items.read().await;
        let mut picked: Vec<FoodItem> = Vec::new();
        let mut push = |item: &FoodItem, picked: &mut Vec<FoodItem>| {
            if picked.len() < limit && !picked.iter().any(|p| p.id == item.id) {
                picked.push(item.clone());
            }
        };

        for item in items.iter().filter(|item| prefix.is_match(&item.name)) {
            push(item, &mut picked);
        }
        for item in items.iter().filter(|item| contains.is_match(&item.name)) {
            push(item, &mut picked);
        }
        for item in items
            .iter()
            .filter(|item| item.synonyms.iter().any(|s| contains.is_match(s)))
        {
            push(item, &mut picked);
        }

        Ok(picked)
    }
}
