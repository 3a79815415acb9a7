use freshkeep_shared::food::FoodItem;

use crate::command::{CreateFoodInput, UpdateFoodInput};
use crate::error::InventoryResult;

pub const DEFAULT_SEARCH_LIMIT: usize = 50;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Persistence seam for food items. `get_by_id`/`update`/`delete` report a
/// missing item as `InventoryError::NotFound`, distinct from transport
/// failures; a malformed id is rejected as `InvalidId` before the store is
/// touched.
#[async_trait::async_trait]
pub trait FoodStore: Send + Sync {
    /// All items, newest first.
    async fn list(&self) -> InventoryResult<Vec<FoodItem>>;

    async fn get_by_id(&self, id: &str) -> InventoryResult<FoodItem>;

    async fn create(&self, input: CreateFoodInput) -> InventoryResult<FoodItem>;

    async fn update(&self, id: &str, input: UpdateFoodInput) -> InventoryResult<FoodItem>;

    async fn delete(&self, id: &str) -> InventoryResult<()>;

    /// Case-insensitive pattern search over name, category, storage
    /// location, synonyms and description. An empty query matches nothing.
    async fn search(&self, query: &str, limit: usize) -> InventoryResult<Vec<FoodItem>>;

    /// Name completions: prefix matches rank before plain containment,
    /// synonym matches come last.
    async fn suggestions(&self, query: &str, limit: usize) -> InventoryResult<Vec<FoodItem>>;
}
