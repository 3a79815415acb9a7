use serde::Deserialize;
use validator::Validate;

use freshkeep_shared::food::NutritionInfo;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateFoodInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 25))]
    pub category: String,
    #[validate(length(min = 1, max = 25))]
    pub storage_location: String,
    #[validate(length(min = 1, max = 25))]
    pub expire_date: String,
    pub purchase_date: Option<String>,
    pub shelf_life: Option<String>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
    pub synonyms: Vec<String>,
    pub description: Option<String>,
    pub nutrition_info: Option<NutritionInfo>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateFoodInput {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub storage_location: Option<String>,
    #[validate(length(min = 1, max = 25))]
    pub expire_date: Option<String>,
    pub purchase_date: Option<String>,
    pub shelf_life: Option<String>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
    pub synonyms: Option<Vec<String>>,
    pub description: Option<String>,
    pub nutrition_info: Option<NutritionInfo>,
}
