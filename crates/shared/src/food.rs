use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::expiry::parse_date_time;

/// Free-form nutrition summary carried on some persisted items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionInfo {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// A perishable item in the inventory.
///
/// `name`, `category`, `storage_location`, and `expire_date` are always
/// present once an item is persisted; everything else tolerates legacy
/// records that predate the field. Field names follow the storage wire
/// format (camelCase JSON).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: String,
    pub storage_location: String,
    pub expire_date: String,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub shelf_life: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nutrition_info: Option<NutritionInfo>,
}

fn default_quantity() -> u32 {
    1
}

impl FoodItem {
    /// Timestamp used for recency windowing.
    ///
    /// Prefers `created_at`; falls back to `updated_at` only when
    /// `created_at` is absent. Returns `None` when neither field is
    /// present or the chosen one does not parse, which excludes the item
    /// from time-windowed views.
    pub fn effective_timestamp(&self) -> Option<NaiveDateTime> {
        let raw = self
            .created_at
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.updated_at.as_deref().filter(|s| !s.trim().is_empty()))?;

        parse_date_time(raw)
    }
}

/// Snapshot of an item removed from active inventory, kept in a rolling
/// seven-day ledger for display and audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TakenOutRecord {
    #[serde(flatten)]
    pub item: FoodItem,
    pub taken_out_date: String,
}

impl TakenOutRecord {
    pub fn taken_out_timestamp(&self) -> Option<NaiveDateTime> {
        parse_date_time(&self.taken_out_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(created_at: Option<&str>, updated_at: Option<&str>) -> FoodItem {
        FoodItem {
            id: "food_1".to_string(),
            name: "牛奶".to_string(),
            category: "乳制品".to_string(),
            storage_location: "冰箱".to_string(),
            expire_date: "2025-01-10".to_string(),
            purchase_date: None,
            shelf_life: None,
            quantity: 1,
            unit: None,
            created_at: created_at.map(str::to_string),
            updated_at: updated_at.map(str::to_string),
            synonyms: vec![],
            description: None,
            nutrition_info: None,
        }
    }

    #[test]
    fn test_effective_timestamp_prefers_created_at() {
        let item = item(Some("2025-01-02"), Some("2025-01-05"));
        assert_eq!(
            item.effective_timestamp(),
            parse_date_time("2025-01-02")
        );
    }

    #[test]
    fn test_effective_timestamp_falls_back_to_updated_at() {
        let item = item(None, Some("2025-01-05"));
        assert_eq!(
            item.effective_timestamp(),
            parse_date_time("2025-01-05")
        );

        // An empty created_at counts as absent.
        let item = item(Some(""), Some("2025-01-05"));
        assert_eq!(
            item.effective_timestamp(),
            parse_date_time("2025-01-05")
        );
    }

    #[test]
    fn test_effective_timestamp_missing_or_malformed_is_none() {
        assert_eq!(item(None, None).effective_timestamp(), None);
        // A present but unparseable created_at does not shadow updated_at
        // silently; the record is simply outside windowed views.
        assert_eq!(
            item(Some("garbage"), Some("2025-01-05")).effective_timestamp(),
            None
        );
    }

    #[test]
    fn test_food_item_wire_format() {
        let json = r#"{
            "id": "abc",
            "name": "鸡蛋",
            "category": "蛋类",
            "storageLocation": "冰箱",
            "expireDate": "2025-02-01",
            "createdAt": "2025-01-20T08:00:00Z",
            "synonyms": ["土鸡蛋"]
        }"#;

        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.storage_location, "冰箱");
        assert_eq!(item.quantity, 1); // defaulted
        assert_eq!(item.synonyms, vec!["土鸡蛋".to_string()]);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["storageLocation"], "冰箱");
        assert_eq!(back["expireDate"], "2025-02-01");
    }

    #[test]
    fn test_taken_out_record_flattens_item() {
        let record = TakenOutRecord {
            item: item(Some("2025-01-02"), None),
            taken_out_date: "2025-01-06T10:00:00Z".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "牛奶");
        assert_eq!(value["takenOutDate"], "2025-01-06T10:00:00Z");
        assert!(record.taken_out_timestamp().is_some());
    }
}
