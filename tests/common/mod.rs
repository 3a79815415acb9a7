//! Shared builders for the integration tests: food items pinned to dates
//! around a fixed reference time, and snapshot files on disk.

#![allow(dead_code)]

use chrono::{Days, NaiveDateTime};
use temp_dir::TempDir;

use freshkeep_shared::food::FoodItem;

/// Fixed reference instant used across the integration tests, a Wednesday.
pub fn reference_now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2024-05-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn food(name: &str, category: &str, expire_date: &str) -> FoodItem {
    FoodItem {
        id: format!("food_{name}"),
        name: name.to_string(),
        category: category.to_string(),
        storage_location: "冰箱".to_string(),
        expire_date: expire_date.to_string(),
        purchase_date: None,
        shelf_life: None,
        quantity: 1,
        unit: None,
        created_at: None,
        updated_at: None,
        synonyms: vec![],
        description: None,
        nutrition_info: None,
    }
}

pub fn food_created(name: &str, category: &str, expire_date: &str, created_at: &str) -> FoodItem {
    let mut item = food(name, category, expire_date);
    item.created_at = Some(created_at.to_string());
    item
}

/// `days` whole days after `now`, as a plain date string.
pub fn date_in(now: NaiveDateTime, days: u64) -> String {
    (now + Days::new(days)).date().to_string()
}

/// `days` whole days before `now`, as a plain date string.
pub fn date_ago(now: NaiveDateTime, days: u64) -> String {
    (now - Days::new(days)).date().to_string()
}

/// Write a `{"foods": [...]}` snapshot document and return its path.
pub fn write_snapshot(dir: &TempDir, name: &str, foods: &[FoodItem]) -> String {
    let path = dir.child(name);
    let document = serde_json::json!({ "foods": foods });
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}
