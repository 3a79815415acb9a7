//! JSON contract validation
//!
//! Verifies the wire shapes the views and services serialize to: the
//! recent-activity rows, category pages, the recommendation reply and the
//! monthly report. Each test pins the complete key set a frontend would
//! bind to, using serde_json::Value assertions.

mod common;

use anyhow::Result;
use serde_json::Value;

use freshkeep_assistant::{DeepSeekProvider, RecommendInput, RecommendationService};
use freshkeep_inventory::{stats, InventorySession, MemoryStore};

#[test]
fn test_recent_entry_wire_shape() -> Result<()> {
    let now = common::reference_now();
    let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let session = InventorySession::new(vec![common::food_created(
        "鲜牛奶",
        "乳制品",
        &common::date_in(now, 1),
        &stamp,
    )]);

    let rows = serde_json::to_value(session.recent_view(now, false))?;

    let row = &rows[0];
    assert_eq!(row["name"], "鲜牛奶");
    assert_eq!(row["category"], "乳制品");
    assert_eq!(row["storageLocation"], "冰箱");
    assert_eq!(row["expireDate"], common::date_in(now, 1));
    assert_eq!(row["image"], "milk");
    assert_eq!(row["daysLeft"], 1);
    assert_eq!(row["addedAt"], stamp);
    assert_eq!(row["isTakenOut"], false);
    assert!(row["id"].is_string());
    Ok(())
}

#[test]
fn test_category_entry_flattens_the_item() -> Result<()> {
    let now = common::reference_now();
    let session = InventorySession::new(vec![common::food(
        "鲜牛奶",
        "乳制品",
        &common::date_in(now, 2),
    )]);

    let entries = serde_json::to_value(session.foods_by_category(3, now))?;

    let entry = &entries[0];
    // Item fields sit beside the derived ones, not nested.
    assert_eq!(entry["name"], "鲜牛奶");
    assert_eq!(entry["expireDate"], common::date_in(now, 2));
    assert_eq!(entry["image"], "milk");
    assert_eq!(entry["daysLeft"], 2);
    assert!(entry.get("item").is_none());
    Ok(())
}

#[test]
fn test_summary_wire_shape() -> Result<()> {
    let now = common::reference_now();
    let session = InventorySession::new(vec![common::food(
        "白菜",
        "蔬菜类",
        &common::date_ago(now, 1),
    )]);

    let summary = serde_json::to_value(session.summary(now.date()))?;

    assert_eq!(summary["activeCount"], 1);
    assert_eq!(summary["expiredCount"], 1);
    assert_eq!(summary["expiringSoonCount"], 0);
    assert_eq!(summary["lowStock"], 99);
    Ok(())
}

#[tokio::test]
async fn test_fallback_recommendation_wire_shape() -> Result<()> {
    let now = common::reference_now();
    let store = MemoryStore::with_items(vec![
        common::food("白菜", "蔬菜类", &common::date_ago(now, 1)),
        common::food("牛奶", "乳制品", &common::date_in(now, 1)),
    ]);

    let service = RecommendationService::new(DeepSeekProvider::new(""));
    let recommendation = service
        .recommend(&store, RecommendInput::default(), now)
        .await?;
    let value = serde_json::to_value(&recommendation)?;

    assert_eq!(value["source"], "fallback");
    assert!(value["summary"].is_string());
    assert!(value["suggestions"].is_array());

    let recipe = &value["reply"]["recipes"][0];
    assert_eq!(recipe["name"], "家常白菜");
    assert_eq!(recipe["ingredients"][0]["name"], "白菜");
    assert_eq!(recipe["ingredients"][0]["amount"], 1.0);
    assert_eq!(recipe["ingredients"][0]["unit"], "份");
    assert!(recipe["steps"].is_array());
    assert_eq!(recipe["timeMinutes"], 15);
    assert!(recipe["storageAdvice"].is_string());

    assert_eq!(value["reply"]["usedFoods"][0], "白菜");
    assert!(value["reply"]["notes"].is_string());
    Ok(())
}

#[test]
fn test_monthly_report_wire_shape() -> Result<()> {
    let now = common::reference_now();
    let items = vec![
        common::food_created("白菜", "蔬菜类", "2024-05-20", "2024-05-03 09:00:00"),
        common::food_created("牛奶", "乳制品", "2024-05-10", "2024-05-08 09:00:00"),
    ];

    let report = serde_json::to_value(stats::monthly_report(&items, now))?;

    assert_eq!(report["title"], "2024年5月食材管理月度报告");
    assert_eq!(report["generateTime"], "2024/5/15 12:00:00");

    assert_eq!(report["summary"]["totalItems"], 2);
    assert_eq!(report["summary"]["totalWaste"], 1); // 牛奶 expired on the 10th
    assert!(report["summary"]["wasteRate"].is_number());
    assert!(report["summary"]["avgWeeklyAdd"].is_number());

    assert!(report["categoryAnalysis"]["topCategory"].is_string());
    assert!(report["categoryAnalysis"]["topCategoryCount"].is_u64());
    assert!(report["categoryAnalysis"]["leastCategory"].is_string());
    assert!(report["categoryAnalysis"]["categories"].is_array());

    assert!(report["wasteAnalysis"]["amount"].is_u64());
    assert!(report["wasteAnalysis"]["trend"].is_i64());
    assert_eq!(report["wasteAnalysis"]["trendDescription"], "上升");

    let week = &report["weeklyTrend"][0];
    assert!(week["week"].as_str().unwrap().starts_with("第"));
    assert!(week["weight"].is_u64());
    assert!(week["count"].is_u64());

    assert!(report["nutritionAnalysis"]["topNutrient"].is_string());
    assert!(report["nutritionAnalysis"]["topNutrientValue"].is_u64());
    let detail = &report["nutritionAnalysis"]["details"][0];
    assert_eq!(detail["name"], "蛋白质");
    assert!(detail["value"].is_u64());
    assert!(detail["color"].as_str().unwrap().starts_with('#'));

    assert!(!report["recommendations"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_period_serializes_as_its_label() -> Result<()> {
    assert_eq!(serde_json::to_value(stats::Period::ThisMonth)?, "本月");
    assert_eq!(
        serde_json::from_str::<stats::Period>("\"近3个月\"")?,
        stats::Period::LastThreeMonths
    );
    Ok(())
}
