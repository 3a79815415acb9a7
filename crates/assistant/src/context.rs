use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use freshkeep_shared::days_until_expiry;
use freshkeep_shared::food::FoodItem;

/// Bidirectional keyword aliases expanding a question before matching.
pub const SYNONYM_PAIRS: &[(&str, &str)] = &[
    ("青椒", "辣椒"),
    ("番茄", "西红柿"),
    ("土豆", "马铃薯"),
    ("葱", "青葱"),
    ("蒜", "大蒜"),
];

/// Focus items feeding the summary, the heuristics and the canned reply.
pub const FOCUS_LIMIT: usize = 10;

/// An inventory item narrowed to the fields the assistant reasons about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFood {
    pub name: String,
    pub category: String,
    pub storage_location: String,
    pub expire_date: String,
    pub days_left: i64,
}

/// Caller-supplied context entry. A precomputed day count wins over
/// deriving one from the expiration date.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextFood {
    pub name: String,
    pub category: String,
    pub storage_location: String,
    pub expire_date: String,
    pub expiry_days: Option<i64>,
}

/// Stored items annotated with signed days-to-expiry, most urgent first.
pub fn enrich_items(items: &[FoodItem], now: NaiveDateTime) -> Vec<EnrichedFood> {
    sorted_by_urgency(
        items
            .iter()
            .map(|item| EnrichedFood {
                name: item.name.clone(),
                category: item.category.clone(),
                storage_location: item.storage_location.clone(),
                expire_date: item.expire_date.clone(),
                days_left: days_until_expiry(&item.expire_date, now),
            })
            .collect(),
    )
}

/// Context entries annotated like [`enrich_items`], keeping any day count
/// the caller already computed.
pub fn enrich_context(foods: &[ContextFood], now: NaiveDateTime) -> Vec<EnrichedFood> {
    sorted_by_urgency(
        foods
            .iter()
            .map(|food| EnrichedFood {
                name: food.name.clone(),
                category: food.category.clone(),
                storage_location: food.storage_location.clone(),
                expire_date: food.expire_date.clone(),
                days_left: food
                    .expiry_days
                    .unwrap_or_else(|| days_until_expiry(&food.expire_date, now)),
            })
            .collect(),
    )
}

fn sorted_by_urgency(mut foods: Vec<EnrichedFood>) -> Vec<EnrichedFood> {
    foods.sort_by_key(|food| food.days_left);
    foods
}

/// The trimmed question plus its synonym expansions; empty questions
/// expand to nothing.
pub fn expand_terms(question: &str) -> Vec<String> {
    let keyword = question.trim();
    if keyword.is_empty() {
        return vec![];
    }

    let mut terms = vec![keyword.to_owned()];
    for (a, b) in SYNONYM_PAIRS {
        if keyword.contains(a) {
            terms.push((*b).to_owned());
        }
        if keyword.contains(b) {
            terms.push((*a).to_owned());
        }
    }
    terms
}

/// Urgency-ordered items narrowed by the question keywords. A narrowing
/// that matches nothing falls back to the whole list, and the result is
/// capped at [`FOCUS_LIMIT`].
pub fn focus_items(enriched: &[EnrichedFood], question: &str) -> Vec<EnrichedFood> {
    let terms = expand_terms(question);
    let mut focus = if terms.is_empty() {
        enriched.to_vec()
    } else {
        let matched: Vec<EnrichedFood> = enriched
            .iter()
            .filter(|food| {
                terms.iter().any(|term| {
                    contains_ignore_case(&food.name, term)
                        || contains_ignore_case(&food.category, term)
                })
            })
            .cloned()
            .collect();
        if matched.is_empty() {
            enriched.to_vec()
        } else {
            matched
        }
    };
    focus.truncate(FOCUS_LIMIT);
    focus
}

/// Context overview handed to the model alongside the question.
pub fn context_summary(total: usize, focus: &[EnrichedFood]) -> String {
    let mut lines = vec![
        format!("当前食材总数：{total}"),
        format!("即将过期优先项（Top{}）：", focus.len()),
    ];
    for food in focus {
        let expiry = if food.days_left <= 0 {
            "已过期".to_owned()
        } else {
            format!("{}天后过期", food.days_left)
        };
        lines.push(format!(
            "• {}（{}，{}，{}）",
            food.name, food.category, food.storage_location, expiry
        ));
    }
    lines.join("\n")
}

/// Quick dish ideas derived from the focus list alone, no model involved.
pub fn heuristic_suggestions(focus: &[EnrichedFood]) -> Vec<String> {
    let mut suggestions = Vec::new();

    if focus.len() >= 2 {
        suggestions.push(format!("清炒{}配{}", focus[0].name, focus[1].name));
    }

    let categories: Vec<&str> = focus.iter().map(|food| food.category.as_str()).collect();
    if categories.contains(&"蔬菜类") || categories.contains(&"果蔬类") {
        suggestions.push("蔬菜拼盘：少油快炒，保留口感".to_owned());
    }
    if categories.contains(&"肉类") {
        suggestions.push("肉菜搭配：荤素结合更均衡".to_owned());
    }

    if suggestions.is_empty() {
        suggestions.push("简单家常菜：根据现有食材搭配快手菜".to_owned());
    }
    suggestions
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
