use crate::context::EnrichedFood;
use crate::provider::{IngredientAmount, RecipeSuggestion, StructuredRecommendation};

/// Focus items the canned reply cooks with.
const FALLBACK_RECIPES: usize = 3;

/// Deterministic reply served whenever the model is unavailable: one
/// 家常 recipe per top focus item, identical wording every time.
pub fn fallback_recommendation(focus: &[EnrichedFood]) -> StructuredRecommendation {
    let top = &focus[..focus.len().min(FALLBACK_RECIPES)];

    StructuredRecommendation {
        recipes: top
            .iter()
            .map(|food| RecipeSuggestion {
                name: format!("家常{}", food.name),
                ingredients: vec![IngredientAmount {
                    name: food.name.clone(),
                    amount: 1.0,
                    unit: "份".to_owned(),
                }],
                steps: vec![
                    format!("准备食材：{}", food.name),
                    "热锅少油，快速翻炒至熟".to_owned(),
                    "加盐调味，出锅".to_owned(),
                ],
                time_minutes: 15,
                storage_advice: "现做现吃，剩菜冷藏不超过24小时".to_owned(),
            })
            .collect(),
        used_foods: top.iter().map(|food| food.name.clone()).collect(),
        notes: "为保证新鲜度，优先处理即将过期的食材。".to_owned(),
    }
}
