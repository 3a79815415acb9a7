use chrono::NaiveDateTime;
use serde::Serialize;

use freshkeep_shared::food::FoodItem;
use freshkeep_shared::{days_until_expiry, WARNING_THRESHOLD};

use crate::matcher::match_recipes;
use crate::types::Recipe;

/// An item that should be cooked soon, paired with the recipes that use it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentSuggestion {
    #[serde(flatten)]
    pub item: FoodItem,
    pub days_left: i64,
    pub recommended_recipes: Vec<&'static Recipe>,
    pub total_recipes: usize,
}

/// Items expiring within the warning window (expired included), each with up
/// to three recommended recipes. Items no recipe uses are dropped. Sorted
/// most urgent first.
pub fn urgent_suggestions(items: &[FoodItem], now: NaiveDateTime) -> Vec<UrgentSuggestion> {
    let mut suggestions: Vec<UrgentSuggestion> = items
        .iter()
        .filter_map(|item| {
            let days_left = days_until_expiry(&item.expire_date, now);
            if days_left > WARNING_THRESHOLD {
                return None;
            }
            let matched = match_recipes(&item.name);
            if matched.is_empty() {
                return None;
            }
            let total_recipes = matched.len();
            Some(UrgentSuggestion {
                item: item.clone(),
                days_left,
                recommended_recipes: matched.into_iter().take(3).collect(),
                total_recipes,
            })
        })
        .collect();

    suggestions.sort_by_key(|suggestion| suggestion.days_left);
    suggestions
}

/// Rotation state for the suggestion card: which urgent item is showing and
/// whether its recipe list is expanded.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuggestionRotation {
    pub current_index: usize,
    pub expanded: bool,
}

impl SuggestionRotation {
    /// Jump to a different random suggestion and collapse the recipe list.
    /// No-op when there is at most one suggestion to rotate through.
    pub fn switch_random(&mut self, available: usize) {
        if available <= 1 {
            return;
        }
        use rand::Rng;

        let mut rng = rand::rng();
        let mut next = self.current_index;
        while next == self.current_index {
            next = rng.random_range(0..available);
        }
        self.current_index = next;
        self.expanded = false;
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
        self.expanded = false;
    }
}
