use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use freshkeep_shared::category::ImageKey;

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Difficulty {
    #[default]
    #[strum(serialize = "简单")]
    #[serde(rename = "简单")]
    Easy,
    #[strum(serialize = "中等")]
    #[serde(rename = "中等")]
    Medium,
    #[strum(serialize = "困难")]
    #[serde(rename = "困难")]
    Hard,
}

impl Difficulty {
    /// Sort rank used when ordering matched recipes, easiest first.
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeNutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub image: ImageKey,
    pub ingredients: Vec<String>,
    pub cooking_time: String,
    pub difficulty: Difficulty,
    pub servings: u16,
    pub description: String,
    pub steps: Vec<String>,
    pub tips: String,
    pub nutrition: RecipeNutrition,
}

impl Recipe {
    /// Leading digits of `cooking_time`, e.g. "20分钟" -> 20. Zero when absent.
    pub fn cooking_minutes(&self) -> u32 {
        let digits: String = self
            .cooking_time
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_ranks_order_easiest_first() {
        assert!(Difficulty::Easy.rank() < Difficulty::Medium.rank());
        assert!(Difficulty::Medium.rank() < Difficulty::Hard.rank());
    }

    #[test]
    fn difficulty_serializes_as_chinese_label() {
        assert_eq!(Difficulty::Easy.to_string(), "简单");
        assert_eq!(
            serde_json::to_string(&Difficulty::Medium).unwrap(),
            "\"中等\""
        );
        assert_eq!(
            serde_json::from_str::<Difficulty>("\"困难\"").unwrap(),
            Difficulty::Hard
        );
    }

    #[test]
    fn cooking_minutes_parses_leading_digits() {
        let recipe = Recipe {
            id: "r1".into(),
            name: "测试".into(),
            image: ImageKey::Salad,
            ingredients: vec![],
            cooking_time: "45分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 1,
            description: String::new(),
            steps: vec![],
            tips: String::new(),
            nutrition: RecipeNutrition::default(),
        };
        assert_eq!(recipe.cooking_minutes(), 45);
    }

    #[test]
    fn cooking_minutes_without_digits_is_zero() {
        let recipe = Recipe {
            id: "r1".into(),
            name: "测试".into(),
            image: ImageKey::Salad,
            ingredients: vec![],
            cooking_time: "随意".into(),
            difficulty: Difficulty::Easy,
            servings: 1,
            description: String::new(),
            steps: vec![],
            tips: String::new(),
            nutrition: RecipeNutrition::default(),
        };
        assert_eq!(recipe.cooking_minutes(), 0);
    }
}
