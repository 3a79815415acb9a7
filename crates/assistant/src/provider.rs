use serde::{Deserialize, Serialize};

use crate::context::EnrichedFood;

/// Most foods a model payload carries.
pub const MAX_PAYLOAD_FOODS: usize = 10;

/// Most history turns forwarded to the model.
pub const MAX_HISTORY_TURNS: usize = 6;

/// Per-turn content clip, in characters.
pub const MAX_TURN_CHARS: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Everything a chat collaborator receives: the question, the context
/// summary, the most urgent foods and the clipped conversation so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub summary: String,
    pub foods: Vec<EnrichedFood>,
    pub history: Vec<ChatTurn>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredRecommendation {
    pub recipes: Vec<RecipeSuggestion>,
    pub used_foods: Vec<String>,
    pub notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeSuggestion {
    pub name: String,
    pub ingredients: Vec<IngredientAmount>,
    pub steps: Vec<String>,
    pub time_minutes: u32,
    pub storage_advice: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientAmount {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// What came back from the collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ChatOutcome {
    /// The reply parsed into the recommendation schema.
    Structured(StructuredRecommendation),
    /// Free text that did not fit the schema.
    Raw(String),
    /// No usable reply: missing credential, timeout, transport failure or
    /// an empty response.
    #[default]
    Unavailable,
}

impl ChatOutcome {
    /// Classify reply text. Content only counts as structured when it
    /// parses into the schema and carries at least one recipe.
    pub fn from_content(content: &str) -> ChatOutcome {
        match serde_json::from_str::<StructuredRecommendation>(content) {
            Ok(reply) if !reply.recipes.is_empty() => ChatOutcome::Structured(reply),
            _ => ChatOutcome::Raw(content.to_owned()),
        }
    }
}

/// Recipe recommendation collaborator.
///
/// Implementations fold every failure mode into
/// [`ChatOutcome::Unavailable`]; the caller recovers with the canned
/// fallback, so `chat` itself never errors.
#[async_trait::async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> ChatOutcome;
}

/// Last [`MAX_HISTORY_TURNS`] turns, each clipped to
/// [`MAX_TURN_CHARS`] characters.
pub fn clip_history(history: &[ChatTurn]) -> Vec<ChatTurn> {
    let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
    history[skip..]
        .iter()
        .map(|turn| ChatTurn {
            role: turn.role.clone(),
            content: turn.content.chars().take(MAX_TURN_CHARS).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_last_six_turns() {
        let history: Vec<ChatTurn> = (0..8)
            .map(|i| ChatTurn {
                role: "user".into(),
                content: format!("第{i}条"),
            })
            .collect();

        let clipped = clip_history(&history);
        assert_eq!(clipped.len(), 6);
        assert_eq!(clipped[0].content, "第2条");
        assert_eq!(clipped[5].content, "第7条");
    }

    #[test]
    fn clip_cuts_long_content() {
        let history = vec![ChatTurn {
            role: "assistant".into(),
            content: "长".repeat(1500),
        }];
        let clipped = clip_history(&history);
        assert_eq!(clipped[0].content.chars().count(), 1000);
    }

    #[test]
    fn content_parses_into_structured() {
        let content = r#"{
            "recipes": [{
                "name": "番茄炒蛋",
                "ingredients": [{"name": "番茄", "amount": 2, "unit": "个"}],
                "steps": ["切块", "翻炒"],
                "timeMinutes": 10,
                "storageAdvice": "现做现吃"
            }],
            "usedFoods": ["番茄", "鸡蛋"],
            "notes": "无"
        }"#;

        match ChatOutcome::from_content(content) {
            ChatOutcome::Structured(reply) => {
                assert_eq!(reply.recipes[0].name, "番茄炒蛋");
                assert_eq!(reply.recipes[0].time_minutes, 10);
                assert_eq!(reply.used_foods, vec!["番茄", "鸡蛋"]);
            }
            other => panic!("expected structured outcome, got {other:?}"),
        }
    }

    #[test]
    fn prose_and_recipeless_json_stay_raw() {
        assert_eq!(
            ChatOutcome::from_content("建议先吃白菜"),
            ChatOutcome::Raw("建议先吃白菜".into())
        );
        // Valid JSON without recipes is not a usable structured reply.
        assert_eq!(
            ChatOutcome::from_content(r#"{"notes":"没有菜谱"}"#),
            ChatOutcome::Raw(r#"{"notes":"没有菜谱"}"#.into())
        );
    }

    #[test]
    fn schema_tolerates_missing_fields() {
        let reply: StructuredRecommendation =
            serde_json::from_str(r#"{"recipes":[{"name":"汤"}],"usedFoods":[]}"#).unwrap();
        assert_eq!(reply.recipes[0].name, "汤");
        assert_eq!(reply.recipes[0].time_minutes, 0);
        assert!(reply.notes.is_empty());
    }
}
