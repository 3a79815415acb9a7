use chrono::NaiveDateTime;
use serde::Serialize;

use freshkeep_inventory::FoodStore;

use crate::context::{
    context_summary, enrich_context, enrich_items, focus_items, heuristic_suggestions, ContextFood,
};
use crate::error::AssistantResult;
use crate::fallback::fallback_recommendation;
use crate::provider::{
    clip_history, ChatOutcome, ChatProvider, ChatRequest, ChatTurn, StructuredRecommendation,
    MAX_PAYLOAD_FOODS,
};

/// Most items sampled from the store when the caller brings no context.
pub const SAMPLE_LIMIT: usize = 50;

#[derive(Clone, Debug, Default)]
pub struct RecommendInput {
    pub question: Option<String>,
    pub foods: Option<Vec<ContextFood>>,
    pub history: Vec<ChatTurn>,
}

/// Who produced the reply, so callers can badge degraded answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Assistant,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecommendationReply {
    Structured(StructuredRecommendation),
    Raw(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub reply: RecommendationReply,
    pub source: ReplySource,
    pub summary: String,
    pub suggestions: Vec<String>,
}

/// Ties the context builder, a [`ChatProvider`] and the canned fallback
/// together into one recommendation call.
pub struct RecommendationService<P> {
    provider: P,
    sample_limit: usize,
}

impl<P: ChatProvider> RecommendationService<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            sample_limit: SAMPLE_LIMIT,
        }
    }

    /// Build the food context, consult the provider, and serve the canned
    /// reply when it is unavailable. Only the store read can fail.
    #[tracing::instrument(skip(self, store, input))]
    pub async fn recommend(
        &self,
        store: &dyn FoodStore,
        input: RecommendInput,
        now: NaiveDateTime,
    ) -> AssistantResult<Recommendation> {
        let enriched = match input.foods.as_deref() {
            Some(foods) if !foods.is_empty() => enrich_context(foods, now),
            _ => {
                let mut items = store.list().await?;
                items.truncate(self.sample_limit);
                enrich_items(&items, now)
            }
        };

        let question = input.question.unwrap_or_default();
        let focus = focus_items(&enriched, &question);
        let summary = context_summary(enriched.len(), &focus);
        let suggestions = heuristic_suggestions(&focus);

        let request = ChatRequest {
            question,
            summary: summary.clone(),
            foods: enriched.iter().take(MAX_PAYLOAD_FOODS).cloned().collect(),
            history: clip_history(&input.history),
        };

        let (reply, source) = match self.provider.chat(&request).await {
            ChatOutcome::Structured(reply) => {
                (RecommendationReply::Structured(reply), ReplySource::Assistant)
            }
            ChatOutcome::Raw(text) => (RecommendationReply::Raw(text), ReplySource::Assistant),
            ChatOutcome::Unavailable => {
                tracing::debug!("chat provider unavailable, serving canned reply");
                (
                    RecommendationReply::Structured(fallback_recommendation(&focus)),
                    ReplySource::Fallback,
                )
            }
        };

        Ok(Recommendation {
            reply,
            source,
            summary,
            suggestions,
        })
    }
}
