use std::time::Duration;

use anyhow::Result;

use freshkeep_assistant::{ChatTurn, DeepSeekProvider, RecommendInput, RecommendationService};

use crate::config::Config;
use crate::snapshot::load_snapshot;

/// Ask the assistant what to cook. Without a configured api key the
/// provider is unavailable and the canned fallback answers instead.
#[tracing::instrument(skip(config))]
pub async fn recommend(
    config: &Config,
    snapshot_path: &str,
    question: Option<String>,
    history_file: Option<String>,
) -> Result<String> {
    let store = load_snapshot(snapshot_path)?.store();

    let history = match history_file.as_deref() {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };

    let provider = DeepSeekProvider::configured(
        config.assistant.api_key.clone(),
        config.assistant.model.clone(),
        Duration::from_millis(config.assistant.timeout_ms),
    );
    let service = RecommendationService::new(provider);

    let input = RecommendInput {
        question,
        foods: None,
        history,
    };
    let recommendation = service.recommend(&store, input, super::local_now()).await?;

    Ok(serde_json::to_string_pretty(&recommendation)?)
}

fn load_history(path: &str) -> freshkeep_shared::Result<Vec<ChatTurn>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => freshkeep_shared::bail!("failed to read history {path}: {err}"),
    };

    Ok(serde_json::from_str(&raw)?)
}
