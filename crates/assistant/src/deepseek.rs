use std::time::Duration;

use serde_json::{json, Value};

use crate::provider::{ChatOutcome, ChatProvider, ChatRequest, MAX_PAYLOAD_FOODS};

/// Chat completions endpoint.
pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// DeepSeek chat client. One attempt per request, no retry; every failure
/// mode surfaces as [`ChatOutcome::Unavailable`].
pub struct DeepSeekProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl DeepSeekProvider {
    /// An empty api key yields a provider that is permanently unavailable.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::configured(
            api_key,
            DEFAULT_MODEL,
            Duration::from_millis(DEFAULT_TIMEOUT_MS),
        )
    }

    pub fn configured(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl ChatProvider for DeepSeekProvider {
    async fn chat(&self, request: &ChatRequest) -> ChatOutcome {
        if self.api_key.is_empty() {
            return ChatOutcome::Unavailable;
        }

        let response = self
            .client
            .post(DEEPSEEK_API_URL)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request_body(&self.model, request))
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "deepseek request failed");
                return ChatOutcome::Unavailable;
            }
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "deepseek response unreadable");
                return ChatOutcome::Unavailable;
            }
        };

        match body
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
        {
            Some(content) if !content.is_empty() => ChatOutcome::from_content(content),
            _ => ChatOutcome::Unavailable,
        }
    }
}

/// The fixed system prompt demanding strict JSON output.
pub fn system_prompt() -> String {
    [
        "你是“鲜存”食材智能助手。",
        "严格按照以下 JSON 结构输出，且只返回 JSON：",
        r#"{"recipes":[{"name":"","ingredients":[{"name":"","amount":0,"unit":""}],"steps":[""],"timeMinutes":0,"storageAdvice":""}],"usedFoods":[""],"notes":""}"#,
        "要求：",
        "1) 严格基于提供的食材列表输出建议，优先使用即将过期的食材。",
        "2) 输出 2-3 道家常菜方案，每道包含【菜名】【所用食材（仅来自列表，可加少量常用调料）】【步骤】【耗时】【储存/剩菜建议】。",
        "3) 缺少关键食材时给出等价替代或删除方案，并在 notes 中说明影响。",
        "4) 所有字段均为中文，时间单位使用分钟。",
    ]
    .join("\n")
}

/// The user message body: question, summary and at most ten foods with
/// their remaining days.
pub fn user_payload(request: &ChatRequest) -> String {
    let foods: Vec<Value> = request
        .foods
        .iter()
        .take(MAX_PAYLOAD_FOODS)
        .map(|food| {
            json!({
                "name": food.name,
                "category": food.category,
                "storageLocation": food.storage_location,
                "expireDate": food.expire_date,
                "expiryDays": food.days_left,
            })
        })
        .collect();

    json!({
        "question": request.question,
        "summary": request.summary,
        "foods": foods,
    })
    .to_string()
}

/// The completions call body: system prompt, prior turns, then the user
/// payload, with the low-temperature settings the strict JSON contract
/// relies on.
pub fn request_body(model: &str, request: &ChatRequest) -> Value {
    let mut messages = vec![json!({ "role": "system", "content": system_prompt() })];
    for turn in &request.history {
        messages.push(json!({ "role": turn.role, "content": turn.content }));
    }
    messages.push(json!({ "role": "user", "content": user_payload(request) }));

    json!({
        "model": model,
        "messages": messages,
        "temperature": 0.1,
        "top_p": 0.3,
    })
}
