use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use freshkeep_assistant::{
    ChatOutcome, ChatProvider, ChatRequest, ChatTurn, ContextFood, RecipeSuggestion,
    RecommendInput, RecommendationReply, RecommendationService, ReplySource,
    StructuredRecommendation,
};
use freshkeep_inventory::{CreateFoodInput, FoodStore, MemoryStore};

/// Fake collaborator that replays a scripted outcome and records every
/// request it saw.
struct ScriptedProvider {
    outcome: ChatOutcome,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedProvider {
    fn new(outcome: ChatOutcome) -> (Self, Arc<Mutex<Vec<ChatRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                outcome,
                requests: requests.clone(),
            },
            requests,
        )
    }
}

#[async_trait::async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(&self, request: &ChatRequest) -> ChatOutcome {
        self.requests.lock().unwrap().push(request.clone());
        self.outcome.clone()
    }
}

fn create_input(name: &str, category: &str, expire: &str) -> CreateFoodInput {
    CreateFoodInput {
        name: name.into(),
        category: category.into(),
        storage_location: "冷藏".into(),
        expire_date: expire.into(),
        ..Default::default()
    }
}

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

async fn seeded_store() -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::default();
    // Urgency order: 白菜 (expired) < 牛奶 < 豆腐 < 土豆 < 大米.
    store.create(create_input("大米", "主食", "2024-12-01")).await?;
    store.create(create_input("牛奶", "饮品", "2024-05-11")).await?;
    store.create(create_input("土豆", "蔬菜类", "2024-05-14")).await?;
    store.create(create_input("白菜", "蔬菜类", "2024-05-09")).await?;
    store.create(create_input("豆腐", "其他", "2024-05-12")).await?;
    Ok(store)
}

#[tokio::test]
async fn test_fallback_uses_top_three_urgent_names() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let (provider, _) = ScriptedProvider::new(ChatOutcome::Unavailable);
    let service = RecommendationService::new(provider);

    let reply = service
        .recommend(&store, RecommendInput::default(), now())
        .await?;

    assert_eq!(reply.source, ReplySource::Fallback);
    let RecommendationReply::Structured(structured) = reply.reply else {
        panic!("fallback reply must be structured");
    };
    assert_eq!(structured.used_foods, vec!["白菜", "牛奶", "豆腐"]);
    assert_eq!(structured.recipes.len(), 3);
    assert_eq!(structured.recipes[0].name, "家常白菜");
    assert_eq!(structured.notes, "为保证新鲜度，优先处理即将过期的食材。");
    Ok(())
}

#[tokio::test]
async fn test_structured_reply_passes_through() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let scripted = StructuredRecommendation {
        recipes: vec![RecipeSuggestion {
            name: "白菜豆腐汤".into(),
            ..Default::default()
        }],
        used_foods: vec!["白菜".into(), "豆腐".into()],
        notes: "清淡".into(),
    };
    let (provider, _) = ScriptedProvider::new(ChatOutcome::Structured(scripted.clone()));
    let service = RecommendationService::new(provider);

    let reply = service
        .recommend(&store, RecommendInput::default(), now())
        .await?;

    assert_eq!(reply.source, ReplySource::Assistant);
    assert_eq!(reply.reply, RecommendationReply::Structured(scripted));
    Ok(())
}

#[tokio::test]
async fn test_raw_reply_keeps_text_and_source() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let (provider, _) = ScriptedProvider::new(ChatOutcome::Raw("先吃白菜".into()));
    let service = RecommendationService::new(provider);

    let reply = service
        .recommend(&store, RecommendInput::default(), now())
        .await?;

    assert_eq!(reply.source, ReplySource::Assistant);
    assert_eq!(reply.reply, RecommendationReply::Raw("先吃白菜".into()));
    Ok(())
}

#[tokio::test]
async fn test_request_carries_summary_focus_and_clipped_history() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let (provider, requests) = ScriptedProvider::new(ChatOutcome::Unavailable);
    let service = RecommendationService::new(provider);

    let history: Vec<ChatTurn> = (0..9)
        .map(|i| ChatTurn {
            role: "user".into(),
            content: format!("轮次{i}"),
        })
        .collect();

    let reply = service
        .recommend(
            &store,
            RecommendInput {
                question: Some("西红柿做法".into()),
                foods: None,
                history,
            },
            now(),
        )
        .await?;

    let request = requests.lock().unwrap().pop().unwrap();
    assert_eq!(request.question, "西红柿做法");
    // Payload foods are the urgency order, independent of the question.
    assert_eq!(request.foods[0].name, "白菜");
    assert_eq!(request.foods.len(), 5);
    assert_eq!(request.history.len(), 6);
    assert_eq!(request.history[0].content, "轮次3");

    // 西红柿 matches nothing here, so the focus falls back to everything.
    assert!(reply.summary.starts_with("当前食材总数：5\n即将过期优先项（Top5）："));
    assert!(reply.summary.contains("• 白菜（蔬菜类，冷藏，已过期）"));
    assert!(reply.summary.contains("• 牛奶（饮品，冷藏，1天后过期）"));
    Ok(())
}

#[tokio::test]
async fn test_question_narrows_focus_and_fallback() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let (provider, _) = ScriptedProvider::new(ChatOutcome::Unavailable);
    let service = RecommendationService::new(provider);

    let reply = service
        .recommend(
            &store,
            RecommendInput {
                question: Some("土豆".into()),
                ..Default::default()
            },
            now(),
        )
        .await?;

    let RecommendationReply::Structured(structured) = reply.reply else {
        panic!("fallback reply must be structured");
    };
    assert_eq!(structured.used_foods, vec!["土豆"]);
    assert!(reply.summary.contains("即将过期优先项（Top1）："));
    Ok(())
}

#[tokio::test]
async fn test_context_foods_bypass_the_store() -> anyhow::Result<()> {
    // An empty store proves sampling is skipped.
    let store = MemoryStore::default();
    let (provider, requests) = ScriptedProvider::new(ChatOutcome::Unavailable);
    let service = RecommendationService::new(provider);

    let foods = vec![
        ContextFood {
            name: "鸡蛋".into(),
            category: "主食".into(),
            storage_location: "冷藏".into(),
            expire_date: "2024-05-20".into(),
            expiry_days: Some(10),
        },
        ContextFood {
            name: "虾仁".into(),
            category: "海鲜".into(),
            storage_location: "冷冻".into(),
            expire_date: "2024-05-11".into(),
            expiry_days: None,
        },
    ];

    let reply = service
        .recommend(
            &store,
            RecommendInput {
                foods: Some(foods),
                ..Default::default()
            },
            now(),
        )
        .await?;

    // 虾仁 derives 1 day, 鸡蛋 keeps its precomputed 10.
    let request = requests.lock().unwrap().pop().unwrap();
    assert_eq!(request.foods[0].name, "虾仁");
    assert_eq!(request.foods[0].days_left, 1);
    assert_eq!(request.foods[1].days_left, 10);
    assert!(reply.summary.starts_with("当前食材总数：2"));
    Ok(())
}

#[tokio::test]
async fn test_heuristics_ride_along() -> anyhow::Result<()> {
    let store = seeded_store().await?;
    let (provider, _) = ScriptedProvider::new(ChatOutcome::Unavailable);
    let service = RecommendationService::new(provider);

    let reply = service
        .recommend(&store, RecommendInput::default(), now())
        .await?;

    assert_eq!(reply.suggestions[0], "清炒白菜配牛奶");
    assert!(reply
        .suggestions
        .contains(&"蔬菜拼盘：少油快炒，保留口感".to_owned()));
    Ok(())
}
