use async_trait::async_trait;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use backend::AppState;
use backend::config::BackendConfig;
use backend::error::{ChatError, ChatResult};
use backend::handlers::{
    clear_history, create_session, delete_record, get_session, list_records, load_record,
    reset_session, save_session, send_message, update_character,
};
use backend::llm::LanguageModel;
use shared::models::{
    AppSettings, CreateCharacterRequest, Role, SendMessageRequest, SessionPhase,
    UpdateCharacterRequest,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

/// Pops scripted replies in order; `Err` entries simulate provider failures.
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    models: Vec<String>,
    requested_models: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            models: vec!["models/gemini-pro".to_string(), "models/gemini-1.5-flash".to_string()],
            requested_models: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, model: &str, _prompt: &str) -> ChatResult<String> {
        self.requested_models.lock().unwrap().push(model.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(String::new()))
            .map_err(ChatError::Generation)
    }

    async fn list_models(&self) -> ChatResult<Vec<String>> {
        Ok(self.models.clone())
    }
}

fn app(temp_dir: &TempDir, replies: Vec<Result<&str, &str>>) -> AppState {
    app_with_model(temp_dir, Arc::new(ScriptedModel::new(replies)))
}

fn app_with_model(temp_dir: &TempDir, llm: Arc<ScriptedModel>) -> AppState {
    let config = BackendConfig::new(temp_dir.path(), AppSettings::default());
    AppState::new(config, llm)
}

fn merlin() -> CreateCharacterRequest {
    CreateCharacterRequest {
        name: "Merlin".to_string(),
        persona_description: "Wise old wizard, speaks in riddles".to_string(),
        greeting: "Greetings, traveler.".to_string(),
        avatar_reference: None,
        model_identifier: None,
    }
}

fn say(content: &str) -> Json<SendMessageRequest> {
    Json(SendMessageRequest {
        content: content.to_string(),
    })
}

#[tokio::test]
async fn create_chat_save_load_continue_delete() {
    let temp_dir = TempDir::new().unwrap();
    let state = app(
        &temp_dir,
        vec![
            Ok("Your fate is your own to weave."),
            Ok("Tomorrow is a riddle unsolved."),
        ],
    );

    let Json(snapshot) = create_session(State(state.clone()), Json(merlin()))
        .await
        .unwrap();
    assert_eq!(snapshot.phase, SessionPhase::Active);
    let record = snapshot.record.unwrap();
    assert_eq!(record.model_identifier, "models/gemini-1.5-flash");
    assert_eq!(record.messages.len(), 1);

    let Json(reply) = send_message(State(state.clone()), say("What is my fate?"))
        .await
        .unwrap();
    assert_eq!(reply.reply, "Your fate is your own to weave.");
    assert!(reply.recorded);

    let Json(saved) = save_session(State(state.clone())).await.unwrap();
    assert_eq!(saved.id, record.unique_id.unwrap());
    let Json(snapshot) = get_session(State(state.clone())).await;
    assert_eq!(snapshot.phase, SessionPhase::Saved);

    let Json(summaries) = list_records(State(state.clone())).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Merlin");
    assert_eq!(summaries[0].turn_count, 3);

    // Start over, then pick the saved chat back up
    let Json(snapshot) = reset_session(State(state.clone())).await;
    assert_eq!(snapshot.phase, SessionPhase::Creating);

    let Json(snapshot) = load_record(State(state.clone()), Path(saved.id))
        .await
        .unwrap();
    assert_eq!(snapshot.phase, SessionPhase::Active);
    let restored = snapshot.record.unwrap();
    assert_eq!(restored.unique_id, Some(saved.id));
    assert_eq!(restored.messages[1].content, "What is my fate?");
    assert_eq!(restored.messages[2].role, Role::Character);

    send_message(State(state.clone()), say("And tomorrow?"))
        .await
        .unwrap();
    save_session(State(state.clone())).await.unwrap();
    let Json(summaries) = list_records(State(state.clone())).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].turn_count, 5);

    delete_record(State(state.clone()), Path(saved.id))
        .await
        .unwrap();
    delete_record(State(state.clone()), Path(saved.id))
        .await
        .unwrap();
    let Json(summaries) = list_records(State(state)).await.unwrap();
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn generation_failure_is_reported_not_recorded() {
    let temp_dir = TempDir::new().unwrap();
    let state = app(&temp_dir, vec![Err("quota exceeded")]);
    create_session(State(state.clone()), Json(merlin()))
        .await
        .unwrap();

    let (status, body) = send_message(State(state.clone()), say("hi"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("quota exceeded"));

    let Json(snapshot) = get_session(State(state)).await;
    let messages = snapshot.record.unwrap().messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, "hi");
}

#[tokio::test]
async fn invalid_character_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let state = app(&temp_dir, vec![]);
    let mut request = merlin();
    request.name = String::new();

    let (status, _) = create_session(State(state.clone()), Json(request))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let Json(snapshot) = get_session(State(state)).await;
    assert_eq!(snapshot.phase, SessionPhase::Uninitialized);
}

#[tokio::test]
async fn malformed_record_leaves_active_session_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let state = app(&temp_dir, vec![Ok("Hmm.")]);
    create_session(State(state.clone()), Json(merlin()))
        .await
        .unwrap();
    send_message(State(state.clone()), say("hello")).await.unwrap();
    let Json(before) = get_session(State(state.clone())).await;

    let broken_id = Uuid::new_v4();
    tokio::fs::create_dir_all(state.store.dir()).await.unwrap();
    tokio::fs::write(
        state.store.path_for(broken_id),
        r#"{"name": "Ghost", "persona_description": "Gone", "greeting": "Boo"}"#,
    )
    .await
    .unwrap();

    let (status, _) = load_record(State(state.clone()), Path(broken_id))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let Json(after) = get_session(State(state)).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn operations_without_session_are_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let state = app(&temp_dir, vec![]);

    let (status, _) = send_message(State(state.clone()), say("hi"))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = save_session(State(state.clone())).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = clear_history(State(state)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_clear_keep_identity() {
    let temp_dir = TempDir::new().unwrap();
    let state = app(&temp_dir, vec![Ok("Indeed.")]);
    let mut request = merlin();
    request.model_identifier = Some("gemini-1.5-pro".to_string());
    let Json(created) = create_session(State(state.clone()), Json(request))
        .await
        .unwrap();
    let created = created.record.unwrap();
    assert_eq!(created.model_identifier, "gemini-1.5-pro");

    send_message(State(state.clone()), say("hello")).await.unwrap();
    let Json(updated) = update_character(
        State(state.clone()),
        Json(UpdateCharacterRequest {
            name: Some("Morgana".to_string()),
            persona_description: Some(String::new()),
            ..Default::default()
        }),
    )
    .await
    .unwrap();
    let updated = updated.record.unwrap();
    assert_eq!(updated.name, "Morgana");
    assert_eq!(updated.persona_description, created.persona_description);
    assert_eq!(updated.unique_id, created.unique_id);

    let Json(cleared) = clear_history(State(state)).await.unwrap();
    let cleared = cleared.record.unwrap();
    assert!(cleared.messages.is_empty());
    assert_eq!(cleared.unique_id, created.unique_id);
}

#[tokio::test]
async fn record_without_model_continues_on_default() {
    let temp_dir = TempDir::new().unwrap();
    let llm = Arc::new(ScriptedModel::new(vec![Ok("Still here.")]));
    let state = app_with_model(&temp_dir, llm.clone());

    let id = Uuid::new_v4();
    tokio::fs::create_dir_all(state.store.dir()).await.unwrap();
    tokio::fs::write(
        state.store.path_for(id),
        r#"{"name": "Merlin", "persona_description": "Wizard", "greeting": "Hi", "messages": []}"#,
    )
    .await
    .unwrap();

    let Json(snapshot) = load_record(State(state.clone()), Path(id)).await.unwrap();
    let record = snapshot.record.unwrap();
    assert_eq!(record.model_identifier, state.settings.model);
    assert_eq!(record.unique_id, Some(id));

    send_message(State(state.clone()), say("hello")).await.unwrap();
    let requested = llm.requested_models.lock().unwrap().clone();
    assert_eq!(requested, [state.settings.model.clone()]);
}
