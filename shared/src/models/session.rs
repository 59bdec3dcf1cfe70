use super::character::Character;
use super::message::ChatMessage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One persisted chat: the character definition plus its transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,
    pub persona_description: String,
    pub greeting: String,
    #[serde(default)]
    pub avatar_reference: Option<String>,
    #[serde(default)]
    pub model_identifier: String,
    #[serde(default)]
    /// Assigned on first save when missing
    pub unique_id: Option<Uuid>,
    pub messages: Vec<ChatMessage>,
}

impl SessionRecord {
    pub fn new(character: &Character, messages: &[ChatMessage]) -> Self {
        Self {
            name: character.name.clone(),
            persona_description: character.persona_description.clone(),
            greeting: character.greeting.clone(),
            avatar_reference: character.avatar_reference.clone(),
            model_identifier: character.model_identifier.clone(),
            unique_id: Some(character.id),
            messages: messages.to_vec(),
        }
    }
}

/// Cheap listing entry for the chat picker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub name: String,
    pub persona_snippet: String,
    pub turn_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Uninitialized,
    Creating,
    Active,
    Saved,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    #[serde(default)]
    pub record: Option<SessionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SaveSessionResponse {
    pub id: Uuid,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn record_without_id_or_model_still_decodes() {
        let json = r#"{
            "name": "Merlin",
            "persona_description": "Wise old wizard",
            "greeting": "Greetings, traveler.",
            "messages": [{"role": "character", "content": "Greetings, traveler."}]
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.unique_id, None);
        assert_eq!(record.avatar_reference, None);
        assert_eq!(record.messages[0].role, Role::Character);
        assert_eq!(record.messages[0].character, None);
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = crate::models::ChatMessage::user("hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "user");
        assert!(value.get("character").is_none());
    }
}
