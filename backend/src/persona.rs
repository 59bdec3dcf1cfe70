//! Persona model: a character's identity plus its rolling conversation log.

use crate::error::{ChatError, ChatResult};
use shared::models::{
    Character, ChatMessage, CreateCharacterRequest, Role, SessionRecord, UpdateCharacterRequest,
};
use uuid::Uuid;

/// Returns the trimmed-nonempty value, treating blank input as absent.
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build a new character with a fresh id. `default_model` is used when the
/// request leaves the model unset.
pub fn create_character(
    request: CreateCharacterRequest,
    default_model: &str,
) -> ChatResult<Character> {
    let mut missing = Vec::new();
    if request.name.trim().is_empty() {
        missing.push("name");
    }
    if request.persona_description.trim().is_empty() {
        missing.push("persona_description");
    }
    if request.greeting.trim().is_empty() {
        missing.push("greeting");
    }
    if !missing.is_empty() {
        return Err(ChatError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let model_identifier =
        provided(request.model_identifier).unwrap_or_else(|| default_model.to_string());

    Ok(Character {
        id: Uuid::new_v4(),
        name: request.name,
        persona_description: request.persona_description,
        greeting: request.greeting,
        avatar_reference: provided(request.avatar_reference),
        model_identifier,
    })
}

/// The in-memory unit the UI works on. The log is oldest-first and, when
/// non-empty after `start`, opens with the greeting.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    character: Character,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn start(character: Character) -> Self {
        let greeting = ChatMessage::from_character(
            character.greeting.clone(),
            character.name.clone(),
            character.avatar_reference.clone(),
        );
        Self {
            character,
            messages: vec![greeting],
        }
    }

    /// Rebuild a session from a validated record. Nothing is replayed through
    /// the model; the next prompt is derived from the restored log alone.
    /// A record saved without a model falls back to `default_model`.
    pub fn restore(record: SessionRecord, default_model: &str) -> Self {
        let model_identifier = Some(record.model_identifier)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_model.to_string());
        let character = Character {
            id: record.unique_id.unwrap_or_else(Uuid::new_v4),
            name: record.name,
            persona_description: record.persona_description,
            greeting: record.greeting,
            avatar_reference: record.avatar_reference,
            model_identifier,
        };
        Self {
            character,
            messages: record.messages,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn id(&self) -> Uuid {
        self.character.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn append_turn(&mut self, role: Role, content: impl Into<String>) {
        let message = match role {
            Role::User => ChatMessage::user(content),
            Role::Character => ChatMessage::from_character(
                content,
                self.character.name.clone(),
                self.character.avatar_reference.clone(),
            ),
        };
        self.messages.push(message);
    }

    pub fn clear_history(&mut self) {
        self.messages.clear();
    }

    /// Merge the provided fields. Returns whether anything changed.
    pub fn update(&mut self, request: UpdateCharacterRequest) -> bool {
        // Only an untouched greeting turn follows the character's edits
        let opens_with_greeting = self.messages.first().is_some_and(|first| {
            first.role == Role::Character && first.content == self.character.greeting
        });

        let mut changed = false;
        if let Some(name) = provided(request.name) {
            self.character.name = name;
            changed = true;
        }
        if let Some(persona) = provided(request.persona_description) {
            self.character.persona_description = persona;
            changed = true;
        }
        if let Some(greeting) = provided(request.greeting) {
            self.character.greeting = greeting;
            changed = true;
        }
        if let Some(avatar) = provided(request.avatar_reference) {
            self.character.avatar_reference = Some(avatar);
            changed = true;
        }

        if changed
            && opens_with_greeting
            && let Some(first) = self.messages.first_mut()
        {
            *first = ChatMessage::from_character(
                self.character.greeting.clone(),
                self.character.name.clone(),
                self.character.avatar_reference.clone(),
            );
        }
        changed
    }

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord::new(&self.character, &self.messages)
    }
}
