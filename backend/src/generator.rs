use crate::error::ChatResult;
use crate::llm::LanguageModel;
use crate::persona::ChatSession;
use crate::prompt::{build_request, compose_prompt};
use shared::models::Role;

/// Returned, but never recorded, when the model answers with nothing.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't come up with a reply right now.";

#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Whether the reply was appended to the log
    pub recorded: bool,
}

/// Run one user turn against the model.
///
/// The user's message is always kept in the log, even when the model call
/// fails. A failure comes back as `ChatError::Generation` and leaves no
/// character turn behind; blank output yields `FALLBACK_REPLY` unrecorded.
pub async fn generate_response(
    session: &mut ChatSession,
    llm: &dyn LanguageModel,
    user_message: &str,
) -> ChatResult<Reply> {
    session.append_turn(Role::User, user_message);

    let character = session.character();
    let prompt = compose_prompt(character, session.messages());
    let request = build_request(&prompt, character, user_message);
    let model = character.model_identifier.clone();

    let raw = llm.generate(&model, &request).await.inspect_err(|e| {
        tracing::warn!("Generation failed for {}: {}", session.id(), e);
    })?;

    let text = raw.trim();
    if text.is_empty() {
        tracing::debug!("Model {} returned an empty reply", model);
        return Ok(Reply {
            text: FALLBACK_REPLY.to_string(),
            recorded: false,
        });
    }

    session.append_turn(Role::Character, text);
    Ok(Reply {
        text: text.to_string(),
        recorded: true,
    })
}
