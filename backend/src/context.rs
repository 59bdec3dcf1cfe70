use crate::error::{ChatError, ChatResult};
use crate::persona::ChatSession;
use shared::models::{SessionPhase, SessionSnapshot};

/// The UI's explicit session context: which phase it is in and the live
/// session, if any. Core operations take the session from here by reference.
#[derive(Debug)]
pub struct SessionContext {
    phase: SessionPhase,
    session: Option<ChatSession>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            session: None,
        }
    }
}

impl SessionContext {
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// Borrow the live session for a mutation. Any change moves a saved
    /// session back to plain `Active`.
    pub fn session_mut(&mut self) -> ChatResult<&mut ChatSession> {
        let session = self.session.as_mut().ok_or(ChatError::NoActiveSession)?;
        self.phase = SessionPhase::Active;
        Ok(session)
    }

    /// Drop any live session and wait for new persona fields.
    pub fn begin_creating(&mut self) {
        self.session = None;
        self.phase = SessionPhase::Creating;
    }

    pub fn activate(&mut self, session: ChatSession) {
        self.session = Some(session);
        self.phase = SessionPhase::Active;
    }

    pub fn mark_saved(&mut self) -> ChatResult<()> {
        if self.session.is_none() {
            return Err(ChatError::NoActiveSession);
        }
        self.phase = SessionPhase::Saved;
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            record: self.session.as_ref().map(ChatSession::to_record),
        }
    }
}
