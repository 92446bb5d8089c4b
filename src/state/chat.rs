//! Chat session state and the turn submission protocol.
//!
//! SYSTEM CONTEXT
//! ==============
//! The panel component keeps one [`ChatSession`] in a signal. A send action
//! runs [`submit_turn`], which mutates the session before and after the single
//! awaited completion call. Everything except that call is synchronous.
//!
//! DESIGN
//! ======
//! The post-await mutation goes through a [`SessionSlot`]. A slot whose
//! owner has been torn down yields `None`, so a completion that resolves after
//! the widget was detached is dropped instead of touching freed state.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::{RwSignal, Update};

use super::conversation::{Conversation, Role};
use crate::config::WidgetConfig;
use crate::net::error::CompletionError;
use crate::net::gemini::Completion;

/// Whether the chat card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Only the launcher button is visible.
    #[default]
    Collapsed,
    /// The full chat card is visible.
    Expanded,
}

/// State for one mounted chat panel.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    input: String,
    generating: bool,
    visibility: Visibility,
    last_error: Option<String>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// `true` while a completion request is outstanding.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Expanded
    }

    pub fn open(&mut self) {
        self.visibility = Visibility::Expanded;
    }

    /// Collapse the card. History is kept.
    pub fn close(&mut self) {
        self.visibility = Visibility::Collapsed;
    }

    /// Message of the most recent failed submission, cleared on the next send.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.generating && !self.input.trim().is_empty()
    }

    /// Start a submission from the current input.
    ///
    /// Returns the prompt to send, or `None` when the input is blank or a
    /// request is already outstanding; in both cases nothing changes. On
    /// success the user turn is appended and the input is cleared right away.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.generating || self.input.trim().is_empty() {
            return None;
        }
        self.generating = true;
        self.last_error = None;
        let prompt = std::mem::take(&mut self.input);
        self.conversation.push(Role::User, prompt.as_str());
        Some(prompt)
    }

    /// Finish a submission with the completion outcome.
    ///
    /// Failures become an assistant turn carrying the user-facing message. The
    /// `generating` guard is cleared unconditionally.
    pub fn finish_submit(&mut self, result: Result<String, CompletionError>) {
        match result {
            Ok(answer) => {
                self.conversation.push(Role::Assistant, answer);
            }
            Err(e) => {
                let message = e.user_message();
                self.last_error = Some(message.to_owned());
                self.conversation.push(Role::Assistant, message);
            }
        }
        self.generating = false;
    }
}

// =============================================================================
// SLOTS
// =============================================================================

/// Access to a session that may have been torn down.
pub trait SessionSlot {
    /// Run `f` against the live session, or return `None` if it is gone.
    fn try_with<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R>;
}

impl SessionSlot for RwSignal<ChatSession> {
    fn try_with<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl SessionSlot for Rc<RefCell<ChatSession>> {
    fn try_with<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
        Some(f(&mut *self.borrow_mut()))
    }
}

impl SessionSlot for Weak<RefCell<ChatSession>> {
    fn try_with<R>(&self, f: impl FnOnce(&mut ChatSession) -> R) -> Option<R> {
        let session = self.upgrade()?;
        let mut guard = session.borrow_mut();
        Some(f(&mut *guard))
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// What a call to [`submit_turn`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input or a request already in flight; nothing changed.
    Rejected,
    /// An assistant turn with the answer was appended.
    Answered,
    /// An assistant turn with the error message was appended.
    Failed(CompletionError),
    /// The session was gone before the submission could be applied.
    Discarded,
}

/// Run one full turn: append the user turn, call the backend once, append the
/// assistant turn, and release the `generating` guard.
pub async fn submit_turn<S, C>(slot: &S, client: &C, config: &WidgetConfig) -> SubmitOutcome
where
    S: SessionSlot,
    C: Completion + ?Sized,
{
    let Some(begun) = slot.try_with(ChatSession::begin_submit) else {
        return SubmitOutcome::Discarded;
    };
    let Some(prompt) = begun else {
        return SubmitOutcome::Rejected;
    };

    let result = client.complete(config.api_key(), config.model(), &prompt).await;
    let outcome = match &result {
        Ok(_) => SubmitOutcome::Answered,
        Err(e) => {
            log::warn!("completion failed: {e}");
            SubmitOutcome::Failed(e.clone())
        }
    };

    if slot.try_with(|s| s.finish_submit(result)).is_none() {
        log::debug!("chat panel gone before completion resolved; dropping result");
        return SubmitOutcome::Discarded;
    }
    outcome
}
