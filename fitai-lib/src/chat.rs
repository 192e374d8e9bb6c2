// src/chat.rs
use crate::catalog::{self, ScriptedReply, UserProfile};
use crate::config::ChatSettings;
use chrono::{DateTime, Local};
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Cannot send an empty message.")]
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    pub suggestions: Vec<String>,
}

impl ChatMessage {
    fn assistant(id: String, reply: ScriptedReply) -> Self {
        Self {
            id,
            role: Role::Assistant,
            content: reply.content,
            timestamp: Local::now(),
            suggestions: reply.suggestions,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Literal prompt lookup with a single fallback reply.
#[derive(Debug, Clone)]
pub struct Responder {
    script: HashMap<String, ScriptedReply>,
    fallback: ScriptedReply,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(catalog::chat_script(), catalog::chat_fallback())
    }
}

impl Responder {
    pub fn new(script: Vec<(String, ScriptedReply)>, fallback: ScriptedReply) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
        }
    }

    pub fn reply_for(&self, user_text: &str) -> &ScriptedReply {
        self.script.get(user_text).unwrap_or(&self.fallback)
    }

    pub fn respond(&self, user_text: &str) -> ChatMessage {
        ChatMessage::assistant("ai".to_string(), self.reply_for(user_text).clone())
    }
}

pub fn respond(user_text: &str) -> ChatMessage {
    Responder::default().respond(user_text)
}

/// Picks a reply delay in `min ..= min + jitter`.
pub fn reply_delay<R: Rng + ?Sized>(settings: &ChatSettings, rng: &mut R) -> Duration {
    let jitter = rng.gen_range(0..=settings.jitter_ms);
    Duration::from_millis(settings.min_delay_ms.saturating_add(jitter))
}

#[derive(Debug, Clone)]
struct PendingReply {
    // None when the delay is past what `Instant` can hold
    due: Option<Instant>,
    reply: ScriptedReply,
}

/// Message log plus replies waiting for their delay to pass. Nothing is
/// delivered unless the owner calls `poll`, so dropping the conversation
/// drops anything still pending.
pub struct ChatConversation {
    responder: Responder,
    settings: ChatSettings,
    messages: Vec<ChatMessage>,
    pending: Vec<PendingReply>,
    next_id: u64,
}

impl ChatConversation {
    pub fn new(user: &UserProfile, responder: Responder, settings: ChatSettings) -> Self {
        let mut conversation = Self {
            responder,
            settings,
            messages: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        };
        let id = conversation.take_id("ai");
        conversation
            .messages
            .push(ChatMessage::assistant(id, catalog::greeting(user)));
        conversation
    }

    fn take_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Suggestion chips of the newest assistant message.
    pub fn latest_suggestions(&self) -> &[String] {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.suggestions.as_slice())
            .unwrap_or_default()
    }

    /// Records the user's message and schedules the scripted reply.
    /// Callers are expected not to send while `is_typing()`, but it is not enforced.
    /// # Errors
    /// `ChatError::EmptyMessage` for blank input.
    pub fn send<R: Rng + ?Sized>(
        &mut self,
        text: &str,
        now: Instant,
        rng: &mut R,
    ) -> Result<Duration, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let id = self.take_id("user");
        self.messages.push(ChatMessage {
            id,
            role: Role::User,
            content: text.to_string(),
            timestamp: Local::now(),
            suggestions: Vec::new(),
        });

        let delay = reply_delay(&self.settings, rng);
        let reply = self.responder.reply_for(text).clone();
        debug!(?delay, "scheduled coach reply");
        self.pending.push(PendingReply {
            due: now.checked_add(delay),
            reply,
        });
        Ok(delay)
    }

    /// Delivers every reply whose delay has elapsed, earliest due first.
    /// Returns how many were delivered.
    pub fn poll(&mut self, now: Instant) -> usize {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|p| p.due.is_some_and(|at| at <= now));
        self.pending = waiting;
        due.sort_by_key(|p| p.due);
        let delivered = due.len();
        for pending in due {
            let id = self.take_id("ai");
            self.messages.push(ChatMessage::assistant(id, pending.reply));
        }
        delivered
    }
}
