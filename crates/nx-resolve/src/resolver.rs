//! Orchestration: session lookup, model call, fallback, history update.

use serde::Serialize;
use tokio::sync::Mutex;

use nx_command::CommandCatalog;

use crate::client::{ModelClient, WireMessage};
use crate::context::ContextUpdate;
use crate::fallback::{self, FALLBACK_CONFIDENCE};
use crate::prompt::build_system_prompt;
use crate::session::{Message, Role, SessionStore};

/// The outcome of resolving one piece of free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The structured command to suggest or run.
    pub command: String,
    /// Confidence in `[0, 1]`. Heuristic results are fixed at 0.7.
    pub confidence: f64,
    /// How the command was derived.
    pub explanation: String,
    /// Whether the user should clarify before executing.
    pub needs_clarification: bool,
    /// The clarification question, when one is needed.
    pub clarification_prompt: Option<String>,
    /// The session the exchange belongs to; pass it back to continue the
    /// conversation.
    pub session_id: String,
}

/// Maps free text to structured commands, with per-session memory.
///
/// Sessions are serialized: two concurrent resolutions for the same session
/// id run one after the other, so context merges and history appends never
/// interleave. Distinct sessions resolve concurrently. An abandoned call
/// mutates nothing - history is appended only after a fully parsed reply.
pub struct Resolver {
    store: Mutex<SessionStore>,
    client: Option<ModelClient>,
    catalog: CommandCatalog,
}

impl Resolver {
    /// A resolver with no model endpoint: heuristics only.
    pub fn new(catalog: CommandCatalog) -> Self {
        Self {
            store: Mutex::new(SessionStore::default()),
            client: None,
            catalog,
        }
    }

    /// Attach a model client.
    pub fn with_client(mut self, client: ModelClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Whether a model endpoint is configured.
    pub fn model_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Resolve free text into a structured command.
    ///
    /// Steps: resolve or create the session, merge any supplied context,
    /// try the model with the session's conversation window, fall back to
    /// pattern heuristics on any failure. `None` only when neither path
    /// matches - no suggestion, not an error.
    pub async fn resolve(
        &self,
        text: &str,
        session_id: Option<&str>,
        context: Option<ContextUpdate>,
    ) -> Option<Resolution> {
        let (id, session_lock, system_prompt, history) = {
            let mut store = self.store.lock().await;
            let (id, session_lock) = store.get_or_create(session_id);
            if let Some(update) = context {
                store.merge_context(&id, update);
            }
            let session = store.session(&id).expect("session just created");
            let system_prompt = build_system_prompt(&self.catalog, &session.context);
            (id, session_lock, system_prompt, session.messages.clone())
        };

        // One in-flight resolution per session.
        let _serialized = session_lock.lock().await;

        if let Some(client) = &self.client {
            let mut messages = Vec::with_capacity(history.len() + 2);
            messages.push(WireMessage::new("system", system_prompt));
            for message in &history {
                let role = match message.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };
                messages.push(WireMessage::new(role, message.content.clone()));
            }
            messages.push(WireMessage::new("user", text));

            if let Ok((reply, raw)) = client.complete(&messages).await {
                let mut store = self.store.lock().await;
                store.append_exchange(&id, text, &raw);
                return Some(Resolution {
                    command: reply.command,
                    confidence: reply.confidence.clamp(0.0, 1.0),
                    explanation: reply.explanation,
                    needs_clarification: reply.needs_clarification,
                    clarification_prompt: reply.clarification_prompt,
                    session_id: id,
                });
            }
            // Model unavailable or reply unusable: recover locally below.
        }

        fallback::fallback_parse(text).map(|m| Resolution {
            command: m.command,
            confidence: FALLBACK_CONFIDENCE,
            explanation: format!("Matched pattern \"{}\" to {}", m.pattern, m.template),
            needs_clarification: false,
            clarification_prompt: None,
            session_id: id,
        })
    }

    /// Continue a clarification round-trip: resolve the user's answer in the
    /// same session, so the model sees the original exchange in its window.
    pub async fn clarify(&self, session_id: &str, answer: &str) -> Option<Resolution> {
        self.resolve(answer, Some(session_id), None).await
    }

    /// Snapshot a session's message history, for inspection and tests.
    pub async fn session_history(&self, session_id: &str) -> Vec<Message> {
        let store = self.store.lock().await;
        store
            .session(session_id)
            .map(|s| s.messages.clone())
            .unwrap_or_default()
    }
}
