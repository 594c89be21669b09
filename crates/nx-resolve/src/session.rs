//! Bounded per-conversation session storage.
//!
//! Sessions are created on first reference, updated on each successful
//! resolution, and trimmed - never deleted - as messages accumulate. The
//! store itself is bounded: at capacity, the least-recently-used session is
//! evicted. There is no terminal session state and no explicit teardown.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::context::{ContextUpdate, SessionContext};

/// Maximum retained messages per session (10 exchanges).
pub const MESSAGE_CAP: usize = 20;

/// Default maximum number of live sessions in a store.
pub const DEFAULT_STORE_CAPACITY: usize = 64;

/// Who said a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The player's natural-language input.
    User,
    /// The model's raw reply.
    Assistant,
}

/// One message in a session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Speaker.
    pub role: Role,
    /// Raw message text.
    pub content: String,
}

/// A bounded conversation with stored context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier.
    pub id: String,
    /// Owning user, if known.
    pub user_id: Option<String>,
    /// Message history, oldest first, at most [`MESSAGE_CAP`] entries.
    pub messages: Vec<Message>,
    /// Stored conversational context.
    pub context: SessionContext,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session last changed.
    pub updated_at: DateTime<Utc>,
}

struct SessionEntry {
    session: Session,
    /// Serializes in-flight resolutions for this session id.
    lock: Arc<Mutex<()>>,
    /// Monotonic use counter driving LRU eviction. `updated_at` is data;
    /// this is the tiebreak-free eviction key.
    last_used: u64,
}

/// Process-wide keyed session state with an implicit lifecycle.
pub struct SessionStore {
    sessions: HashMap<String, SessionEntry>,
    capacity: usize,
    use_counter: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_CAPACITY)
    }
}

impl SessionStore {
    /// A store holding at most `capacity` sessions.
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            capacity: capacity.max(1),
            use_counter: 0,
        }
    }

    /// Resolve or create a session, returning its id and per-session lock.
    ///
    /// A fresh id is minted when none is supplied or the supplied one is
    /// unknown (it is then used as-is, so callers can pin their own ids).
    /// Creation at capacity evicts the least-recently-used session.
    pub fn get_or_create(&mut self, id: Option<&str>) -> (String, Arc<Mutex<()>>) {
        let id = match id {
            Some(id) => id.to_string(),
            None => format!("session_{}", Uuid::new_v4()),
        };

        if !self.sessions.contains_key(&id) {
            if self.sessions.len() >= self.capacity {
                self.evict_lru();
            }
            let now = Utc::now();
            self.sessions.insert(
                id.clone(),
                SessionEntry {
                    session: Session {
                        id: id.clone(),
                        user_id: None,
                        messages: Vec::new(),
                        context: SessionContext::default(),
                        created_at: now,
                        updated_at: now,
                    },
                    lock: Arc::new(Mutex::new(())),
                    last_used: 0,
                },
            );
        }

        self.use_counter += 1;
        let counter = self.use_counter;
        let entry = self.sessions.get_mut(&id).expect("just inserted");
        entry.last_used = counter;
        (id, Arc::clone(&entry.lock))
    }

    /// Look up a session by id.
    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id).map(|e| &e.session)
    }

    /// Merge a context update into a session's stored context.
    pub fn merge_context(&mut self, id: &str, mut update: ContextUpdate) {
        if let Some(entry) = self.sessions.get_mut(id) {
            if let Some(user_id) = update.user_id.take() {
                entry.session.user_id = Some(user_id);
            }
            entry.session.context.merge(update);
            entry.session.updated_at = Utc::now();
        }
    }

    /// Append a user/assistant exchange and trim history to the cap,
    /// dropping the oldest messages first.
    pub fn append_exchange(&mut self, id: &str, user_text: &str, assistant_reply: &str) {
        let Some(entry) = self.sessions.get_mut(id) else {
            return;
        };
        entry.session.messages.push(Message {
            role: Role::User,
            content: user_text.to_string(),
        });
        entry.session.messages.push(Message {
            role: Role::Assistant,
            content: assistant_reply.to_string(),
        });
        let overflow = entry.session.messages.len().saturating_sub(MESSAGE_CAP);
        if overflow > 0 {
            entry.session.messages.drain(..overflow);
        }
        entry.session.updated_at = Utc::now();
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict_lru(&mut self) {
        let victim = self
            .sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(id, _)| id.clone());
        if let Some(id) = victim {
            self.sessions.remove(&id);
        }
    }
}
