//! Natural-language command resolution.
//!
//! [`Resolver::resolve`] maps free text onto the same structured command
//! strings the validator accepts. When a model endpoint is configured it
//! builds a system prompt from the command catalog and the session's stored
//! context, submits the rolling conversation window, and parses the model's
//! JSON reply. On any failure - transport error, bad status, malformed
//! reply, timeout, or no endpoint at all - it degrades to deterministic
//! keyword heuristics. Only input matching neither path yields `None`, which
//! callers treat as "no suggestion available", not an error.
//!
//! Session state lives in an explicit [`SessionStore`] owned by the resolver
//! - no module-level globals - and resolutions for the same session id are
//! serialized so concurrent calls cannot interleave context updates.

pub mod client;
pub mod context;
pub mod fallback;
pub mod prompt;
pub mod resolver;
pub mod session;

pub use client::{ClientError, ModelClient, ModelConfig, ModelReply};
pub use context::{Challenge, ContextUpdate, Objective, SessionContext};
pub use fallback::{FALLBACK_CONFIDENCE, fallback_parse};
pub use resolver::{Resolution, Resolver};
pub use session::{Message, Role, Session, SessionStore};
