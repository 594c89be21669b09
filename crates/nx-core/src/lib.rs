//! Core types for Nexus: the grid world model and the deterministic RNG.
//!
//! This crate defines the data that flows between the command pipeline, the
//! procedural generator, and the natural-language resolver. It is independent
//! of all of them - you can construct a [`WorldState`] programmatically or
//! deserialize a [`WorldTemplate`] from JSON.
//!
//! Everything here is plain data plus a handful of pure helpers. The one
//! stateful type is [`SeededRandom`], and each consumer owns its own instance.

/// Agents, their behaviors, and their lifecycle status.
pub mod agent;
/// World events: tagged effect payloads and the event envelope.
pub mod event;
/// Grid geometry: points, world bounds, and compass locations.
pub mod grid;
/// World objects with per-kind typed properties.
pub mod object;
/// Deterministic pseudo-random source seeded from a string.
pub mod rng;
/// Mutable world state snapshots consumed by validation and execution.
pub mod state;
/// Immutable generated world templates.
pub mod template;

pub use agent::{Agent, AgentStatus, Behavior};
pub use event::{EventEffects, EventKind, WorldEvent};
pub use grid::{Compass, Point, WorldSize};
pub use object::{ObjectKind, WorldObject};
pub use rng::SeededRandom;
pub use state::{AGENT_CAP, PlayerStats, WorldState};
pub use template::WorldTemplate;
