//! World events: tagged effect payloads and the event envelope.
//!
//! Events are created by the event generator, applied once by the consumer,
//! and expire after their duration. Like objects, their effects are typed per
//! event kind rather than carried in a free-form map.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// The kind of a timed world event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Electromagnetic pulse: disables agents near the epicenter.
    EmpBurst,
    /// A hostile agent appears.
    RogueAgent,
    /// A spreading zone that corrupts data and drains health.
    CorruptZone,
    /// Temporarily boosted data collection.
    DataSurge,
    /// Reality glitch: random teleports and delayed commands.
    SystemGlitch,
}

impl EventKind {
    /// All event kinds, in canonical listing order.
    pub const ALL: [EventKind; 5] = [
        EventKind::EmpBurst,
        EventKind::RogueAgent,
        EventKind::CorruptZone,
        EventKind::DataSurge,
        EventKind::SystemGlitch,
    ];

    /// The canonical snake_case name (`"emp_burst"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::EmpBurst => "emp_burst",
            EventKind::RogueAgent => "rogue_agent",
            EventKind::CorruptZone => "corrupt_zone",
            EventKind::DataSurge => "data_surge",
            EventKind::SystemGlitch => "system_glitch",
        }
    }
}

/// Typed per-kind event effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventEffects {
    /// Effects of an EMP burst.
    EmpBurst {
        /// Agents in radius are disabled for the duration.
        disable_agents: bool,
        /// Energy drained from each affected agent.
        energy_drain: u32,
    },
    /// Effects of a rogue agent spawn.
    RogueAgent {
        /// Whether a hostile is spawned at the event position.
        spawn_hostile: bool,
        /// Behavior archetype of the hostile.
        agent_type: String,
    },
    /// Effects of a corruption zone.
    CorruptZone {
        /// Data nodes in radius become corrupted.
        corrupt_data: bool,
        /// Health drained per tick from agents inside.
        health_drain: u32,
    },
    /// Effects of a data surge.
    DataSurge {
        /// Collection inside the radius yields bonus data.
        bonus_data: bool,
        /// Score multiplier while active.
        multiplier: u32,
    },
    /// Effects of a system glitch.
    SystemGlitch {
        /// Agents in radius may be teleported.
        random_teleport: bool,
        /// Added latency on command execution, in milliseconds.
        command_delay_ms: u64,
    },
}

/// A timed, positioned world event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    /// Event identifier.
    pub id: String,
    /// The event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Epicenter of the event.
    pub position: Point,
    /// Radius of effect, in cells.
    pub radius: u32,
    /// How long the event stays active.
    pub duration: Duration,
    /// Typed effect payload, matching `kind`.
    pub effects: EventEffects,
    /// Terminal-facing announcement.
    pub message: String,
    /// When the event was generated.
    pub timestamp: DateTime<Utc>,
}
