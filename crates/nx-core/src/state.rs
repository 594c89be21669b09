//! Mutable world state snapshots consumed by validation and execution.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::grid::{Point, WorldSize};
use crate::object::WorldObject;
use crate::template::WorldTemplate;

/// Soft global cap on deployed agents. Approaching it is a validator warning,
/// never an error.
pub const AGENT_CAP: usize = 50;

/// Cumulative player statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Total score earned.
    pub score: i64,
    /// Commands successfully executed.
    pub commands_executed: u64,
    /// Agents deployed over the session.
    pub agents_deployed: u64,
    /// Player level.
    pub level: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            score: 0,
            commands_executed: 0,
            agents_deployed: 0,
            level: 1,
        }
    }
}

/// A snapshot of the live world: agents, objects, bounds, and player stats.
///
/// The validator reads it for bounds and capacity checks; the execution
/// engine reads it to produce a state diff. Neither mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Deployed agents.
    pub agents: Vec<Agent>,
    /// World dimensions.
    pub size: WorldSize,
    /// Placed objects.
    pub objects: Vec<WorldObject>,
    /// Player statistics.
    pub stats: PlayerStats,
}

impl WorldState {
    /// Create an empty world of the given size.
    pub fn new(size: WorldSize) -> Self {
        Self {
            agents: Vec::new(),
            size,
            objects: Vec::new(),
            stats: PlayerStats::default(),
        }
    }

    /// Initialize state from a generated template.
    pub fn from_template(template: &WorldTemplate) -> Self {
        Self {
            agents: Vec::new(),
            size: template.size,
            objects: template.objects.clone(),
            stats: PlayerStats::default(),
        }
    }

    /// Whether a blocking object occupies the given cell.
    pub fn blocked_at(&self, p: Point) -> bool {
        self.objects
            .iter()
            .any(|o| o.position == p && o.kind.is_blocking())
    }

    /// The object at the given cell, if any.
    pub fn object_at(&self, p: Point) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.position == p)
    }
}
