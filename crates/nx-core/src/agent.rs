//! Agents, their behaviors, and their lifecycle status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// What an agent is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Deployed but unoccupied.
    Idle,
    /// Running its behavior loop.
    Active,
    /// Executing a direct command.
    Executing,
    /// Last command failed.
    Error,
    /// Travelling to a target cell.
    Moving,
    /// Collecting a data node.
    Gathering,
}

impl AgentStatus {
    /// The canonical lowercase token for this status.
    pub fn name(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Active => "active",
            AgentStatus::Executing => "executing",
            AgentStatus::Error => "error",
            AgentStatus::Moving => "moving",
            AgentStatus::Gathering => "gathering",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An agent behavior pattern.
///
/// This is the single behavior table shared by the validator, the execution
/// engine, and the fallback resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    /// Walk a repeating route around the deployment point.
    Patrol,
    /// Explore outward and report discoveries.
    Scout,
    /// Hold position and engage threats.
    Guard,
    /// Seek out and collect data nodes.
    Gather,
    /// Guard a fixed area rather than a point.
    #[serde(rename = "guardarea")]
    GuardArea,
}

impl Behavior {
    /// All behaviors, in canonical listing order.
    pub const ALL: [Behavior; 5] = [
        Behavior::Patrol,
        Behavior::Scout,
        Behavior::Guard,
        Behavior::Gather,
        Behavior::GuardArea,
    ];

    /// Parse a behavior token, case-insensitively.
    pub fn parse(token: &str) -> Option<Behavior> {
        let lower = token.to_ascii_lowercase();
        Behavior::ALL.iter().copied().find(|b| b.name() == lower)
    }

    /// The canonical lowercase token for this behavior.
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Patrol => "patrol",
            Behavior::Scout => "scout",
            Behavior::Guard => "guard",
            Behavior::Gather => "gather",
            Behavior::GuardArea => "guardarea",
        }
    }

    /// Comma-separated list of all valid tokens, for diagnostics.
    pub fn valid_tokens() -> String {
        Behavior::ALL
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A deployed agent.
///
/// The core reads agents for context-building and collision checks; they are
/// mutated only by applying execution-engine outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current grid cell.
    pub position: Point,
    /// Lifecycle status.
    pub status: AgentStatus,
    /// Assigned behavior pattern.
    pub behavior: Behavior,
    /// Hit points, 0–100.
    pub health: u32,
    /// Energy reserve, 0–100.
    pub energy: u32,
    /// Short description of the last thing the agent did.
    pub last_action: String,
    /// When the agent was deployed.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_parse_accepts_all_tokens() {
        for behavior in Behavior::ALL {
            assert_eq!(Behavior::parse(behavior.name()), Some(behavior));
        }
        assert_eq!(Behavior::parse("GuardArea"), Some(Behavior::GuardArea));
        assert_eq!(Behavior::parse("wander"), None);
    }

    #[test]
    fn behavior_valid_tokens_lists_all() {
        let tokens = Behavior::valid_tokens();
        assert_eq!(tokens, "patrol, scout, guard, gather, guardarea");
    }

    #[test]
    fn agent_json_uses_lowercase_enums() {
        let agent = Agent {
            id: "agent_0".into(),
            name: "Agent-0".into(),
            position: Point::new(25, 25),
            status: AgentStatus::Active,
            behavior: Behavior::GuardArea,
            health: 100,
            energy: 100,
            last_action: "deployed".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["status"], "active");
        assert_eq!(json["behavior"], "guardarea");
    }
}
