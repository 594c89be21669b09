//! Conversational context attached to a resolver session.

use serde::{Deserialize, Serialize};

use nx_core::{Agent, WorldState};

/// One objective inside a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// What the player has to do.
    pub description: String,
    /// Whether the objective is done.
    pub completed: bool,
    /// Current progress.
    pub progress: u32,
    /// Progress needed for completion.
    pub max_progress: u32,
}

/// An active challenge the player is working on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Challenge identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Flavor description.
    pub description: String,
    /// Objectives, in display order.
    pub objectives: Vec<Objective>,
}

/// Everything the resolver knows about the player's situation.
///
/// Embedded into the system prompt so the model can ground its command
/// suggestions in the live world.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Snapshot of the world: agents, objects, size, stats.
    pub world: Option<WorldState>,
    /// Recently executed command strings, oldest first.
    pub recent_commands: Vec<String>,
    /// The challenge currently in progress, if any.
    pub active_challenge: Option<Challenge>,
    /// The agent the player has selected, if any.
    pub selected_agent: Option<Agent>,
}

/// A partial context update supplied with a resolution request.
///
/// Merging is additive and per-key: a `Some` field overwrites that key, a
/// `None` field leaves the stored value alone. The stored context is never
/// reset wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextUpdate {
    /// Attribute the session to a user.
    pub user_id: Option<String>,
    /// Replace the world snapshot.
    pub world: Option<WorldState>,
    /// Replace the recent command list.
    pub recent_commands: Option<Vec<String>>,
    /// Replace the active challenge.
    pub active_challenge: Option<Challenge>,
    /// Replace the selected agent.
    pub selected_agent: Option<Agent>,
}

impl SessionContext {
    /// Merge an update into this context, key by key.
    pub fn merge(&mut self, update: ContextUpdate) {
        if let Some(world) = update.world {
            self.world = Some(world);
        }
        if let Some(recent) = update.recent_commands {
            self.recent_commands = recent;
        }
        if let Some(challenge) = update.active_challenge {
            self.active_challenge = Some(challenge);
        }
        if let Some(agent) = update.selected_agent {
            self.selected_agent = Some(agent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nx_core::{WorldSize, WorldState};

    #[test]
    fn merge_overwrites_only_supplied_keys() {
        let mut context = SessionContext {
            recent_commands: vec!["Status".into()],
            ..SessionContext::default()
        };

        context.merge(ContextUpdate {
            world: Some(WorldState::new(WorldSize::new(30, 30))),
            ..ContextUpdate::default()
        });

        assert!(context.world.is_some());
        // Untouched key survives the merge.
        assert_eq!(context.recent_commands, vec!["Status".to_string()]);
    }

    #[test]
    fn merge_is_cumulative_across_calls() {
        let mut context = SessionContext::default();
        context.merge(ContextUpdate {
            recent_commands: Some(vec!["Status".into()]),
            ..ContextUpdate::default()
        });
        context.merge(ContextUpdate {
            active_challenge: Some(Challenge {
                id: "ch1".into(),
                title: "First Steps".into(),
                description: "Deploy an agent".into(),
                objectives: Vec::new(),
            }),
            ..ContextUpdate::default()
        });

        assert_eq!(context.recent_commands.len(), 1);
        assert_eq!(context.active_challenge.as_ref().unwrap().id, "ch1");
    }
}
