//! System prompt construction for the model call.

use nx_command::CommandCatalog;
use nx_core::{Behavior, Compass};

use crate::context::SessionContext;

/// Build the system prompt: command catalog, shared token tables, the
/// session's world snapshot summary, recent commands, active challenge, and
/// selected agent, plus the reply-shape instruction.
pub fn build_system_prompt(catalog: &CommandCatalog, context: &SessionContext) -> String {
    let mut prompt = String::from(
        "You are a command parser for a grid-world agent terminal. \
         Convert natural language to game commands.\n\nAvailable commands:\n",
    );

    for spec in catalog.specs() {
        prompt.push_str(&format!("- {} ({})\n", spec.syntax, spec.description));
    }

    prompt.push_str(&format!(
        "\nBehaviors: {}\n",
        Behavior::valid_tokens()
    ));
    prompt.push_str(&format!(
        "Locations: {}, or coordinates like \"25 25\"\n",
        Compass::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    ));
    prompt.push_str(
        "Numbers should be extracted from text (e.g., \"three\" -> 3, \"a few\" -> 3, \
         \"several\" -> 5)\n",
    );

    let mut lines = Vec::new();
    if let Some(world) = &context.world {
        lines.push(format!("- World Size: {}", world.size));
        lines.push(format!("- Active Agents: {}", world.agents.len()));
        for type_name in ["wall", "obstacle", "datanode", "terminalnode", "portal"] {
            let count = world
                .objects
                .iter()
                .filter(|o| o.kind.name() == type_name)
                .count();
            if count > 0 {
                lines.push(format!("- Objects ({type_name}): {count}"));
            }
        }
        lines.push(format!(
            "- Player: score {}, level {}",
            world.stats.score, world.stats.level
        ));
    }
    if !context.recent_commands.is_empty() {
        let recent: Vec<&str> = context
            .recent_commands
            .iter()
            .rev()
            .take(5)
            .rev()
            .map(String::as_str)
            .collect();
        lines.push(format!("- Recent Commands: {}", recent.join(", ")));
    }
    if let Some(challenge) = &context.active_challenge {
        lines.push(format!("- Active Challenge: {}", challenge.title));
        for objective in &challenge.objectives {
            lines.push(format!(
                "  - [{}] {} ({}/{})",
                if objective.completed { "x" } else { " " },
                objective.description,
                objective.progress,
                objective.max_progress
            ));
        }
    }
    if let Some(agent) = &context.selected_agent {
        lines.push(format!(
            "- Selected Agent: {} at {} ({}, health {}, energy {})",
            agent.name, agent.position, agent.behavior, agent.health, agent.energy
        ));
    }
    if !lines.is_empty() {
        prompt.push_str("\nCurrent Context:\n");
        prompt.push_str(&lines.join("\n"));
        prompt.push('\n');
    }

    prompt.push_str(
        "\nIf the command is ambiguous or needs clarification, set \
         \"needsClarification\": true and provide a \"clarificationPrompt\".\n\n\
         Respond with JSON: {\"command\": \"exact_command\", \"confidence\": 0.0-1.0, \
         \"explanation\": \"brief_explanation\", \"needsClarification\": false, \
         \"clarificationPrompt\": null}",
    );

    prompt
}
