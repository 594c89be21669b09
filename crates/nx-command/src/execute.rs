//! The command execution engine.
//!
//! Takes a validated [`ParsedIntent`] plus a [`WorldState`] snapshot and
//! produces an [`ExecutionResult`]: output text, a score delta, and a state
//! diff the caller applies. Execution is a total function over any structured
//! intent - unknown commands produce a failed result, never a panic.

use chrono::Utc;
use rand::Rng;

use nx_core::{
    Agent, AgentStatus, Behavior, Compass, Point, SeededRandom, WorldState,
};

use crate::catalog::CommandCatalog;
use crate::intent::{ArgValue, ParsedIntent};

/// A diff against the world state, produced by execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateChanges {
    /// Newly deployed agents to append.
    pub agents_added: Vec<Agent>,
    /// Whether the terminal display should be cleared.
    pub cleared_terminal: bool,
}

impl StateChanges {
    /// Whether the diff changes anything.
    pub fn is_empty(&self) -> bool {
        self.agents_added.is_empty() && !self.cleared_terminal
    }
}

/// The report produced by executing one intent.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Whether the command succeeded.
    pub success: bool,
    /// Terminal-facing output text.
    pub output: String,
    /// Score delta earned by the command.
    pub points: i64,
    /// State diff, if the command changed anything.
    pub state_changes: Option<StateChanges>,
}

impl ExecutionResult {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            points: 0,
            state_changes: None,
        }
    }

    fn fail(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            points: 0,
            state_changes: None,
        }
    }
}

/// Executes intents against world state snapshots.
///
/// Owns its randomness so agent-placement jitter is reproducible under a
/// fixed seed in tests, and entropy-seeded in live use.
#[derive(Debug, Clone)]
pub struct Executor {
    rng: SeededRandom,
}

/// Jitter retry budget for agent placement.
const PLACEMENT_ATTEMPTS: u32 = 10;

impl Executor {
    /// An executor with reproducible placement jitter.
    pub fn new(seed: &str) -> Self {
        Self {
            rng: SeededRandom::new(seed),
        }
    }

    /// An executor seeded from entropy.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(&seed.to_string())
    }

    /// Execute an intent against a state snapshot.
    ///
    /// The snapshot is never mutated; changes come back in the result.
    pub fn execute(
        &mut self,
        intent: &ParsedIntent,
        state: &WorldState,
        catalog: &CommandCatalog,
    ) -> ExecutionResult {
        match intent.command_name.to_ascii_lowercase().as_str() {
            "deployagent" => self.deploy_agents(intent, state),
            "scanarea" => scan_area(intent, state),
            "listagents" => list_agents(state),
            "status" => status(state),
            "clearterminal" => ExecutionResult {
                success: true,
                output: "Terminal cleared.".into(),
                points: 0,
                state_changes: Some(StateChanges {
                    agents_added: Vec::new(),
                    cleared_terminal: true,
                }),
            },
            "help" => help(catalog),
            "tutorial" => ExecutionResult::ok(TUTORIAL_TEXT.trim()),
            other => ExecutionResult::fail(format!(
                "Unknown command: {other}. Type \"help\" for available commands."
            )),
        }
    }

    fn deploy_agents(&mut self, intent: &ParsedIntent, state: &WorldState) -> ExecutionResult {
        let count = intent.arg("count").and_then(ArgValue::as_int).unwrap_or(1);
        if count <= 0 {
            return ExecutionResult::fail("Agent count must be greater than 0");
        }

        let (base, location_label) = match intent.arg("location") {
            Some(ArgValue::Word(word)) => match Compass::parse(word) {
                Some(compass) => (compass.resolve(state.size), compass.name().to_string()),
                None => {
                    return ExecutionResult::fail(format!(
                        "Invalid location: {word}. Use named locations or coordinates (x y)"
                    ));
                }
            },
            Some(ArgValue::Coord(p)) => (state.size.clamp(*p), p.to_string()),
            _ => (state.size.center(), "center".to_string()),
        };

        let behavior = intent
            .arg("behavior")
            .and_then(|v| v.as_word())
            .and_then(Behavior::parse)
            .unwrap_or(Behavior::Patrol);

        let now = Utc::now();
        let mut agents = Vec::with_capacity(count as usize);
        for i in 0..count {
            let n = state.agents.len() + i as usize;
            agents.push(Agent {
                id: format!("agent_{n}"),
                name: format!("Agent-{n}"),
                position: self.place_agent(base, state),
                status: AgentStatus::Active,
                behavior,
                health: 100,
                energy: 100,
                last_action: "deployed".into(),
                created_at: now,
            });
        }

        ExecutionResult {
            success: true,
            output: format!(
                "Successfully deployed {count} agent(s) with {behavior} behavior at {location_label}."
            ),
            points: count * 10,
            state_changes: Some(StateChanges {
                agents_added: agents,
                cleared_terminal: false,
            }),
        }
    }

    /// Pick a placement cell near `base`: jitter, retry with a wider spread
    /// while the cell is blocked, clamp to bounds. Best-effort - the budget
    /// may run out on a crowded map, but the requested cell itself is never
    /// returned while blocked.
    fn place_agent(&mut self, base: Point, state: &WorldState) -> Point {
        let mut candidate = state.size.clamp(base);
        for attempt in 0..PLACEMENT_ATTEMPTS {
            let spread = 2 + attempt as i32;
            let jittered = Point::new(
                base.x + self.rng.next_int(-spread, spread),
                base.y + self.rng.next_int(-spread, spread),
            );
            candidate = state.size.clamp(jittered);
            if !state.blocked_at(candidate) {
                return candidate;
            }
        }
        if candidate == state.size.clamp(base) {
            candidate = step_off(candidate, state);
        }
        candidate
    }
}

/// Move one cell away from `from`, staying in bounds. Used as the last
/// resort when every jitter attempt landed back on the blocked target cell.
fn step_off(from: Point, state: &WorldState) -> Point {
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        let neighbor = state.size.clamp(Point::new(from.x + dx, from.y + dy));
        if neighbor != from {
            return neighbor;
        }
    }
    from
}

fn scan_area(intent: &ParsedIntent, state: &WorldState) -> ExecutionResult {
    let x = intent.arg("x").and_then(ArgValue::as_int).unwrap_or(0) as i32;
    let y = intent.arg("y").and_then(ArgValue::as_int).unwrap_or(0) as i32;
    let radius = intent.arg("radius").and_then(ArgValue::as_int).unwrap_or(5) as f64;
    let origin = Point::new(x, y);

    let nearby_agents: Vec<&Agent> = state
        .agents
        .iter()
        .filter(|a| a.position.distance(origin) <= radius)
        .collect();
    let nearby_objects: Vec<_> = state
        .objects
        .iter()
        .filter(|o| o.position.distance(origin) <= radius)
        .collect();

    let mut output = format!("Scan complete. Area: {origin} Radius: {radius}\n");
    output.push_str(&format!("Agents found: {}\n", nearby_agents.len()));
    for agent in &nearby_agents {
        output.push_str(&format!(
            "  {}: {} at {}\n",
            agent.id, agent.name, agent.position
        ));
    }
    output.push_str(&format!("Objects found: {}", nearby_objects.len()));
    for object in &nearby_objects {
        output.push_str(&format!(
            "\n  {}: {} at {}",
            object.id,
            object.kind.name(),
            object.position
        ));
    }

    ExecutionResult {
        success: true,
        output,
        points: 5,
        state_changes: None,
    }
}

fn list_agents(state: &WorldState) -> ExecutionResult {
    if state.agents.is_empty() {
        return ExecutionResult::ok("No agents currently deployed.");
    }
    let roster: Vec<String> = state
        .agents
        .iter()
        .map(|a| format!("  {}: {} [{}] at {}", a.id, a.name, a.status, a.position))
        .collect();
    ExecutionResult::ok(format!("Active Agents:\n{}", roster.join("\n")))
}

fn status(state: &WorldState) -> ExecutionResult {
    ExecutionResult::ok(format!(
        "SYSTEM STATUS:\n  Active Agents: {}\n  Commands Executed: {}\n  Current Score: {}\n  Player Level: {}\n  World Size: {}",
        state.agents.len(),
        state.stats.commands_executed,
        state.stats.score,
        state.stats.level,
        state.size,
    ))
}

fn help(catalog: &CommandCatalog) -> ExecutionResult {
    let mut output = String::from("Available Commands:\n");
    for spec in catalog.specs() {
        output.push_str(&format!("  {} - {}\n", spec.syntax, spec.description));
    }
    ExecutionResult::ok(output.trim_end().to_string())
}

const TUTORIAL_TEXT: &str = "
NEXUS TUTORIAL:

1. Deploy your first agent:
   > DeployAgent[1] center patrol

2. Scan the area around your agent:
   > ScanArea 25 25 10

3. Check agent status:
   > ListAgents

4. Check the system status:
   > Status

Type any command to continue exploring!
";

#[cfg(test)]
mod tests {
    use super::*;
    use nx_core::{ObjectKind, WorldObject, WorldSize};

    fn world() -> WorldState {
        WorldState::new(WorldSize::new(50, 50))
    }

    fn catalog() -> CommandCatalog {
        CommandCatalog::builtin()
    }

    fn deploy_intent(count: i64, location: ArgValue, behavior: &str) -> ParsedIntent {
        ParsedIntent::new("DeployAgent")
            .with_arg("count", ArgValue::Int(count))
            .with_arg("location", location)
            .with_arg("behavior", ArgValue::Word(behavior.into()))
    }

    #[test]
    fn deploy_creates_agents_and_awards_points() {
        let mut exec = Executor::new("test-seed");
        let intent = deploy_intent(3, ArgValue::Word("north".into()), "scout");
        let result = exec.execute(&intent, &world(), &catalog());

        assert!(result.success);
        assert_eq!(result.points, 30);
        assert!(result.output.contains("3 agent(s)"));
        assert!(result.output.contains("scout"));

        let changes = result.state_changes.unwrap();
        assert_eq!(changes.agents_added.len(), 3);
        for agent in &changes.agents_added {
            assert_eq!(agent.behavior, Behavior::Scout);
            assert_eq!(agent.health, 100);
        }
    }

    #[test]
    fn deployed_agents_stay_in_bounds() {
        let mut exec = Executor::new("bounds-seed");
        // Corner placement forces the jitter to clamp.
        let intent = deploy_intent(10, ArgValue::Coord(Point::new(0, 0)), "patrol");
        let state = world();
        let result = exec.execute(&intent, &state, &catalog());
        for agent in &result.state_changes.unwrap().agents_added {
            assert!(state.size.contains(agent.position), "escaped: {}", agent.position);
        }
    }

    #[test]
    fn deploy_avoids_blocked_target_cell() {
        let mut state = world();
        let target = Point::new(10, 10);
        state.objects.push(WorldObject::new(
            "obstacle_0",
            ObjectKind::Obstacle {
                destructible: false,
                health: 3,
            },
            target,
        ));

        // Many deployments aimed exactly at the blocked cell; none may land on it.
        let mut exec = Executor::new("avoid-seed");
        let intent = deploy_intent(20, ArgValue::Coord(target), "guard");
        let result = exec.execute(&intent, &state, &catalog());
        for agent in &result.state_changes.unwrap().agents_added {
            assert_ne!(agent.position, target);
        }
    }

    #[test]
    fn deploy_agent_ids_continue_numbering() {
        let mut state = world();
        let mut exec = Executor::new("numbering");
        let first = exec.execute(
            &deploy_intent(2, ArgValue::Word("center".into()), "patrol"),
            &state,
            &catalog(),
        );
        state
            .agents
            .extend(first.state_changes.unwrap().agents_added);

        let second = exec.execute(
            &deploy_intent(1, ArgValue::Word("center".into()), "patrol"),
            &state,
            &catalog(),
        );
        let added = second.state_changes.unwrap().agents_added;
        assert_eq!(added[0].id, "agent_2");
    }

    #[test]
    fn scan_reports_agents_within_radius() {
        let mut state = world();
        let mut exec = Executor::new("scan");
        let deployed = exec.execute(
            &deploy_intent(1, ArgValue::Coord(Point::new(25, 25)), "patrol"),
            &state,
            &catalog(),
        );
        state
            .agents
            .extend(deployed.state_changes.unwrap().agents_added);

        let intent = ParsedIntent::new("ScanArea")
            .with_arg("x", ArgValue::Int(25))
            .with_arg("y", ArgValue::Int(25))
            .with_arg("radius", ArgValue::Int(10));
        let result = exec.execute(&intent, &state, &catalog());
        assert!(result.success);
        assert_eq!(result.points, 5);
        assert!(result.output.contains("Agents found: 1"));
    }

    #[test]
    fn scan_excludes_distant_objects() {
        let mut state = world();
        state.objects.push(WorldObject::new(
            "datanode_0",
            ObjectKind::DataNode {
                value: 100,
                encrypted: false,
            },
            Point::new(45, 45),
        ));

        let intent = ParsedIntent::new("ScanArea")
            .with_arg("x", ArgValue::Int(5))
            .with_arg("y", ArgValue::Int(5))
            .with_arg("radius", ArgValue::Int(5));
        let result = Executor::new("scan2").execute(&intent, &state, &catalog());
        assert!(result.output.contains("Agents found: 0"));
        assert!(result.output.contains("Objects found: 0"));
    }

    #[test]
    fn list_agents_empty_world() {
        let result = Executor::new("list").execute(
            &ParsedIntent::new("ListAgents"),
            &world(),
            &catalog(),
        );
        assert!(result.success);
        assert_eq!(result.output, "No agents currently deployed.");
    }

    #[test]
    fn status_reports_world_size_and_stats() {
        let result =
            Executor::new("status").execute(&ParsedIntent::new("Status"), &world(), &catalog());
        assert!(result.success);
        assert!(result.output.contains("World Size: 50x50"));
        assert!(result.output.contains("Player Level: 1"));
    }

    #[test]
    fn clear_terminal_sets_flag() {
        let result = Executor::new("clear").execute(
            &ParsedIntent::new("ClearTerminal"),
            &world(),
            &catalog(),
        );
        assert!(result.state_changes.unwrap().cleared_terminal);
    }

    #[test]
    fn help_lists_catalog_syntax() {
        let result =
            Executor::new("help").execute(&ParsedIntent::new("Help"), &world(), &catalog());
        assert!(result.output.contains("DeployAgent[count] location behavior"));
        assert!(result.output.contains("ScanArea x y radius"));
    }

    #[test]
    fn unknown_intent_fails_without_panicking() {
        let result = Executor::new("unknown").execute(
            &ParsedIntent::new("Hackmainframe"),
            &world(),
            &catalog(),
        );
        assert!(!result.success);
        assert!(result.output.contains("Unknown command: hackmainframe"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// Execution is total: any command name, with or without
            /// arguments, produces a result rather than a panic.
            #[test]
            fn executor_is_total_over_arbitrary_intents(
                name in "[A-Za-z][A-Za-z0-9]{0,16}",
                count in proptest::option::of(-5i64..30),
            ) {
                let mut intent = ParsedIntent::new(name);
                if let Some(count) = count {
                    intent = intent.with_arg("count", ArgValue::Int(count));
                }
                let result = Executor::new("total").execute(&intent, &world(), &catalog());
                prop_assert!(!result.output.is_empty());
            }
        }
    }

    #[test]
    fn execution_with_fixed_seed_is_reproducible() {
        let intent = deploy_intent(5, ArgValue::Word("east".into()), "gather");
        let a = Executor::new("repro").execute(&intent, &world(), &catalog());
        let b = Executor::new("repro").execute(&intent, &world(), &catalog());
        let positions_a: Vec<_> = a
            .state_changes
            .unwrap()
            .agents_added
            .iter()
            .map(|x| x.position)
            .collect();
        let positions_b: Vec<_> = b
            .state_changes
            .unwrap()
            .agents_added
            .iter()
            .map(|x| x.position)
            .collect();
        assert_eq!(positions_a, positions_b);
    }
}
