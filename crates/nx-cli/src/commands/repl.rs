use std::io::{self, BufRead, Write};

use colored::Colorize;

use nx_command::{CommandCatalog, ExecutionResult, Executor};
use nx_core::WorldState;
use nx_resolve::{ContextUpdate, ModelClient, ModelConfig, Resolver};
use nx_worldgen::GenerationConfig;

pub fn run(seed: &str, biome: &str) -> Result<(), String> {
    let biome = super::parse_biome(biome)?;
    let config = GenerationConfig::default().with_seed(seed).with_biome(biome);
    let template = nx_worldgen::generate(&config);
    let mut state = WorldState::from_template(&template);

    let catalog = CommandCatalog::builtin();
    let mut executor = Executor::from_entropy();
    let mut resolver = Resolver::new(CommandCatalog::builtin());
    if let Some(model_config) = ModelConfig::from_env() {
        resolver = resolver
            .with_client(ModelClient::new(model_config).map_err(|e| format!("model client: {e}"))?);
    }
    let runtime = tokio::runtime::Runtime::new().map_err(|e| format!("runtime: {e}"))?;

    println!(
        "  {} '{}' {}",
        "Nexus".bold(),
        template.name,
        format!("({}, {} objects)", template.size, template.objects.len()).dimmed()
    );
    println!("  Type commands or plain English. \"help\" lists commands, \"quit\" exits.");
    println!();

    let mut session_id: Option<String> = None;
    let stdin = io::stdin();
    loop {
        print!("nexus> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            break;
        }

        // Structured command first; free text falls through to the resolver.
        let result = nx_command::validate_command(input, &catalog, &state);
        if result.is_valid() {
            for warning in result.warnings() {
                println!("  {} {}", "warning:".yellow().bold(), warning);
            }
            let intent = result.intent().expect("valid result carries intent");
            let report = executor.execute(intent, &state, &catalog);
            apply(&mut state, &report);
            print_report(&report);
            continue;
        }

        let resolution = runtime.block_on(resolver.resolve(
            input,
            session_id.as_deref(),
            Some(ContextUpdate {
                world: Some(state.clone()),
                ..ContextUpdate::default()
            }),
        ));

        match resolution {
            Some(resolution) => {
                session_id = Some(resolution.session_id.clone());
                if resolution.needs_clarification {
                    let prompt = resolution
                        .clarification_prompt
                        .unwrap_or_else(|| "Could you be more specific?".into());
                    println!("  {} {}", "clarify:".yellow().bold(), prompt);
                    continue;
                }
                println!(
                    "  {} {}",
                    ">".dimmed(),
                    resolution.command.cyan()
                );
                let resolved = nx_command::validate_command(&resolution.command, &catalog, &state);
                match resolved.intent() {
                    Some(intent) => {
                        let report = executor.execute(intent, &state, &catalog);
                        apply(&mut state, &report);
                        print_report(&report);
                    }
                    None => {
                        for error in resolved.errors() {
                            println!("  {} {}", "error:".red().bold(), error);
                        }
                    }
                }
            }
            None => {
                for error in result.errors() {
                    println!("  {} {}", "error:".red().bold(), error);
                }
                println!("  {}", "(no suggestion available)".dimmed());
            }
        }
    }

    Ok(())
}

fn apply(state: &mut WorldState, report: &ExecutionResult) {
    if !report.success {
        return;
    }
    state.stats.commands_executed += 1;
    state.stats.score += report.points;
    if let Some(changes) = &report.state_changes {
        state.stats.agents_deployed += changes.agents_added.len() as u64;
        state.agents.extend(changes.agents_added.iter().cloned());
    }
}

fn print_report(report: &ExecutionResult) {
    if report.success {
        println!("{}", report.output);
        if report.points > 0 {
            println!("{}", format!("+{} points", report.points).green());
        }
    } else {
        println!("  {} {}", "error:".red().bold(), report.output);
    }
    println!();
}
