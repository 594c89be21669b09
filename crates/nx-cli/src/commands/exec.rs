use colored::Colorize;

use nx_command::{CommandCatalog, Executor};

pub fn run(command: &str) -> Result<(), String> {
    let catalog = CommandCatalog::builtin();
    let state = super::demo_state();
    let result = super::check_command(command, &catalog, &state);

    let Some(intent) = result.intent() else {
        return Err("command failed validation".into());
    };

    let mut executor = Executor::from_entropy();
    let report = executor.execute(intent, &state, &catalog);

    if report.success {
        println!("{}", report.output);
        if report.points > 0 {
            println!("{}", format!("+{} points", report.points).green());
        }
        if let Some(changes) = &report.state_changes
            && !changes.agents_added.is_empty()
        {
            println!(
                "{}",
                format!("{} agent(s) added to the world", changes.agents_added.len()).dimmed()
            );
        }
        Ok(())
    } else {
        Err(report.output)
    }
}
