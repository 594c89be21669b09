use colored::Colorize;

use nx_command::CommandCatalog;

pub fn run(command: &str) -> Result<(), String> {
    let catalog = CommandCatalog::builtin();
    let state = super::demo_state();
    let result = super::check_command(command, &catalog, &state);

    let errors = result.errors().len();
    let warnings = result.warnings().len();

    if result.is_valid() {
        println!("{} {}", "valid".green().bold(), command);
        if warnings > 0 {
            println!(
                "  {} warning{}",
                warnings,
                if warnings == 1 { "" } else { "s" }
            );
        }
        Ok(())
    } else {
        Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ))
    }
}
