pub mod event;
pub mod exec;
pub mod generate;
pub mod repl;
pub mod resolve;
pub mod validate;

use nx_command::{CommandCatalog, ValidationResult, render_diagnostics};
use nx_core::{WorldSize, WorldState};

/// The world commands are checked and executed against when no live world
/// exists: an empty 50x50 grid.
pub fn demo_state() -> WorldState {
    WorldState::new(WorldSize::new(50, 50))
}

/// Validate and print diagnostics to stderr. Returns the result for the
/// caller to act on.
pub fn check_command(input: &str, catalog: &CommandCatalog, state: &WorldState) -> ValidationResult {
    let result = nx_command::validate_command(input, catalog, state);
    if !result.diagnostics().is_empty() {
        let rendered = render_diagnostics(input, "<input>", result.diagnostics());
        eprint!("{rendered}");
    }
    result
}

/// Parse a biome name into the enum, with a CLI-friendly error.
pub fn parse_biome(name: &str) -> Result<nx_worldgen::Biome, String> {
    nx_worldgen::Biome::parse(name).ok_or_else(|| {
        format!(
            "unknown biome '{name}' (expected one of: matrix, corrupted, pristine, chaotic)"
        )
    })
}
