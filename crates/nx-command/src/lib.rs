//! Command catalog, grammar, validator, and execution engine.
//!
//! The pipeline mirrors how a compiler front-end treats source text: lex the
//! raw command line, parse it against the registered catalog into a
//! [`ParsedIntent`], then run semantic checks against the current
//! [`WorldState`](nx_core::WorldState). The result is always a
//! [`ValidationResult`] - malformed input produces diagnostics, never errors
//! or panics. A valid result carries the intent, which the [`Executor`] turns
//! into an output report plus a state diff.

pub mod catalog;
pub mod diagnostics;
pub mod execute;
pub mod intent;
pub mod lexer;
pub mod parser;
pub mod validate;

pub use catalog::{Category, CommandCatalog, CommandSpec, ParamKind, ParameterSpec};
pub use diagnostics::{Diagnostic, Severity, render_diagnostics};
pub use execute::{ExecutionResult, Executor, StateChanges};
pub use intent::{ArgValue, ParsedIntent};
pub use validate::ValidationResult;

use nx_core::WorldState;

/// Validate a raw command string against a catalog and the current world.
///
/// Syntax extraction and semantic checks both contribute diagnostics; the
/// returned result carries a [`ParsedIntent`] only when no errors were found.
pub fn validate_command(
    input: &str,
    catalog: &CommandCatalog,
    state: &WorldState,
) -> ValidationResult {
    validate::validate(input, catalog, state)
}
