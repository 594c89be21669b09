//! Semantic validation: numeric ranges, world bounds, enum membership, and
//! capacity checks over a parsed intent.
//!
//! Validation is pure and idempotent - the same input and state always yield
//! the same result - and it never fails: malformed or out-of-range input
//! produces error diagnostics, advisory conditions produce warnings, and
//! warnings never block execution.

use std::ops::Range;

use nx_core::{AGENT_CAP, Behavior, Compass, WorldState};

use crate::catalog::CommandCatalog;
use crate::diagnostics::{Diagnostic, Severity};
use crate::intent::{ArgValue, ParsedIntent};
use crate::parser::{self, ParseOutput};

/// The outcome of validating one command string.
///
/// Immutable once created. `is_valid()` holds exactly when there are no
/// error-severity diagnostics, and only then is the parsed intent exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
    intent: Option<ParsedIntent>,
}

impl ValidationResult {
    fn new(diagnostics: Vec<Diagnostic>, intent: Option<ParsedIntent>) -> Self {
        let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
        Self {
            diagnostics,
            intent: if has_errors { None } else { intent },
        }
    }

    /// Whether the command may be executed.
    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Error messages, in detection order.
    pub fn errors(&self) -> Vec<&str> {
        self.messages(Severity::Error)
    }

    /// Warning messages, in detection order.
    pub fn warnings(&self) -> Vec<&str> {
        self.messages(Severity::Warning)
    }

    /// All diagnostics with spans, for rendering.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The parsed intent, present only when valid.
    pub fn intent(&self) -> Option<&ParsedIntent> {
        self.intent.as_ref()
    }

    fn messages(&self, severity: Severity) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    }
}

/// Validate a raw command line: syntax extraction, then semantic checks.
pub fn validate(input: &str, catalog: &CommandCatalog, state: &WorldState) -> ValidationResult {
    let ParseOutput {
        intent,
        spans,
        mut diagnostics,
    } = parser::parse(input, catalog);

    let Some(intent) = intent else {
        return ValidationResult::new(diagnostics, None);
    };

    let whole = 0..input.len();
    let span_of = |name: &str| spans.get(name).cloned().unwrap_or_else(|| whole.clone());

    match intent.command_name.to_ascii_lowercase().as_str() {
        "deployagent" => check_deploy(&intent, state, span_of, &mut diagnostics),
        "scanarea" => check_scan(&intent, state, span_of, &mut diagnostics),
        _ => {}
    }

    ValidationResult::new(diagnostics, Some(intent))
}

fn check_deploy(
    intent: &ParsedIntent,
    state: &WorldState,
    span_of: impl Fn(&str) -> Range<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let count = intent.arg("count").and_then(ArgValue::as_int).unwrap_or(1);
    if count <= 0 {
        diagnostics.push(Diagnostic::error(
            span_of("count"),
            "Agent count must be greater than 0",
        ));
    }
    if count > 10 {
        diagnostics.push(Diagnostic::warning(
            span_of("count"),
            "Deploying more than 10 agents may impact performance",
        ));
    }
    if count > 0 && state.agents.len() as i64 + count > AGENT_CAP as i64 {
        diagnostics.push(Diagnostic::warning(
            span_of("count"),
            format!("Approaching maximum agent limit ({AGENT_CAP})"),
        ));
    }

    match intent.arg("location") {
        Some(ArgValue::Word(word)) => {
            if Compass::parse(word).is_none() {
                diagnostics.push(Diagnostic::error(
                    span_of("location"),
                    format!(
                        "Invalid location: {word}. Use named locations or coordinates (x y)"
                    ),
                ));
            }
        }
        Some(ArgValue::Coord(p)) => {
            check_bounds(p.x, p.y, state, &span_of("location"), diagnostics);
        }
        _ => {}
    }

    if let Some(word) = intent.arg("behavior").and_then(|v| v.as_word())
        && Behavior::parse(word).is_none()
    {
        diagnostics.push(Diagnostic::error(
            span_of("behavior"),
            format!(
                "Invalid behavior: {word}. Valid behaviors: {}",
                Behavior::valid_tokens()
            ),
        ));
    }
}

fn check_scan(
    intent: &ParsedIntent,
    state: &WorldState,
    span_of: impl Fn(&str) -> Range<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let x = intent.arg("x").and_then(ArgValue::as_int).unwrap_or(0);
    let y = intent.arg("y").and_then(ArgValue::as_int).unwrap_or(0);

    if x < 0 || x >= i64::from(state.size.width) {
        diagnostics.push(Diagnostic::error(
            span_of("x"),
            format!(
                "X coordinate {x} is out of bounds (0-{})",
                state.size.width - 1
            ),
        ));
    }
    if y < 0 || y >= i64::from(state.size.height) {
        diagnostics.push(Diagnostic::error(
            span_of("y"),
            format!(
                "Y coordinate {y} is out of bounds (0-{})",
                state.size.height - 1
            ),
        ));
    }

    if let Some(radius) = intent.arg("radius").and_then(ArgValue::as_int)
        && radius > 20
    {
        diagnostics.push(Diagnostic::warning(
            span_of("radius"),
            "Large scan radius may be slow",
        ));
    }
}

fn check_bounds(
    x: i32,
    y: i32,
    state: &WorldState,
    span: &Range<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if x < 0 || x as u32 >= state.size.width {
        diagnostics.push(Diagnostic::error(
            span.clone(),
            format!(
                "X coordinate {x} is out of bounds (0-{})",
                state.size.width - 1
            ),
        ));
    }
    if y < 0 || y as u32 >= state.size.height {
        diagnostics.push(Diagnostic::error(
            span.clone(),
            format!(
                "Y coordinate {y} is out of bounds (0-{})",
                state.size.height - 1
            ),
        ));
    }
}
