//! Syntactic extraction: command line → [`ParsedIntent`] + diagnostics.
//!
//! Each built-in command has a dedicated micro-grammar over the token stream;
//! commands registered at runtime flow through a generic extraction driven by
//! their declared [`ParameterSpec`](crate::catalog::ParameterSpec) list.
//! Extraction is purely structural - enum membership, numeric ranges, and
//! world bounds are semantic checks and live in [`validate`](crate::validate).

use std::collections::BTreeMap;
use std::ops::Range;

use nx_core::Point;

use crate::catalog::{CommandCatalog, CommandSpec, ParamKind};
use crate::diagnostics::Diagnostic;
use crate::intent::{ArgValue, ParsedIntent};
use crate::lexer::{self, Token};

/// Result of syntactic extraction.
///
/// `spans` maps argument names to the byte range they were extracted from,
/// so semantic diagnostics can point at the offending argument.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// The extracted intent, present unless extraction failed outright.
    pub intent: Option<ParsedIntent>,
    /// Source span per extracted argument.
    pub spans: BTreeMap<String, Range<usize>>,
    /// Syntax diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            intent: None,
            spans: BTreeMap::new(),
            diagnostics,
        }
    }
}

/// Parse a raw command line against the catalog.
pub fn parse(input: &str, catalog: &CommandCatalog) -> ParseOutput {
    if input.trim().is_empty() {
        return ParseOutput::failed(vec![Diagnostic::error(0..0, "Command cannot be empty")]);
    }

    let (tokens, lex_errors) = lexer::lex(input);
    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(|e| Diagnostic::error(e.span, e.message))
        .collect();

    let Some((first, name_span)) = tokens.first() else {
        // Nothing but unlexable characters; the lex errors already explain.
        return ParseOutput::failed(diagnostics);
    };

    let Token::Word(name) = first else {
        diagnostics.push(Diagnostic::error(
            name_span.clone(),
            "Command must start with a command name",
        ));
        return ParseOutput::failed(diagnostics);
    };

    let Some(spec) = catalog.find(name) else {
        diagnostics.push(Diagnostic::error(
            name_span.clone(),
            format!("Unknown command: {}", name.to_ascii_lowercase()),
        ));
        return ParseOutput::failed(diagnostics);
    };

    let rest = &tokens[1..];
    let end = input.len();

    let mut output = match spec.name.to_ascii_lowercase().as_str() {
        "deployagent" => parse_deploy(rest, end),
        "scanarea" => parse_scan(rest, end),
        _ if spec.parameters.is_empty() => parse_no_args(rest, spec),
        _ => parse_generic(rest, spec, end),
    };

    if let Some(intent) = &mut output.intent {
        intent.command_name = spec.name.clone();
        fill_defaults(intent, spec);
    }
    output.diagnostics.splice(0..0, diagnostics);
    output
}

/// `DeployAgent[count] location behavior` - bracketed required count, then an
/// optional location (named token or `x y` pair), then an optional behavior.
fn parse_deploy(rest: &[(Token, Range<usize>)], end: usize) -> ParseOutput {
    let syntax_error = |span: Range<usize>| {
        ParseOutput::failed(vec![Diagnostic::error(
            span,
            "Invalid DeployAgent syntax. Use: DeployAgent[count] location behavior",
        )])
    };

    let count = match rest {
        [(Token::LBracket, _), (Token::Integer(n), span), (Token::RBracket, _), ..] => {
            (*n, span.clone())
        }
        [(_, span), ..] => return syntax_error(span.start..end),
        [] => return syntax_error(end..end),
    };

    let mut intent = ParsedIntent::new("DeployAgent").with_arg("count", ArgValue::Int(count.0));
    let mut spans = BTreeMap::from([("count".to_string(), count.1)]);
    let mut diagnostics = Vec::new();
    let mut idx = 3;

    // Optional location: a bare word, or two integers forming a coordinate.
    match &rest[idx..] {
        [(Token::Word(w), span), ..] => {
            intent = intent.with_arg("location", ArgValue::Word(w.clone()));
            spans.insert("location".into(), span.clone());
            idx += 1;
        }
        [(Token::Integer(x), x_span), (Token::Integer(y), y_span), ..] => {
            intent = intent.with_arg(
                "location",
                ArgValue::Coord(Point::new(*x as i32, *y as i32)),
            );
            spans.insert("location".into(), x_span.start..y_span.end);
            idx += 2;
        }
        _ => {}
    }

    // Optional behavior.
    if let Some((Token::Word(w), span)) = rest.get(idx) {
        intent = intent.with_arg("behavior", ArgValue::Word(w.clone()));
        spans.insert("behavior".into(), span.clone());
        idx += 1;
    }

    if let Some((_, span)) = rest.get(idx) {
        diagnostics.push(Diagnostic::warning(
            span.start..end,
            "ignoring unexpected arguments",
        ));
    }

    ParseOutput {
        intent: Some(intent),
        spans,
        diagnostics,
    }
}

/// `ScanArea x y radius` - two required integers, optional radius.
fn parse_scan(rest: &[(Token, Range<usize>)], end: usize) -> ParseOutput {
    let syntax_error = |span: Range<usize>| {
        ParseOutput::failed(vec![Diagnostic::error(
            span,
            "Invalid ScanArea syntax. Use: ScanArea x y radius",
        )])
    };

    let ((x, x_span), (y, y_span)) = match rest {
        [(Token::Integer(x), xs), (Token::Integer(y), ys), ..] => {
            ((*x, xs.clone()), (*y, ys.clone()))
        }
        [(_, span), ..] => return syntax_error(span.start..end),
        [] => return syntax_error(end..end),
    };

    let mut intent = ParsedIntent::new("ScanArea")
        .with_arg("x", ArgValue::Int(x))
        .with_arg("y", ArgValue::Int(y));
    let mut spans = BTreeMap::from([("x".to_string(), x_span), ("y".to_string(), y_span)]);
    let mut diagnostics = Vec::new();
    let mut idx = 2;

    if let Some((Token::Integer(r), span)) = rest.get(idx) {
        intent = intent.with_arg("radius", ArgValue::Int(*r));
        spans.insert("radius".into(), span.clone());
        idx += 1;
    }

    if let Some((_, span)) = rest.get(idx) {
        diagnostics.push(Diagnostic::warning(
            span.start..end,
            "ignoring unexpected arguments",
        ));
    }

    ParseOutput {
        intent: Some(intent),
        spans,
        diagnostics,
    }
}

/// Commands declaring no parameters: anything after the name is surplus.
fn parse_no_args(rest: &[(Token, Range<usize>)], spec: &CommandSpec) -> ParseOutput {
    let mut diagnostics = Vec::new();
    if let (Some((_, first)), Some((_, last))) = (rest.first(), rest.last()) {
        diagnostics.push(Diagnostic::warning(
            first.start..last.end,
            format!("{} takes no arguments; ignoring extras", spec.name),
        ));
    }
    ParseOutput {
        intent: Some(ParsedIntent::new(spec.name.clone())),
        spans: BTreeMap::new(),
        diagnostics,
    }
}

/// Generic extraction for runtime-registered commands, driven by their
/// declared parameters: required ones appear bracketed in declaration order,
/// optional ones follow positionally.
fn parse_generic(rest: &[(Token, Range<usize>)], spec: &CommandSpec, end: usize) -> ParseOutput {
    let mut intent = ParsedIntent::new(spec.name.clone());
    let mut spans = BTreeMap::new();
    let mut diagnostics = Vec::new();
    let mut idx = 0;

    for param in &spec.parameters {
        if param.required {
            match (rest.get(idx), rest.get(idx + 1), rest.get(idx + 2)) {
                (
                    Some((Token::LBracket, _)),
                    Some((value, value_span)),
                    Some((Token::RBracket, _)),
                ) => match coerce(value, param.kind) {
                    Some(arg) => {
                        intent = intent.with_arg(&param.name, arg);
                        spans.insert(param.name.clone(), value_span.clone());
                        idx += 3;
                    }
                    None => {
                        diagnostics.push(Diagnostic::error(
                            value_span.clone(),
                            format!("parameter {} expects a {}", param.name, kind_name(param.kind)),
                        ));
                        return ParseOutput::failed(diagnostics);
                    }
                },
                _ => {
                    let span = rest.get(idx).map_or(end..end, |(_, s)| s.start..end);
                    diagnostics.push(Diagnostic::error(
                        span,
                        format!(
                            "Invalid {} syntax. Use: {} (missing required parameter: {})",
                            spec.name, spec.syntax, param.name
                        ),
                    ));
                    return ParseOutput::failed(diagnostics);
                }
            }
        } else if param.kind == ParamKind::Array {
            // Array parameters consume every remaining token.
            let items: Vec<ArgValue> = rest[idx..]
                .iter()
                .map(|(t, _)| match t {
                    Token::Integer(n) => ArgValue::Int(*n),
                    other => ArgValue::Word(other.to_string()),
                })
                .collect();
            if !items.is_empty() {
                let span = rest[idx].1.start..rest.last().map_or(end, |(_, s)| s.end);
                spans.insert(param.name.clone(), span);
                intent = intent.with_arg(&param.name, ArgValue::List(items));
                idx = rest.len();
            }
        } else if let Some((value, value_span)) = rest.get(idx) {
            match coerce(value, param.kind) {
                Some(arg) => {
                    intent = intent.with_arg(&param.name, arg);
                    spans.insert(param.name.clone(), value_span.clone());
                    idx += 1;
                }
                None => {
                    diagnostics.push(Diagnostic::error(
                        value_span.clone(),
                        format!("parameter {} expects a {}", param.name, kind_name(param.kind)),
                    ));
                    return ParseOutput::failed(diagnostics);
                }
            }
        }
    }

    if let Some((_, span)) = rest.get(idx) {
        diagnostics.push(Diagnostic::warning(
            span.start..end,
            "ignoring unexpected arguments",
        ));
    }

    ParseOutput {
        intent: Some(intent),
        spans,
        diagnostics,
    }
}

/// Coerce a token to a parameter kind. `None` on mismatch.
fn coerce(token: &Token, kind: ParamKind) -> Option<ArgValue> {
    match (kind, token) {
        (ParamKind::Number, Token::Integer(n)) => Some(ArgValue::Int(*n)),
        (ParamKind::String, Token::Word(w)) => Some(ArgValue::Word(w.clone())),
        (ParamKind::Boolean, Token::Word(w)) => match w.to_ascii_lowercase().as_str() {
            "true" => Some(ArgValue::Bool(true)),
            "false" => Some(ArgValue::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn kind_name(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::String => "word",
        ParamKind::Number => "number",
        ParamKind::Boolean => "boolean",
        ParamKind::Array => "list",
    }
}

/// Fill omitted optional parameters from their declared defaults.
fn fill_defaults(intent: &mut ParsedIntent, spec: &CommandSpec) {
    for param in &spec.parameters {
        if intent.arguments.contains_key(&param.name) {
            continue;
        }
        let Some(default) = &param.default else {
            continue;
        };
        let value = match param.kind {
            ParamKind::Number => default.parse::<i64>().map(ArgValue::Int).ok(),
            ParamKind::Boolean => default.parse::<bool>().map(ArgValue::Bool).ok(),
            _ => Some(ArgValue::Word(default.clone())),
        };
        if let Some(value) = value {
            intent.arguments.insert(param.name.clone(), value);
        }
    }
}
