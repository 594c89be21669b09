//! The structured, validated representation of a command prior to execution.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use nx_core::Point;

/// A typed argument value extracted by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Integer argument.
    Int(i64),
    /// Bare-word argument (location token, behavior token, ...).
    Word(String),
    /// Boolean argument.
    Bool(bool),
    /// An `x y` coordinate pair.
    Coord(Point),
    /// Remaining-token list argument (array-kind parameters).
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// The integer value, if this argument is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The word value, if this argument is one.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            ArgValue::Word(w) => Some(w),
            _ => None,
        }
    }

    /// The coordinate value, if this argument is one.
    pub fn as_coord(&self) -> Option<Point> {
        match self {
            ArgValue::Coord(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(n) => write!(f, "{n}"),
            ArgValue::Word(w) => write!(f, "{w}"),
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::Coord(p) => write!(f, "{} {}", p.x, p.y),
            ArgValue::List(items) => {
                let rendered: Vec<_> = items.iter().map(ArgValue::to_string).collect();
                write!(f, "{}", rendered.join(" "))
            }
        }
    }
}

/// Output of structured parsing, input to execution.
///
/// `command_name` is the canonical catalog name; `arguments` maps parameter
/// names to extracted values, with declared defaults already filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    /// Canonical command name from the catalog.
    pub command_name: String,
    /// Extracted arguments keyed by parameter name.
    pub arguments: BTreeMap<String, ArgValue>,
}

impl ParsedIntent {
    /// An intent with no arguments.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Add an argument, builder-style.
    pub fn with_arg(mut self, name: &str, value: ArgValue) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    /// Look up an argument by parameter name.
    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.arguments.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let intent = ParsedIntent::new("DeployAgent")
            .with_arg("count", ArgValue::Int(3))
            .with_arg("location", ArgValue::Word("north".into()));
        assert_eq!(intent.arg("count").and_then(ArgValue::as_int), Some(3));
        assert_eq!(
            intent.arg("location").and_then(|v| v.as_word()),
            Some("north")
        );
        assert!(intent.arg("behavior").is_none());
    }

    #[test]
    fn coord_accessor() {
        let intent =
            ParsedIntent::new("DeployAgent").with_arg("location", ArgValue::Coord(Point::new(10, 12)));
        assert_eq!(
            intent.arg("location").and_then(ArgValue::as_coord),
            Some(Point::new(10, 12))
        );
    }

    #[test]
    fn intent_json_roundtrip() {
        let intent = ParsedIntent::new("DeployAgent")
            .with_arg("count", ArgValue::Int(3))
            .with_arg("location", ArgValue::Word("north".into()));
        let json = serde_json::to_string(&intent).unwrap();
        let back: ParsedIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intent);
    }
}
