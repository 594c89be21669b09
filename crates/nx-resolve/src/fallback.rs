//! Deterministic pattern-heuristic command building.
//!
//! The safety net under the model client: keyword sets map to command
//! templates, numbers come from digits or a fixed text-to-number table, and
//! location/behavior tokens come from the shared tables in `nx-core`. Every
//! unresolved slot falls back to a default. Purely deterministic - the same
//! input always builds the same command.

use nx_core::{Behavior, Compass};

/// Confidence assigned to every heuristic resolution.
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

/// A keyword set mapped to a command template.
struct CommandMapping {
    patterns: &'static [&'static str],
    template: &'static str,
}

const COMMAND_MAPPINGS: &[CommandMapping] = &[
    CommandMapping {
        patterns: &["deploy", "create", "spawn", "send"],
        template: "DeployAgent[{count}] {location} {behavior}",
    },
    CommandMapping {
        patterns: &["scan", "search", "look", "check"],
        template: "ScanArea {x} {y} {radius}",
    },
    CommandMapping {
        patterns: &["list", "show", "display"],
        template: "ListAgents",
    },
    CommandMapping {
        patterns: &["status", "info", "stats"],
        template: "Status",
    },
];

/// Text-to-number table. Multi-word phrases come first so "a few" wins over
/// the article "a".
const TEXT_NUMBERS: &[(&str, i64)] = &[
    ("a few", 3),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("several", 5),
    ("many", 10),
    ("an", 1),
    ("a", 1),
];

/// A heuristic match: the built command plus how it was derived.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackMatch {
    /// The fully substituted command string.
    pub command: String,
    /// The keyword that selected the template.
    pub pattern: &'static str,
    /// The template the command was built from.
    pub template: &'static str,
}

/// Try to build a command from free text. `None` when no keyword set
/// matches - "no suggestion", not an error.
pub fn fallback_parse(input: &str) -> Option<FallbackMatch> {
    let lower = input.to_lowercase();

    for mapping in COMMAND_MAPPINGS {
        if let Some(pattern) = mapping
            .patterns
            .iter()
            .find(|pattern| lower.contains(*pattern))
        {
            return Some(FallbackMatch {
                command: build_command(mapping.template, &lower),
                pattern,
                template: mapping.template,
            });
        }
    }

    None
}

/// Substitute template placeholders from the input, defaulting unresolved
/// slots: count 1, location center, behavior patrol, coordinates 25 25,
/// radius 5.
fn build_command(template: &str, lower: &str) -> String {
    let numbers = extract_numbers(lower);
    let words: Vec<&str> = split_words(lower);

    let location = words
        .iter()
        .find_map(|w| Compass::parse(w))
        .unwrap_or(Compass::Center);
    let behavior = words
        .iter()
        .find_map(|w| Behavior::parse(w))
        .unwrap_or(Behavior::Patrol);

    template
        .replace("{count}", &numbers.first().copied().unwrap_or(1).to_string())
        .replace("{location}", location.name())
        .replace("{behavior}", behavior.name())
        .replace("{x}", &numbers.first().copied().unwrap_or(25).to_string())
        .replace("{y}", &numbers.get(1).copied().unwrap_or(25).to_string())
        .replace("{radius}", &numbers.get(2).copied().unwrap_or(5).to_string())
}

/// Digits first, in order of appearance; then text numbers in table order.
fn extract_numbers(lower: &str) -> Vec<i64> {
    let mut numbers: Vec<i64> = Vec::new();

    let mut digits = String::new();
    for c in lower.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !digits.is_empty() {
            if let Ok(n) = digits.parse() {
                numbers.push(n);
            }
            digits.clear();
        }
    }
    if !digits.is_empty()
        && let Ok(n) = digits.parse()
    {
        numbers.push(n);
    }

    let words = split_words(lower);
    for (text, value) in TEXT_NUMBERS {
        let found = match text.split_once(' ') {
            // Multi-word phrases match as consecutive words.
            Some((first, second)) => words
                .windows(2)
                .any(|pair| pair[0] == first && pair[1] == second),
            None => words.contains(text),
        };
        if found {
            numbers.push(*value);
        }
    }

    numbers
}

/// Lowercased word list, split on anything non-alphanumeric. Matching whole
/// words keeps "a" from firing inside "agents" and "north" inside
/// "northeast".
fn split_words(lower: &str) -> Vec<&str> {
    lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_with_text_number_location_and_behavior() {
        let m = fallback_parse("deploy three agents north patrol").unwrap();
        assert_eq!(m.command, "DeployAgent[3] north patrol");
        assert_eq!(m.pattern, "deploy");
    }

    #[test]
    fn deploy_defaults_every_unresolved_slot() {
        let m = fallback_parse("spawn something").unwrap();
        assert_eq!(m.command, "DeployAgent[1] center patrol");
    }

    #[test]
    fn deploy_with_digits() {
        let m = fallback_parse("send 7 agents east to guard").unwrap();
        assert_eq!(m.command, "DeployAgent[7] east guard");
    }

    #[test]
    fn a_few_beats_the_article() {
        let m = fallback_parse("deploy a few agents south").unwrap();
        assert_eq!(m.command, "DeployAgent[3] south patrol");
    }

    #[test]
    fn article_inside_words_does_not_count() {
        // "agents" must not produce the number 1 via the article "a".
        let m = fallback_parse("deploy two agents").unwrap();
        assert_eq!(m.command, "DeployAgent[2] center patrol");
    }

    #[test]
    fn northeast_is_not_mistaken_for_north() {
        let m = fallback_parse("deploy five agents northeast scout").unwrap();
        assert_eq!(m.command, "DeployAgent[5] northeast scout");
    }

    #[test]
    fn scan_with_coordinates_and_radius() {
        let m = fallback_parse("scan 10 20 8").unwrap();
        assert_eq!(m.command, "ScanArea 10 20 8");
    }

    #[test]
    fn scan_defaults_coordinates() {
        let m = fallback_parse("look around please").unwrap();
        assert_eq!(m.command, "ScanArea 25 25 5");
    }

    #[test]
    fn list_and_status_templates_have_no_slots() {
        assert_eq!(fallback_parse("show everything").unwrap().command, "ListAgents");
        assert_eq!(fallback_parse("what's my status").unwrap().command, "Status");
    }

    #[test]
    fn unmatched_input_yields_none() {
        assert!(fallback_parse("sing me a song").is_none());
        assert!(fallback_parse("").is_none());
    }

    #[test]
    fn mapping_order_resolves_keyword_collisions() {
        // "check" maps to scan even though the sentence mentions agents.
        let m = fallback_parse("check on the agents").unwrap();
        assert!(m.command.starts_with("ScanArea"));
    }

    #[test]
    fn fallback_is_deterministic() {
        let a = fallback_parse("deploy several agents west gather");
        let b = fallback_parse("deploy several agents west gather");
        assert_eq!(a, b);
        assert_eq!(a.unwrap().command, "DeployAgent[5] west gather");
    }
}
