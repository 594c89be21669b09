//! The command catalog: specs are data, not code.
//!
//! The validator never hardcodes the set of commands - it looks the leading
//! token up here. Custom commands can be registered at runtime and flow
//! through the same generic argument extraction, so extending the command
//! set never touches the parser or validator.

use serde::{Deserialize, Serialize};

/// The coercion target for a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A bare word.
    String,
    /// An integer.
    Number,
    /// `true` / `false`.
    Boolean,
    /// A whitespace-separated list consuming the remaining tokens.
    Array,
}

/// One declared parameter of a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name, used as the argument key in a parsed intent.
    pub name: String,
    /// Coercion target.
    pub kind: ParamKind,
    /// Required parameters appear in brackets; optional ones are positional.
    pub required: bool,
    /// Default value substituted when an optional parameter is omitted.
    pub default: Option<String>,
    /// Human-readable description for help output.
    pub description: String,
}

impl ParameterSpec {
    /// A required parameter.
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            description: description.into(),
        }
    }

    /// An optional parameter with a default.
    pub fn optional(name: &str, kind: ParamKind, default: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: Some(default.into()),
            description: description.into(),
        }
    }
}

/// Grouping used in help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Commands that create or direct agents.
    Agent,
    /// Commands that inspect or mutate the world grid.
    World,
    /// Terminal and session commands.
    System,
}

/// An immutable, registered command definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Canonical command name (`"DeployAgent"`).
    pub name: String,
    /// Full syntax line shown in help and syntax errors.
    pub syntax: String,
    /// One-line description.
    pub description: String,
    /// Declared parameters, required first.
    pub parameters: Vec<ParameterSpec>,
    /// Help grouping.
    pub category: Category,
}

/// The registered set of commands.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    specs: Vec<CommandSpec>,
}

impl CommandCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in command set.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(CommandSpec {
            name: "DeployAgent".into(),
            syntax: "DeployAgent[count] location behavior".into(),
            description: "Deploy intelligent agents to the world grid".into(),
            parameters: vec![
                ParameterSpec::required("count", ParamKind::Number, "Number of agents to deploy"),
                ParameterSpec::optional("location", ParamKind::String, "center", "Starting location"),
                ParameterSpec::optional("behavior", ParamKind::String, "patrol", "Agent behavior pattern"),
            ],
            category: Category::Agent,
        });
        catalog.register(CommandSpec {
            name: "ScanArea".into(),
            syntax: "ScanArea x y radius".into(),
            description: "Scan the specified area for objects and agents".into(),
            parameters: vec![
                ParameterSpec::required("x", ParamKind::Number, "X coordinate"),
                ParameterSpec::required("y", ParamKind::Number, "Y coordinate"),
                ParameterSpec::optional("radius", ParamKind::Number, "5", "Scan radius"),
            ],
            category: Category::World,
        });
        catalog.register(CommandSpec {
            name: "ListAgents".into(),
            syntax: "ListAgents".into(),
            description: "Show all active agents".into(),
            parameters: Vec::new(),
            category: Category::Agent,
        });
        catalog.register(CommandSpec {
            name: "Status".into(),
            syntax: "Status".into(),
            description: "Show system status".into(),
            parameters: Vec::new(),
            category: Category::System,
        });
        catalog.register(CommandSpec {
            name: "ClearTerminal".into(),
            syntax: "ClearTerminal".into(),
            description: "Clear terminal output".into(),
            parameters: Vec::new(),
            category: Category::System,
        });
        catalog.register(CommandSpec {
            name: "Help".into(),
            syntax: "Help".into(),
            description: "List available commands".into(),
            parameters: Vec::new(),
            category: Category::System,
        });
        catalog.register(CommandSpec {
            name: "Tutorial".into(),
            syntax: "Tutorial".into(),
            description: "Start the interactive tutorial".into(),
            parameters: Vec::new(),
            category: Category::System,
        });
        catalog
    }

    /// Register a command. Specs are immutable once registered.
    pub fn register(&mut self, spec: CommandSpec) {
        self.specs.push(spec);
    }

    /// Look up a command by leading token: exact name match or syntax prefix,
    /// case-insensitively.
    pub fn find(&self, token: &str) -> Option<&CommandSpec> {
        let lower = token.to_ascii_lowercase();
        self.specs.iter().find(|spec| {
            spec.name.to_ascii_lowercase() == lower
                || spec.syntax.to_ascii_lowercase().starts_with(&lower)
        })
    }

    /// All registered specs, in registration order.
    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_core_commands() {
        let catalog = CommandCatalog::builtin();
        for name in ["DeployAgent", "ScanArea", "ListAgents", "Status"] {
            assert!(catalog.find(name).is_some(), "missing builtin {name}");
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        let catalog = CommandCatalog::builtin();
        assert_eq!(catalog.find("deployagent").unwrap().name, "DeployAgent");
        assert_eq!(catalog.find("DEPLOYAGENT").unwrap().name, "DeployAgent");
    }

    #[test]
    fn find_rejects_unknown() {
        let catalog = CommandCatalog::builtin();
        assert!(catalog.find("Teleport").is_none());
    }

    #[test]
    fn custom_command_registration() {
        let mut catalog = CommandCatalog::builtin();
        catalog.register(CommandSpec {
            name: "SelfDestruct".into(),
            syntax: "SelfDestruct[code]".into(),
            description: "Custom".into(),
            parameters: vec![ParameterSpec::required(
                "code",
                ParamKind::Number,
                "Arming code",
            )],
            category: Category::System,
        });
        assert!(catalog.find("selfdestruct").is_some());
    }
}
