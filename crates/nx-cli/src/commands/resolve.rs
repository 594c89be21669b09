use colored::Colorize;

use nx_command::CommandCatalog;
use nx_resolve::{ModelClient, ModelConfig, Resolver};

pub fn run(text: &str, session: Option<&str>, json: bool) -> Result<(), String> {
    let mut resolver = Resolver::new(CommandCatalog::builtin());
    if let Some(config) = ModelConfig::from_env() {
        let client = ModelClient::new(config).map_err(|e| format!("model client: {e}"))?;
        resolver = resolver.with_client(client);
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| format!("runtime: {e}"))?;
    let resolution = runtime.block_on(resolver.resolve(text, session, None));

    let Some(resolution) = resolution else {
        return Err("no suggestion available for that input".into());
    };

    if json {
        let rendered = serde_json::to_string_pretty(&resolution)
            .map_err(|e| format!("serialization failed: {e}"))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("  {} {}", "command".bold(), resolution.command.green());
    println!(
        "  {}",
        format!(
            "confidence {:.2} - {}",
            resolution.confidence, resolution.explanation
        )
        .dimmed()
    );
    if resolution.needs_clarification
        && let Some(prompt) = &resolution.clarification_prompt
    {
        println!("  {} {}", "clarify:".yellow().bold(), prompt);
    }
    println!("  {}", format!("session {}", resolution.session_id).dimmed());
    Ok(())
}
