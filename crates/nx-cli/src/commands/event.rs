use colored::Colorize;

use nx_core::WorldSize;
use nx_worldgen::WorldEventGenerator;

pub fn run(seed: Option<&str>, width: u32, height: u32, json: bool) -> Result<(), String> {
    let mut generator = match seed {
        Some(seed) => WorldEventGenerator::new(seed),
        None => WorldEventGenerator::from_entropy(),
    };
    let event = generator.generate_event(WorldSize::new(width, height));

    if json {
        let rendered = serde_json::to_string_pretty(&event)
            .map_err(|e| format!("serialization failed: {e}"))?;
        println!("{rendered}");
        return Ok(());
    }

    println!("  {} {}", event.kind.name().red().bold(), event.message);
    println!(
        "  {}",
        format!(
            "position {} radius {} duration {}s",
            event.position,
            event.radius,
            event.duration.as_secs()
        )
        .dimmed()
    );
    Ok(())
}
