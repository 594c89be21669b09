use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use nx_worldgen::{DensityConfig, GenerationConfig};

pub struct Args {
    pub seed: String,
    pub width: u32,
    pub height: u32,
    pub biome: String,
    pub difficulty: u32,
    pub density_obstacles: f64,
    pub density_datanodes: f64,
    pub density_terminals: f64,
    pub density_portals: f64,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn run(args: Args) -> Result<(), String> {
    let biome = super::parse_biome(&args.biome)?;
    let config = GenerationConfig::default()
        .with_seed(args.seed)
        .with_size(args.width, args.height)
        .with_biome(biome)
        .with_difficulty(args.difficulty)
        .with_density(DensityConfig {
            obstacles: args.density_obstacles,
            datanodes: args.density_datanodes,
            terminals: args.density_terminals,
            portals: args.density_portals,
        });

    let template = nx_worldgen::generate(&config);

    if args.json {
        let json = serde_json::to_string_pretty(&template)
            .map_err(|e| format!("serialization failed: {e}"))?;
        match &args.output {
            Some(path) => fs::write(path, json)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?,
            None => println!("{json}"),
        }
        return Ok(());
    }

    println!(
        "  {} '{}' {}",
        "Generated".bold(),
        template.name,
        format!(
            "({}, seed={}, difficulty={})",
            template.size, config.seed, template.difficulty
        )
        .dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Object", "Count"]);
    for type_name in ["wall", "obstacle", "datanode", "terminalnode", "portal"] {
        table.add_row(vec![
            type_name.to_string(),
            template.count_of(type_name).to_string(),
        ]);
    }
    table.add_row(vec![
        "spawn points".to_string(),
        template.spawn_points.len().to_string(),
    ]);
    println!("{table}");

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&template)
            .map_err(|e| format!("serialization failed: {e}"))?;
        fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!();
        println!("  template written to {}", path.display());
    }

    Ok(())
}
