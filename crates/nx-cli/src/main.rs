//! CLI frontend for the Nexus world engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nx",
    about = "Nexus - drive a simulated agent world from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a command string and report diagnostics
    Validate {
        /// The command string, e.g. "DeployAgent[3] north scout"
        command: String,
    },

    /// Validate and execute a command against a demo world
    Exec {
        /// The command string
        command: String,
    },

    /// Generate a procedural world template from a seed
    Generate {
        /// Seed string; identical seeds regenerate identical worlds
        #[arg(short, long, default_value = "42")]
        seed: String,

        /// World width in cells
        #[arg(long, default_value = "50")]
        width: u32,

        /// World height in cells
        #[arg(long, default_value = "50")]
        height: u32,

        /// Terrain biome: matrix, corrupted, pristine, chaotic
        #[arg(short, long, default_value = "matrix")]
        biome: String,

        /// Difficulty rating carried onto the template
        #[arg(short, long, default_value = "1")]
        difficulty: u32,

        /// Obstacle density (fraction of cells)
        #[arg(long, default_value = "0.05")]
        density_obstacles: f64,

        /// Data node density (fraction of cells)
        #[arg(long, default_value = "0.02")]
        density_datanodes: f64,

        /// Terminal density (fraction of cells)
        #[arg(long, default_value = "0.01")]
        density_terminals: f64,

        /// Portal density (fraction of cells)
        #[arg(long, default_value = "0.005")]
        density_portals: f64,

        /// Emit the full template as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a single timed world event
    Event {
        /// Seed string; omit for an entropy-seeded event
        #[arg(short, long)]
        seed: Option<String>,

        /// World width in cells
        #[arg(long, default_value = "50")]
        width: u32,

        /// World height in cells
        #[arg(long, default_value = "50")]
        height: u32,

        /// Emit the event as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve natural language into a structured command
    Resolve {
        /// Free-form text, e.g. "deploy three agents north patrol"
        text: String,

        /// Session id for conversational context
        #[arg(short = 'S', long)]
        session: Option<String>,

        /// Emit the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive terminal: natural language or structured commands
    Repl {
        /// Seed for the world the session runs against
        #[arg(short, long, default_value = "42")]
        seed: String,

        /// Terrain biome for the session world
        #[arg(short, long, default_value = "matrix")]
        biome: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { command } => commands::validate::run(&command),
        Commands::Exec { command } => commands::exec::run(&command),
        Commands::Generate {
            seed,
            width,
            height,
            biome,
            difficulty,
            density_obstacles,
            density_datanodes,
            density_terminals,
            density_portals,
            json,
            output,
        } => commands::generate::run(commands::generate::Args {
            seed,
            width,
            height,
            biome,
            difficulty,
            density_obstacles,
            density_datanodes,
            density_terminals,
            density_portals,
            json,
            output,
        }),
        Commands::Event {
            seed,
            width,
            height,
            json,
        } => commands::event::run(seed.as_deref(), width, height, json),
        Commands::Resolve {
            text,
            session,
            json,
        } => commands::resolve::run(&text, session.as_deref(), json),
        Commands::Repl { seed, biome } => commands::repl::run(&seed, &biome),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
