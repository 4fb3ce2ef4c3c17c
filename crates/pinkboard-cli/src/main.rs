//! Pinkboard CLI - Headless rendering and inspection of heart animations

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, render, simulate, sprite};

#[derive(Parser)]
#[command(name = "pinkboard")]
#[command(about = "Particle hearts traced by a fixed-size ring buffer", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Path of the configuration file to create
        #[arg(default_value = commands::DEFAULT_CONFIG_PATH)]
        path: String,
    },

    /// Render the particle sprite to a PNG image
    Sprite {
        /// Output image path
        #[arg(short, long, default_value = "sprite.png")]
        output: String,

        /// Path to configuration file
        #[arg(long)]
        config: Option<String>,

        /// Sprite edge length in pixels (overrides the config)
        #[arg(long)]
        size: Option<u32>,
    },

    /// Play the animation headless and write frames as PNG images
    Render {
        /// Path to configuration file
        #[arg(long)]
        config: Option<String>,

        /// Output image path for the final frame
        #[arg(short, long, default_value = "frame.png")]
        output: String,

        /// Number of frames to simulate
        #[arg(long, default_value = "120")]
        frames: u64,

        /// Frames per second of simulated time
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Canvas width in pixels (overrides the config)
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels (overrides the config)
        #[arg(long)]
        height: Option<u32>,

        /// Also write every frame into this directory
        #[arg(long)]
        sequence: Option<String>,

        /// Spawn sampling seed (overrides the config)
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Run the simulation without rasterizing and report pool statistics
    Simulate {
        /// Path to configuration file
        #[arg(long)]
        config: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Frames per second of simulated time
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path } => init::run(&path),
        Commands::Sprite {
            output,
            config,
            size,
        } => sprite::run(&output, config.as_deref(), size),
        Commands::Render {
            config,
            output,
            frames,
            fps,
            width,
            height,
            sequence,
            seed,
        } => render::run(render::RenderArgs {
            config,
            output,
            frames,
            fps,
            width,
            height,
            sequence,
            seed,
        }),
        Commands::Simulate {
            config,
            frames,
            fps,
            format,
        } => simulate::run(simulate::SimulateArgs {
            config,
            frames,
            fps,
            format,
        }),
    }
}
