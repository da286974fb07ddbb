// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Roboarray CLI
//!
//! Inspect and reshape ROS messages stored as rosbridge JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Summarize point clouds
//! roboarray cloud info scan_0.json scan_1.json
//!
//! # Dump finite xyz coordinates
//! roboarray cloud xyz scan.json
//!
//! # Pack r/g/b into a single rgb field
//! roboarray cloud merge-rgb scan.json -o packed.json
//!
//! # Summarize a map or an image
//! roboarray map info map.json
//! roboarray image info frame.json
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{CloudCmd, ImageCmd, MapCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// Roboarray - ROS message array toolkit
///
/// Decode point clouds, maps and images from rosbridge JSON into typed
/// arrays, and re-encode them.
#[derive(Parser, Clone)]
#[command(name = "roboarray")]
#[command(about = "ROS message array toolkit for rosbridge JSON", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// TOML file with conversion defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Point cloud operations (info, xyz, merge-rgb, split-rgb)
    #[command(subcommand)]
    Cloud(CloudCmd),

    /// Occupancy grid operations (info)
    #[command(subcommand)]
    Map(MapCmd),

    /// Raw image operations (info)
    #[command(subcommand)]
    Image(ImageCmd),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = common::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Cloud(cmd) => cmd.run(&config),
        Commands::Map(cmd) => cmd.run(&config),
        Commands::Image(cmd) => cmd.run(&config),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
