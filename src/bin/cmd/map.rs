// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Map command - summarize occupancy grids.

use std::path::PathBuf;

use clap::Subcommand;
use roboarray::msgs::OccupancyGrid;
use roboarray::occupancy::occupancy_grid_to_array;
use roboarray::RoboArrayConfig;

use crate::common::{format_stamp, read_message, Result};

/// Occupancy grid operations.
#[derive(Subcommand, Clone, Debug)]
pub enum MapCmd {
    /// Show map metadata and cell statistics
    Info {
        /// Input file (rosbridge JSON OccupancyGrid)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

impl MapCmd {
    pub fn run(self, config: &RoboArrayConfig) -> Result<()> {
        match self {
            MapCmd::Info { input } => cmd_info(input, config),
        }
    }
}

/// Cmd: Show map info
///
/// A map with no resolution set reports the configured one.
fn cmd_info(input: PathBuf, config: &RoboArrayConfig) -> Result<()> {
    let map: OccupancyGrid = read_message(&input)?;
    let cells = occupancy_grid_to_array(&map)?;

    let unknown = cells.unknown_count();
    let free = cells.data().iter().filter(|&&v| v == 0).count();
    let occupied = cells.data().len() - unknown - free;
    let origin = &map.info.origin.position;

    println!("=== {} ===", input.display());
    println!("Frame: {}", map.header.frame_id);
    println!("Stamp: {}", format_stamp(&map.header.stamp));
    println!("Size: {} x {} cells", cells.height(), cells.width());
    if map.info.resolution > 0.0 {
        println!("Resolution: {} m/cell", map.info.resolution);
    } else {
        println!("Resolution: {} m/cell (config)", config.occupancy.resolution);
    }
    println!("Origin: ({}, {}, {})", origin.x, origin.y, origin.z);
    println!();
    println!("Cells:");
    println!("  unknown: {unknown}");
    println!("  free: {free}");
    println!("  occupied: {occupied}");

    Ok(())
}
