// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cloud command - summarize, flatten and repack point clouds.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use rayon::prelude::*;
use roboarray::msgs::PointCloud2;
use roboarray::pointcloud::{
    get_xyz_points, grid_to_pointcloud2, pointcloud2_to_grid, RecordLayout,
};
use roboarray::{Endianness, RecordGrid, RoboArrayConfig};

use crate::common::{format_bytes, format_stamp, read_message, write_message, Result};

/// Point cloud operations.
#[derive(Subcommand, Clone, Debug)]
pub enum CloudCmd {
    /// Show layout and summary of one or more clouds
    Info {
        /// Input files (rosbridge JSON PointCloud2)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Print x y z of every point, one per line
    Xyz {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Keep points with NaN or infinite coordinates
        #[arg(long)]
        keep_nans: bool,
    },

    /// Pack r, g, b fields into a single float32 rgb field
    MergeRgb {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Unpack an rgb field into r, g, b fields
    SplitRgb {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl CloudCmd {
    pub fn run(self, config: &RoboArrayConfig) -> Result<()> {
        match self {
            CloudCmd::Info { inputs } => cmd_info(&inputs),
            CloudCmd::Xyz { input, keep_nans } => cmd_xyz(&input, keep_nans),
            CloudCmd::MergeRgb { input, output } => cmd_repack(
                &input,
                output.as_deref(),
                config,
                roboarray::merge_rgb_fields,
            ),
            CloudCmd::SplitRgb { input, output } => cmd_repack(
                &input,
                output.as_deref(),
                config,
                roboarray::split_rgb_field,
            ),
        }
    }
}

/// Cmd: Show cloud info
///
/// Files are decoded in parallel; reports are printed in argument order.
fn cmd_info(inputs: &[PathBuf]) -> Result<()> {
    let reports: Vec<Result<String>> = inputs.par_iter().map(|path| describe(path)).collect();
    let mut failed = 0usize;
    for report in reports {
        match report {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("Error: {e:#}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} clouds could not be read", inputs.len());
    }
    Ok(())
}

fn describe(path: &Path) -> Result<String> {
    let cloud: PointCloud2 = read_message(path)?;
    let grid = pointcloud2_to_grid(&cloud, false)?;
    let layout = RecordLayout::from_cloud(&cloud)?;
    let used: usize = layout.fields.iter().map(|f| f.byte_len()).sum();

    let mut out = String::new();
    writeln!(out, "=== {} ===", path.display())?;
    writeln!(out, "Frame: {}", cloud.header.frame_id)?;
    writeln!(out, "Stamp: {}", format_stamp(&cloud.header.stamp))?;
    writeln!(out, "Size: {} x {} ({} points)", cloud.height, cloud.width, grid.len())?;
    writeln!(out, "Point step: {} bytes", layout.point_step)?;
    writeln!(out, "Byte order: {:?}", layout.endianness)?;
    writeln!(out, "Data: {}", format_bytes(cloud.data.len()))?;
    writeln!(out, "Dense: {} (flag: {})", grid.is_dense(), cloud.is_dense)?;
    writeln!(out, "Padding: {} bytes", layout.point_step - used)?;
    writeln!(out)?;
    writeln!(out, "Fields:")?;
    for field in &layout.fields {
        writeln!(
            out,
            "  {:<12} {:<8} x{:<3} @ {}",
            field.name,
            field.scalar_type.name(),
            field.count,
            field.offset
        )?;
    }
    writeln!(out)?;
    Ok(out)
}

/// Cmd: Print xyz coordinates
fn cmd_xyz(input: &Path, keep_nans: bool) -> Result<()> {
    let cloud: PointCloud2 = read_message(input)?;
    let grid = pointcloud2_to_grid(&cloud, true)?;
    let points = get_xyz_points(&grid, !keep_nans)?;
    tracing::debug!(total = grid.len(), kept = points.len(), "extracted xyz");

    for [x, y, z] in points {
        println!("{x} {y} {z}");
    }
    Ok(())
}

/// Decode, reshape the columns, and encode again under the input's header.
///
/// The output keeps the input's byte order unless the config sets one, and
/// falls back to the configured frame when the input has none.
fn cmd_repack(
    input: &Path,
    output: Option<&Path>,
    config: &RoboArrayConfig,
    reshape: fn(&RecordGrid) -> roboarray::Result<RecordGrid>,
) -> Result<()> {
    let cloud: PointCloud2 = read_message(input)?;
    let grid = pointcloud2_to_grid(&cloud, config.cloud.squeeze)?;
    let reshaped = reshape(&grid)?;

    // The input's frame and byte order win over the config defaults unless
    // the config pins a byte order.
    let mut options = config.cloud.encode_options().with_stamp(cloud.header.stamp);
    if config.cloud.endianness.is_none() {
        options = options.with_endianness(Endianness::from_big_endian_flag(cloud.is_bigendian));
    }
    if !cloud.header.frame_id.is_empty() {
        options = options.with_frame_id(cloud.header.frame_id.clone());
    }
    write_message(&grid_to_pointcloud2(&reshaped, &options)?, output)
}
