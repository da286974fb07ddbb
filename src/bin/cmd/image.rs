// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Image command - summarize raw images.

use std::path::PathBuf;

use clap::Subcommand;
use roboarray::image::raw_image_to_array;
use roboarray::msgs::Image;
use roboarray::RoboArrayConfig;

use crate::common::{format_bytes, format_stamp, read_message, Result};

/// Raw image operations.
#[derive(Subcommand, Clone, Debug)]
pub enum ImageCmd {
    /// Show image layout and per-channel value ranges
    Info {
        /// Input file (rosbridge JSON Image)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

impl ImageCmd {
    pub fn run(self, config: &RoboArrayConfig) -> Result<()> {
        match self {
            ImageCmd::Info { input } => cmd_info(input, config),
        }
    }
}

/// Cmd: Show image info
///
/// An image without an encoding is read with the configured one.
fn cmd_info(input: PathBuf, config: &RoboArrayConfig) -> Result<()> {
    let mut image: Image = read_message(&input)?;
    if image.encoding.is_empty() {
        tracing::debug!(encoding = %config.image.encoding, "image has no encoding; using config");
        image.encoding = config.image.encoding.clone();
    }
    let pixels = raw_image_to_array(&image)?;

    println!("=== {} ===", input.display());
    println!("Frame: {}", image.header.frame_id);
    println!("Stamp: {}", format_stamp(&image.header.stamp));
    println!("Encoding: {}", image.encoding);
    println!(
        "Size: {} x {} x {} ({})",
        pixels.height(),
        pixels.width(),
        pixels.channels(),
        pixels.element_type()
    );
    println!("Step: {} bytes", image.step);
    println!("Data: {}", format_bytes(image.data.len()));
    println!();
    println!("Channels:");
    for channel in 0..pixels.channels() {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in 0..pixels.height() {
            for col in 0..pixels.width() {
                if let Some(v) = pixels.get_f64(row, col, channel) {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }
        if min > max {
            println!("  [{channel}] empty");
        } else {
            println!("  [{channel}] min {min} max {max}");
        }
    }

    Ok(())
}
