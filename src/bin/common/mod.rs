// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use roboarray::msgs::{Time, WireMessage};
use roboarray::RoboArrayConfig;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load the config file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<RoboArrayConfig> {
    match path {
        Some(path) => Ok(RoboArrayConfig::from_file(path)?),
        None => Ok(RoboArrayConfig::default()),
    }
}

/// Read one message from a rosbridge JSON file.
pub fn read_message<M: WireMessage>(path: &Path) -> Result<M> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    M::from_json_slice(&bytes)
        .with_context(|| format!("{} is not a valid {}", path.display(), M::TYPE_NAME))
}

/// Write a message as pretty JSON to `output`, or to stdout.
pub fn write_message<M: WireMessage>(message: &M, output: Option<&Path>) -> Result<()> {
    let json = message.to_json_pretty()?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

/// Format a header stamp as a UTC date, falling back to raw seconds.
pub fn format_stamp(stamp: &Time) -> String {
    let datetime =
        chrono::DateTime::<chrono::Utc>::from_timestamp(i64::from(stamp.sec), stamp.nanosec);

    match datetime {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("{}.{:09} s", stamp.sec, stamp.nanosec),
    }
}

/// Format a byte count with binary units.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
