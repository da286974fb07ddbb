// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Roboarray
//!
//! Converts ROS messages, in their rosbridge JSON form, to and from typed
//! arrays.
//!
//! The centre of the library is the point cloud record codec in
//! [`pointcloud`]: it turns a `sensor_msgs/PointCloud2` byte buffer into a
//! columnar [`RecordGrid`](pointcloud::RecordGrid) and back, preserving field
//! offsets, padding and record stride.
//!
//! ## Architecture
//!
//! - `core/` - Errors, element types, typed column storage
//! - `msgs/` - serde message types matching the rosbridge wire shape
//! - `pointcloud/` - Layout derivation, record grids, RGB packing
//! - `image`, `occupancy`, `geometry`, `navigation` - Fixed-shape adapters
//! - `config` - TOML conversion defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roboarray::msgs::{PointCloud2, WireMessage};
//! use roboarray::pointcloud::pointcloud2_to_xyz_array;
//!
//! let cloud = PointCloud2::from_json(&std::fs::read_to_string("cloud.json")?)?;
//! for [x, y, z] in pointcloud2_to_xyz_array(&cloud, true)? {
//!     println!("{x} {y} {z}");
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CodecError, ColumnData, ElementType, Endianness, Result, ScalarType};

// Wire messages
pub mod msgs;

// Point cloud record codec
pub mod pointcloud;

pub use pointcloud::{
    grid_to_pointcloud2, merge_rgb_fields, pointcloud2_to_grid, split_rgb_field, Column,
    EncodeOptions, GridShape, RecordGrid,
};

// Fixed-shape message adapters
pub mod geometry;
pub mod image;
pub mod navigation;
pub mod occupancy;

// Configuration
pub mod config;

pub use config::{ConfigError, RoboArrayConfig};
