// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Point cloud record codec.
//!
//! Translates between a `sensor_msgs/PointCloud2` payload (a flat byte buffer
//! plus field descriptors) and a [`RecordGrid`] holding one typed column per
//! field.
//!
//! ## Architecture
//!
//! - [`layout`] - Field descriptors, record schemas, padding derivation
//! - [`grid`] - Columnar record grid and its byte (de)serialization
//! - [`codec`] - Message-level decode and encode
//! - [`rgb`] - Packed RGB merge/split
//!
//! ## Example
//!
//! ```
//! use roboarray::pointcloud::{
//!     grid_to_pointcloud2, pointcloud2_to_grid, Column, EncodeOptions, GridShape, RecordGrid,
//! };
//!
//! # fn main() -> roboarray::Result<()> {
//! let grid = RecordGrid::from_columns(
//!     GridShape::Grid { height: 1, width: 2 },
//!     vec![
//!         Column::new("x", vec![1.0f32, 2.0]),
//!         Column::new("y", vec![3.0f32, 4.0]),
//!         Column::new("z", vec![5.0f32, 6.0]),
//!     ],
//! )?;
//! let cloud = grid_to_pointcloud2(&grid, &EncodeOptions::default())?;
//! assert_eq!(cloud.point_step, 12);
//!
//! let decoded = pointcloud2_to_grid(&cloud, false)?;
//! assert_eq!(decoded, grid);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod grid;
pub mod layout;
pub mod rgb;
mod xyz;

pub use codec::{
    grid_to_pointcloud2, pointcloud2_to_grid, pointcloud2_to_xyz_array, EncodeOptions,
    DEFAULT_FRAME_ID,
};
pub use grid::{Column, GridShape, RecordGrid};
pub use layout::{
    fields_to_schema, is_padding_name, schema_to_fields, FieldDescriptor, RecordLayout,
    RecordSchema, SchemaEntry, DUMMY_FIELD_PREFIX,
};
pub use rgb::{merge_rgb_fields, split_rgb_field};
pub use xyz::get_xyz_points;
