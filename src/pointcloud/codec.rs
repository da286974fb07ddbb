// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Point cloud buffer ⇄ grid conversion.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use roboarray::msgs::{PointCloud2, WireMessage};
//! use roboarray::pointcloud::{grid_to_pointcloud2, pointcloud2_to_grid, EncodeOptions};
//!
//! let cloud = PointCloud2::from_json(&std::fs::read_to_string("cloud.json")?)?;
//! let grid = pointcloud2_to_grid(&cloud, true)?;
//! let echoed = grid_to_pointcloud2(&grid, &EncodeOptions::default())?;
//! assert_eq!(echoed.point_step, cloud.point_step);
//! # Ok(())
//! # }
//! ```

use byteorder::{BigEndian, LittleEndian};
use tracing::{debug, warn};

use super::grid::{GridShape, RecordGrid};
use super::layout::{schema_to_fields, RecordLayout};
use crate::core::{to_wire_u32, CodecError, Endianness, Result};
use crate::msgs::{Header, PointCloud2, PointField, Time};

/// Default frame for encoded clouds.
pub const DEFAULT_FRAME_ID: &str = "base_link";

/// Options for [`grid_to_pointcloud2`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    pub frame_id: String,
    /// Byte order of the emitted payload
    pub endianness: Endianness,
    /// Header stamp; `None` stamps with the current time
    pub stamp: Option<Time>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_FRAME_ID.to_string(),
            endianness: Endianness::native(),
            stamp: None,
        }
    }
}

impl EncodeOptions {
    pub fn with_frame_id(mut self, frame_id: impl Into<String>) -> Self {
        self.frame_id = frame_id.into();
        self
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn with_stamp(mut self, stamp: Time) -> Self {
        self.stamp = Some(stamp);
        self
    }
}

/// Decode a point cloud into a record grid.
///
/// The grid has shape `height × width`; when `squeeze` is set and the cloud
/// has a single row it is returned as a flat sequence of `width` records.
/// Padding bytes are dropped from the columns but their space is kept in the
/// grid's stride, so encoding the grid again yields the same `point_step`.
///
/// Datatype codes are validated before the payload is read, and the payload
/// must be exactly `height * width * point_step` bytes.
pub fn pointcloud2_to_grid(cloud: &PointCloud2, squeeze: bool) -> Result<RecordGrid> {
    let layout = RecordLayout::from_cloud(cloud)?;

    let height = cloud.height as usize;
    let width = cloud.width as usize;
    let expected = height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(layout.point_step))
        .ok_or_else(|| {
            CodecError::shape_mismatch(
                "point cloud size",
                "height * width * point_step within usize",
                format!("{height} x {width} x {}", layout.point_step),
            )
        })?;
    if cloud.data.len() != expected {
        return Err(CodecError::shape_mismatch(
            "point cloud data",
            format!(
                "{expected} bytes ({height} x {width} x {})",
                layout.point_step
            ),
            format!("{} bytes", cloud.data.len()),
        ));
    }
    if height > 0 && cloud.row_step as usize != width * layout.point_step {
        warn!(
            row_step = cloud.row_step,
            width,
            point_step = layout.point_step,
            "row_step disagrees with width * point_step; ignoring it"
        );
    }

    let schema = layout.unpadded_schema()?;
    let shape = if squeeze && height == 1 {
        GridShape::Flat(width)
    } else {
        GridShape::Grid { height, width }
    };
    let grid = match layout.endianness {
        Endianness::Little => {
            RecordGrid::read_records::<LittleEndian>(shape, schema, &cloud.data)?
        }
        Endianness::Big => RecordGrid::read_records::<BigEndian>(shape, schema, &cloud.data)?,
    };

    debug!(
        height,
        width,
        point_step = layout.point_step,
        columns = grid.schema().len(),
        "decoded point cloud"
    );
    Ok(grid)
}

/// Encode a record grid as a point cloud.
///
/// A flat grid is treated as a single row. Field descriptors, `point_step`
/// and offsets come from the grid's schema; `is_dense` is true only if every
/// element of every column is finite.
pub fn grid_to_pointcloud2(grid: &RecordGrid, options: &EncodeOptions) -> Result<PointCloud2> {
    let (height, width) = grid.shape().as_2d();
    let fields = schema_to_fields(grid.schema())?;
    let point_step = grid.stride();
    let row_step = point_step.checked_mul(width).ok_or_else(|| {
        CodecError::shape_mismatch("row_step", "value within usize", "overflow")
    })?;
    let is_dense = grid.is_dense();
    let data = grid.to_bytes(options.endianness);

    debug!(
        height,
        width,
        point_step,
        is_dense,
        bytes = data.len(),
        "encoded point cloud"
    );

    Ok(PointCloud2 {
        header: Header {
            stamp: options.stamp.unwrap_or_else(Time::now),
            frame_id: options.frame_id.clone(),
        },
        height: to_wire_u32("height", height)?,
        width: to_wire_u32("width", width)?,
        // Offsets and counts fit in u32 whenever point_step does.
        fields: fields.iter().map(PointField::from).collect(),
        is_bigendian: options.endianness.is_big(),
        point_step: to_wire_u32("point_step", point_step)?,
        row_step: to_wire_u32("row_step", row_step)?,
        data,
        is_dense,
    })
}

/// Decode a point cloud and pull out its `x`, `y`, `z` columns.
///
/// See [`get_xyz_points`](super::get_xyz_points).
pub fn pointcloud2_to_xyz_array(cloud: &PointCloud2, remove_nans: bool) -> Result<Vec<[f64; 3]>> {
    super::xyz::get_xyz_points(&pointcloud2_to_grid(cloud, true)?, remove_nans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointcloud::grid::Column;

    fn xyz_cloud(height: u32, width: u32, values: &[f32]) -> PointCloud2 {
        let mut data = Vec::new();
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        PointCloud2 {
            height,
            width,
            fields: ["x", "y", "z"]
                .iter()
                .enumerate()
                .map(|(i, name)| PointField {
                    name: name.to_string(),
                    offset: 4 * i as u32,
                    datatype: 7,
                    count: 1,
                })
                .collect(),
            is_bigendian: false,
            point_step: 12,
            row_step: 12 * width,
            data,
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_squeezes_single_row() {
        let cloud = xyz_cloud(1, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let grid = pointcloud2_to_grid(&cloud, true).unwrap();
        assert_eq!(grid.shape(), GridShape::Flat(2));
        let unsqueezed = pointcloud2_to_grid(&cloud, false).unwrap();
        assert_eq!(
            unsqueezed.shape(),
            GridShape::Grid {
                height: 1,
                width: 2
            }
        );
        assert_eq!(
            grid.column("z").and_then(|c| c.as_f32()),
            Some(&[3.0f32, 6.0][..])
        );
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        let mut cloud = xyz_cloud(1, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        cloud.data.pop();
        let err = pointcloud2_to_grid(&cloud, true).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_decode_big_endian() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x0102u16.to_be_bytes());
        let cloud = PointCloud2 {
            height: 1,
            width: 1,
            fields: vec![PointField {
                name: "ring".to_string(),
                offset: 0,
                datatype: 4,
                count: 1,
            }],
            is_bigendian: true,
            point_step: 2,
            row_step: 2,
            data,
            ..Default::default()
        };
        let grid = pointcloud2_to_grid(&cloud, true).unwrap();
        assert_eq!(grid.column("ring").and_then(|c| c.as_u16()), Some(&[0x0102u16][..]));
    }

    #[test]
    fn test_encode_stamp_and_frame() {
        let columns = vec![Column::new("x", vec![1.0f32])];
        let grid = RecordGrid::from_columns(GridShape::Flat(1), columns).unwrap();
        let stamp = Time { sec: 3, nanosec: 4 };
        let options = EncodeOptions::default()
            .with_frame_id("lidar")
            .with_stamp(stamp)
            .with_endianness(Endianness::Big);
        let cloud = grid_to_pointcloud2(&grid, &options).unwrap();
        assert_eq!(cloud.header.frame_id, "lidar");
        assert_eq!(cloud.header.stamp, stamp);
        assert!(cloud.is_bigendian);
        assert_eq!(cloud.data, 1.0f32.to_be_bytes());
        assert_eq!((cloud.height, cloud.width), (1, 1));
    }

    #[test]
    fn test_encode_rejects_unmapped_element_type() {
        let columns = vec![Column::new("t", vec![1u64])];
        let grid = RecordGrid::from_columns(GridShape::Flat(1), columns).unwrap();
        let err = grid_to_pointcloud2(&grid, &EncodeOptions::default()).unwrap_err();
        assert_eq!(err, CodecError::unsupported_type("uint64"));
    }
}
