// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `nav_msgs/OccupancyGrid` ⇄ 2-D cell array.

use tracing::debug;

use crate::core::{to_wire_u32, CodecError, Result};
use crate::msgs::{Header, MapMetaData, OccupancyGrid, Pose};

/// Cell value for unexplored space.
pub const UNKNOWN_CELL: i8 = -1;

/// Map resolution (metres per cell) used when no metadata is given.
pub const DEFAULT_RESOLUTION: f32 = 0.05;

pub const DEFAULT_MAP_FRAME_ID: &str = "map";

/// Row-major `height × width` occupancy cells.
///
/// Values are occupancy probabilities in `0..=100`; [`UNKNOWN_CELL`] marks
/// cells that are masked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyArray {
    height: usize,
    width: usize,
    data: Vec<i8>,
}

impl OccupancyArray {
    pub fn new(height: usize, width: usize, data: Vec<i8>) -> Result<Self> {
        if data.len() != height * width {
            return Err(CodecError::shape_mismatch(
                "occupancy cells",
                format!("{} ({height} x {width})", height * width),
                data.len(),
            ));
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Cells in row-major order.
    pub fn data(&self) -> &[i8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<i8> {
        self.data
    }

    /// Raw cell value, including [`UNKNOWN_CELL`].
    pub fn get(&self, row: usize, col: usize) -> Option<i8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Cell value with unknown cells masked to `None`.
    pub fn known(&self, row: usize, col: usize) -> Option<i8> {
        self.get(row, col).filter(|&v| v != UNKNOWN_CELL)
    }

    /// One flag per cell, set where the cell is unknown.
    pub fn mask(&self) -> Vec<bool> {
        self.data.iter().map(|&v| v == UNKNOWN_CELL).collect()
    }

    pub fn unknown_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == UNKNOWN_CELL).count()
    }
}

/// Copy an occupancy grid's cells into a `height × width` array.
pub fn occupancy_grid_to_array(grid: &OccupancyGrid) -> Result<OccupancyArray> {
    OccupancyArray::new(
        grid.info.height as usize,
        grid.info.width as usize,
        grid.data.clone(),
    )
}

/// Metadata for an unplaced map of the given size.
pub fn default_map_info(height: usize, width: usize) -> Result<MapMetaData> {
    map_info(height, width, DEFAULT_RESOLUTION)
}

/// Metadata for a map of the given size and resolution with an identity
/// origin.
pub fn map_info(height: usize, width: usize, resolution: f32) -> Result<MapMetaData> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(CodecError::invalid_value(
            "map resolution",
            format!("{resolution} is not a positive finite number"),
        ));
    }
    Ok(MapMetaData {
        resolution,
        width: to_wire_u32("map width", width)?,
        height: to_wire_u32("map height", height)?,
        origin: Pose::default(),
        ..Default::default()
    })
}

/// Build an occupancy grid from an array.
///
/// Without `info`, the map gets [`DEFAULT_RESOLUTION`] and an identity
/// origin. Given metadata must agree with the array's dimensions.
pub fn array_to_occupancy_grid(
    array: &OccupancyArray,
    info: Option<MapMetaData>,
    frame_id: &str,
) -> Result<OccupancyGrid> {
    let info = match info {
        Some(info) => {
            let dims = (info.height as usize, info.width as usize);
            if dims != (array.height, array.width) {
                return Err(CodecError::shape_mismatch(
                    "map metadata dimensions",
                    format!("{} x {}", array.height, array.width),
                    format!("{} x {}", dims.0, dims.1),
                ));
            }
            info
        }
        None => default_map_info(array.height, array.width)?,
    };

    debug!(
        height = array.height,
        width = array.width,
        resolution = info.resolution,
        unknown = array.unknown_count(),
        "encoded occupancy grid"
    );
    Ok(OccupancyGrid {
        header: Header::now(frame_id),
        info,
        data: array.data.clone(),
    })
}
