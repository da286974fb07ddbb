// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use serde::{Deserialize, Serialize};

use super::{Header, Pose, PoseStamped, PoseWithCovariance, Time, TwistWithCovariance};

/// `nav_msgs/MapMetaData`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapMetaData {
    #[serde(default)]
    pub map_load_time: Time,
    pub resolution: f32,
    pub width: u32,
    pub height: u32,
    pub origin: Pose,
}

/// `nav_msgs/OccupancyGrid`.
///
/// Cells are row-major, `-1` unknown and `0..=100` occupancy probability.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OccupancyGrid {
    #[serde(default)]
    pub header: Header,
    pub info: MapMetaData,
    pub data: Vec<i8>,
}

/// `nav_msgs/Odometry`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Odometry {
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub child_frame_id: String,
    pub pose: PoseWithCovariance,
    pub twist: TwistWithCovariance,
}

/// `nav_msgs/Path`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub header: Header,
    pub poses: Vec<PoseStamped>,
}
