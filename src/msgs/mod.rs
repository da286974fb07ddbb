// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Strongly-typed wire messages.
//!
//! These structs mirror the dictionary shape that a rosbridge client sends
//! and receives for each ROS message type. Field access is plain struct
//! access; the only dynamic part left is JSON (de)serialization through
//! [`WireMessage`].

pub mod bytes;
mod geometry_msgs;
mod nav_msgs;
mod sensor_msgs;
mod std_msgs;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::Result;

pub use geometry_msgs::{
    Point, Pose, PoseStamped, PoseWithCovariance, Quaternion, Transform, Twist,
    TwistWithCovariance, Vector3,
};
pub use nav_msgs::{MapMetaData, OccupancyGrid, Odometry, Path};
pub use sensor_msgs::{Image, PointCloud2, PointField};
pub use std_msgs::{Header, Time};

/// A message that travels as JSON on the wire.
pub trait WireMessage: Serialize + DeserializeOwned {
    /// Fully-qualified ROS type name (e.g. "sensor_msgs/msg/PointCloud2").
    const TYPE_NAME: &'static str;

    /// Parse a message from JSON text.
    fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a message from JSON bytes.
    fn from_json_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Serialize the message to compact JSON.
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the message to pretty-printed JSON.
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

macro_rules! wire_message {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl WireMessage for $ty {
                const TYPE_NAME: &'static str = $name;
            }
        )*
    };
}

wire_message! {
    PointCloud2 => "sensor_msgs/msg/PointCloud2",
    Image => "sensor_msgs/msg/Image",
    OccupancyGrid => "nav_msgs/msg/OccupancyGrid",
    Odometry => "nav_msgs/msg/Odometry",
    Path => "nav_msgs/msg/Path",
    Pose => "geometry_msgs/msg/Pose",
    PoseStamped => "geometry_msgs/msg/PoseStamped",
    Transform => "geometry_msgs/msg/Transform",
}
