// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use serde::{Deserialize, Serialize};

use super::Header;

/// `sensor_msgs/PointField`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointField {
    pub name: String,
    pub offset: u32,
    /// Datatype code, 1 (int8) through 8 (float64); other codes are kept
    /// so decoding can reject them as unsupported
    pub datatype: u32,
    pub count: u32,
}

/// `sensor_msgs/PointCloud2`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCloud2 {
    #[serde(default)]
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub fields: Vec<PointField>,
    #[serde(default)]
    pub is_bigendian: bool,
    pub point_step: u32,
    #[serde(default)]
    pub row_step: u32,
    #[serde(with = "super::bytes")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub is_dense: bool,
}

/// `sensor_msgs/Image`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub encoding: String,
    #[serde(default)]
    pub is_bigendian: u8,
    pub step: u32,
    #[serde(with = "super::bytes")]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_cloud_from_rosbridge_json() {
        let json = r#"{
            "header": {"stamp": {"sec": 1, "nanosec": 2}, "frame_id": "lidar"},
            "height": 1,
            "width": 1,
            "fields": [{"name": "x", "offset": 0, "datatype": 7, "count": 1}],
            "is_bigendian": false,
            "point_step": 4,
            "row_step": 4,
            "data": "AACAPw==",
            "is_dense": true
        }"#;
        let cloud: PointCloud2 = serde_json::from_str(json).unwrap();
        assert_eq!(cloud.header.frame_id, "lidar");
        assert_eq!(cloud.fields[0].datatype, 7);
        assert_eq!(cloud.data, 1.0f32.to_le_bytes());
    }
}
