// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Conversion defaults loaded from TOML.
//!
//! Every key is optional; a missing section or key falls back to the same
//! default the conversion functions use. Each section has methods that run
//! the matching conversion with its settings.
//!
//! ```toml
//! [cloud]
//! frame_id = "velodyne"
//! squeeze = true
//! endianness = "little"
//!
//! [image]
//! encoding = "mono8"
//!
//! [occupancy]
//! resolution = 0.1
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Endianness, Result};
use crate::image::{
    array_to_raw_image, ImageArray, DEFAULT_IMAGE_ENCODING, DEFAULT_IMAGE_FRAME_ID,
};
use crate::msgs::{Image, OccupancyGrid, Odometry};
use crate::navigation::{
    arrays_to_odometry, OdometryArrays, DEFAULT_CHILD_FRAME_ID, DEFAULT_ODOM_FRAME_ID,
};
use crate::occupancy::{
    array_to_occupancy_grid, map_info, OccupancyArray, DEFAULT_MAP_FRAME_ID, DEFAULT_RESOLUTION,
};
use crate::pointcloud::{EncodeOptions, DEFAULT_FRAME_ID};

/// Failure to load a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoboArrayConfig {
    pub cloud: CloudConfig,
    pub image: ImageConfig,
    pub occupancy: OccupancyConfig,
    pub odometry: OdometryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub frame_id: String,
    /// Collapse single-row clouds to a flat sequence on decode
    pub squeeze: bool,
    /// Byte order of encoded clouds; native when unset
    pub endianness: Option<Endianness>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_FRAME_ID.to_string(),
            squeeze: true,
            endianness: None,
        }
    }
}

impl CloudConfig {
    /// Encode options carrying this section's frame and byte order.
    pub fn encode_options(&self) -> EncodeOptions {
        let options = EncodeOptions::default().with_frame_id(self.frame_id.clone());
        match self.endianness {
            Some(endianness) => options.with_endianness(endianness),
            None => options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub frame_id: String,
    pub encoding: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_IMAGE_FRAME_ID.to_string(),
            encoding: DEFAULT_IMAGE_ENCODING.to_string(),
        }
    }
}

impl ImageConfig {
    /// Encode `array` with the configured encoding and frame.
    pub fn array_to_image(&self, array: &ImageArray) -> Result<Image> {
        array_to_raw_image(array, &self.encoding, &self.frame_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccupancyConfig {
    pub frame_id: String,
    pub resolution: f32,
}

impl Default for OccupancyConfig {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_MAP_FRAME_ID.to_string(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl OccupancyConfig {
    /// Build a map with the configured resolution and frame and an identity
    /// origin.
    pub fn array_to_grid(&self, array: &OccupancyArray) -> Result<OccupancyGrid> {
        let info = map_info(array.height(), array.width(), self.resolution)?;
        array_to_occupancy_grid(array, Some(info), &self.frame_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdometryConfig {
    pub frame_id: String,
    pub child_frame_id: String,
}

impl Default for OdometryConfig {
    fn default() -> Self {
        Self {
            frame_id: DEFAULT_ODOM_FRAME_ID.to_string(),
            child_frame_id: DEFAULT_CHILD_FRAME_ID.to_string(),
        }
    }
}

impl OdometryConfig {
    pub fn arrays_to_odometry(&self, arrays: &OdometryArrays) -> Odometry {
        arrays_to_odometry(arrays, &self.frame_id, &self.child_frame_id)
    }
}

impl RoboArrayConfig {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RoboArrayConfig::from_toml_str("").unwrap();
        assert_eq!(config, RoboArrayConfig::default());
        assert_eq!(config.cloud.frame_id, "base_link");
        assert!(config.cloud.squeeze);
        assert_eq!(config.image.encoding, "bgr8");
        assert_eq!(config.occupancy.resolution, 0.05);
        assert_eq!(config.odometry.child_frame_id, "base_footprint");
    }

    #[test]
    fn test_partial_sections() {
        let config = RoboArrayConfig::from_toml_str(
            r#"
            [cloud]
            frame_id = "velodyne"
            endianness = "big"

            [occupancy]
            resolution = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.cloud.frame_id, "velodyne");
        assert!(config.cloud.squeeze);
        assert_eq!(config.occupancy.frame_id, "map");

        let options = config.cloud.encode_options();
        assert_eq!(options.frame_id, "velodyne");
        assert_eq!(options.endianness, Endianness::Big);
    }

    #[test]
    fn test_sections_drive_conversions() {
        let config = RoboArrayConfig::from_toml_str(
            r#"
            [image]
            frame_id = "left"
            encoding = "mono8"

            [occupancy]
            frame_id = "world"
            resolution = 0.1

            [odometry]
            child_frame_id = "base_link"
            "#,
        )
        .unwrap();

        let pixels = ImageArray::new(1, 2, 1, vec![3u8, 4]).unwrap();
        let image = config.image.array_to_image(&pixels).unwrap();
        assert_eq!(image.encoding, "mono8");
        assert_eq!(image.header.frame_id, "left");
        assert_eq!(image.data, vec![3, 4]);

        let cells = OccupancyArray::new(2, 2, vec![0, 100, -1, 0]).unwrap();
        let map = config.occupancy.array_to_grid(&cells).unwrap();
        assert_eq!(map.info.resolution, 0.1);
        assert_eq!((map.info.height, map.info.width), (2, 2));
        assert_eq!(map.header.frame_id, "world");

        let odometry = config.odometry.arrays_to_odometry(&OdometryArrays {
            position: [0.0; 13],
            velocity: [0.0; 6],
        });
        assert_eq!(odometry.header.frame_id, "odom");
        assert_eq!(odometry.child_frame_id, "base_link");
    }

    #[test]
    fn test_bad_resolution_is_rejected_on_use() {
        let config = RoboArrayConfig::from_toml_str("[occupancy]\nresolution = -1.0").unwrap();
        let cells = OccupancyArray::new(1, 1, vec![0]).unwrap();
        assert!(config.occupancy.array_to_grid(&cells).is_err());
    }

    #[test]
    fn test_invalid_config() {
        let err = RoboArrayConfig::from_toml_str("[cloud]\nsqueeze = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RoboArrayConfig::from_file("/nonexistent/roboarray.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/roboarray.toml"));
    }
}
