// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use roboarray::msgs::{PointCloud2, PointField};

// ============================================================================
// Cloud builders
// ============================================================================

/// A float32 field descriptor with count 1.
pub fn float_field(name: &str, offset: u32) -> PointField {
    PointField {
        name: name.to_string(),
        offset,
        datatype: 7,
        count: 1,
    }
}

/// Little-endian xyz float32 cloud with `point_step` bytes per point.
///
/// Bytes past offset 12 in each record are filled with `0xAA`.
pub fn xyz_cloud(height: u32, width: u32, point_step: u32, points: &[[f32; 3]]) -> PointCloud2 {
    assert_eq!(points.len(), (height * width) as usize);
    assert!(point_step >= 12);
    let mut data = Vec::with_capacity(points.len() * point_step as usize);
    for point in points {
        for v in point {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data.resize(data.len() + point_step as usize - 12, 0xAA);
    }
    PointCloud2 {
        height,
        width,
        fields: vec![
            float_field("x", 0),
            float_field("y", 4),
            float_field("z", 8),
        ],
        is_bigendian: false,
        point_step,
        row_step: point_step * width,
        data,
        is_dense: true,
        ..Default::default()
    }
}

/// `n` distinct finite points.
pub fn sample_points(n: usize) -> Vec<[f32; 3]> {
    (0..n)
        .map(|i| {
            let i = i as f32;
            [i, i * 0.5 - 1.0, 100.0 - i]
        })
        .collect()
}

// ============================================================================
// Temp directories
// ============================================================================

/// A scratch directory removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "roboarray_{label}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` to `name` inside the directory.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let file = self.path.join(name);
        std::fs::write(&file, contents).unwrap();
        file
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
