// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Adapter integration tests.
//!
//! Messages are parsed from rosbridge-shaped JSON, converted to arrays and
//! back.

use roboarray::geometry::{
    array_to_point, array_to_vector3, matrix_to_transform, pose_to_matrix, transform_to_matrix,
};
use roboarray::image::{array_to_raw_image, raw_image_to_array, ImageArray};
use roboarray::msgs::{Image, OccupancyGrid, Odometry, Path, Pose, Transform, WireMessage};
use roboarray::navigation::{arrays_to_odometry, odometry_to_arrays, path_to_array};
use roboarray::occupancy::{
    array_to_occupancy_grid, occupancy_grid_to_array, OccupancyArray, UNKNOWN_CELL,
};
use roboarray::{CodecError, ElementType};

// ============================================================================
// Image
// ============================================================================

#[test]
fn test_image_from_rosbridge_json() {
    // 2x1 bgr8, base64 of [1, 2, 3, 4, 5, 6]
    let json = r#"{
        "header": {"stamp": {"secs": 10, "nsecs": 5}, "frame_id": "camera"},
        "height": 1,
        "width": 2,
        "encoding": "bgr8",
        "is_bigendian": 0,
        "step": 6,
        "data": "AQIDBAUG"
    }"#;
    let image = Image::from_json(json).unwrap();
    assert_eq!(image.header.stamp.sec, 10);

    let pixels = raw_image_to_array(&image).unwrap();
    assert_eq!((pixels.height(), pixels.width(), pixels.channels()), (1, 2, 3));
    assert_eq!(pixels.element_type(), ElementType::UInt8);
    assert_eq!(pixels.get_f64(0, 1, 2), Some(6.0));

    let echoed = array_to_raw_image(&pixels, "bgr8", "camera").unwrap();
    assert_eq!(echoed.data, image.data);
    assert_eq!(echoed.step, image.step);
}

#[test]
fn test_float_image_round_trip() {
    let depth = ImageArray::new(2, 2, 1, vec![0.5f32, 1.25, f32::NAN, 3.0]).unwrap();
    let image = array_to_raw_image(&depth, "32FC1", "depth").unwrap();
    assert_eq!(image.step, 8);

    let decoded = raw_image_to_array(&image).unwrap();
    let values = decoded.data().as_f32().unwrap();
    assert_eq!(values[1], 1.25);
    assert!(values[2].is_nan());
}

#[test]
fn test_image_encoding_mismatch_is_not_cast() {
    let mono = ImageArray::new(1, 1, 1, vec![7u8]).unwrap();
    let err = array_to_raw_image(&mono, "mono16", "cam").unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch { .. }), "{err}");
}

#[test]
fn test_short_pixel_buffer_is_rejected_up_front() {
    let err = ImageArray::new(2, 2, 1, vec![1u8]).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch { .. }), "{err}");
}

// ============================================================================
// Occupancy grid
// ============================================================================

#[test]
fn test_short_cell_buffer_is_rejected_up_front() {
    let err = OccupancyArray::new(2, 2, vec![0]).unwrap_err();
    assert!(matches!(err, CodecError::ShapeMismatch { .. }), "{err}");
}

#[test]
fn test_occupancy_grid_round_trip() {
    let json = r#"{
        "header": {"stamp": {"sec": 0, "nanosec": 0}, "frame_id": "map"},
        "info": {
            "resolution": 0.1,
            "width": 3,
            "height": 2,
            "origin": {
                "position": {"x": -1.0, "y": -2.0, "z": 0.0},
                "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
            }
        },
        "data": [0, 0, 100, -1, -1, 50]
    }"#;
    let map = OccupancyGrid::from_json(json).unwrap();
    let cells = occupancy_grid_to_array(&map).unwrap();
    assert_eq!((cells.height(), cells.width()), (2, 3));
    assert_eq!(cells.get(1, 0), Some(UNKNOWN_CELL));
    assert_eq!(cells.known(1, 0), None);
    assert_eq!(cells.known(1, 2), Some(50));

    let rebuilt = array_to_occupancy_grid(&cells, Some(map.info.clone()), "map").unwrap();
    assert_eq!(rebuilt.info, map.info);
    assert_eq!(rebuilt.data, map.data);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_transform_matrix_round_trip() {
    let json = r#"{
        "translation": {"x": 0.5, "y": -1.0, "z": 2.0},
        "rotation": {"x": 0.0, "y": 0.0, "z": 0.6, "w": 0.8}
    }"#;
    let transform = Transform::from_json(json).unwrap();
    let matrix = transform_to_matrix(&transform);
    assert_eq!(matrix[3], [0.0, 0.0, 0.0, 1.0]);
    assert!((matrix[0][3] - 0.5).abs() < 1e-12);

    let back = matrix_to_transform(&matrix);
    assert!((back.translation.y + 1.0).abs() < 1e-12);
    assert!((back.rotation.z - 0.6).abs() < 1e-12);
    assert!((back.rotation.w - 0.8).abs() < 1e-12);
}

#[test]
fn test_pose_matrix_maps_points() {
    let pose = Pose::default();
    let matrix = pose_to_matrix(&pose);
    for (i, row) in matrix.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            assert_eq!(*v, if i == j { 1.0 } else { 0.0 });
        }
    }
}

#[test]
fn test_homogeneous_conventions() {
    assert!(array_to_vector3(&[1.0, 0.0, 0.0, 0.0]).is_ok());
    assert!(matches!(
        array_to_vector3(&[1.0, 0.0, 0.0, 1.0]).unwrap_err(),
        CodecError::InvalidValue { .. }
    ));
    let p = array_to_point(&[3.0, 6.0, 9.0, 3.0]).unwrap();
    assert_eq!((p.x, p.y, p.z), (1.0, 2.0, 3.0));
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_odometry_arrays_round_trip() {
    let json = r#"{
        "header": {"stamp": {"sec": 1, "nanosec": 2}, "frame_id": "odom"},
        "child_frame_id": "base_link",
        "pose": {"pose": {
            "position": {"x": 1.0, "y": 2.0, "z": 0.0},
            "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
        }},
        "twist": {"twist": {
            "linear": {"x": 0.3, "y": 0.0, "z": 0.0},
            "angular": {"x": 0.0, "y": 0.0, "z": -0.1}
        }}
    }"#;
    let odometry = Odometry::from_json(json).unwrap();
    let arrays = odometry_to_arrays(&odometry);
    assert_eq!(arrays.position[..3], [1.0, 2.0, 0.0]);
    assert_eq!(arrays.position[6], 1.0);
    assert_eq!(arrays.position[7], 0.3);
    assert_eq!(arrays.velocity, [0.3, 0.0, 0.0, 0.0, 0.0, -0.1]);

    let rebuilt = arrays_to_odometry(&arrays, "odom", "base_link");
    assert_eq!(rebuilt.pose, odometry.pose);
    assert_eq!(rebuilt.twist, odometry.twist);
    assert_eq!(rebuilt.child_frame_id, "base_link");
}

#[test]
fn test_path_to_array() {
    let json = r#"{
        "header": {"frame_id": "map"},
        "poses": [
            {"pose": {"position": {"x": 0.0, "y": 0.0, "z": 0.0},
                      "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}}},
            {"pose": {"position": {"x": 1.5, "y": -0.5, "z": 0.0},
                      "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}}}
        ]
    }"#;
    let path = Path::from_json(json).unwrap();
    assert_eq!(path_to_array(&path), vec![[0.0, 0.0], [1.5, -0.5]]);
}
