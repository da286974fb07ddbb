// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual roboarray binary against JSON messages
//! written to a scratch directory.

mod common;

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use common::{sample_points, xyz_cloud, TempDir};
use roboarray::msgs::{PointCloud2, WireMessage};
use roboarray::pointcloud::{grid_to_pointcloud2, Column, EncodeOptions, GridShape, RecordGrid};

/// Get the path to the built roboarray binary
fn roboarray_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    // The test binary is in target/debug/deps/
    // The roboarray binary is in target/debug/
    path.pop(); // deps
    path.pop(); // debug or release
    path.push(format!("roboarray{}", std::env::consts::EXE_SUFFIX));
    path
}

/// Run roboarray with arguments
fn run(args: &[&str]) -> Output {
    let bin = roboarray_bin();
    Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run roboarray and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run roboarray and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn write_cloud(dir: &TempDir, name: &str, cloud: &PointCloud2) -> String {
    path_str(&dir.write(name, &cloud.to_json().unwrap()))
}

fn colour_cloud() -> PointCloud2 {
    let grid = RecordGrid::from_columns(
        GridShape::Flat(2),
        vec![
            Column::new("x", vec![1.0f32, 2.0]),
            Column::new("y", vec![3.0f32, 4.0]),
            Column::new("z", vec![5.0f32, 6.0]),
            Column::new("r", vec![255u8, 1]),
            Column::new("g", vec![0u8, 2]),
            Column::new("b", vec![128u8, 3]),
        ],
    )
    .unwrap();
    grid_to_pointcloud2(&grid, &EncodeOptions::default().with_frame_id("lidar")).unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("ROS message array toolkit"));
    assert!(output.contains("cloud"));
    assert!(output.contains("map"));
    assert!(output.contains("image"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("roboarray"));
}

#[test]
fn test_cli_invalid_subcommand() {
    let stderr = run_err(&["nonexistent"]);
    assert!(stderr.contains("unrecognized") || stderr.contains("unknown"));
}

// ============================================================================
// Cloud Tests
// ============================================================================

#[test]
fn test_cloud_info_multiple_files() {
    let dir = TempDir::new("cloud_info");
    let first = write_cloud(&dir, "a.json", &xyz_cloud(1, 3, 16, &sample_points(3)));
    let second = write_cloud(&dir, "b.json", &xyz_cloud(2, 2, 12, &sample_points(4)));

    let output = run_ok(&["cloud", "info", &first, &second]);
    assert!(output.contains("Size: 1 x 3 (3 points)"));
    assert!(output.contains("Size: 2 x 2 (4 points)"));
    assert!(output.contains("Point step: 16 bytes"));
    assert!(output.contains("Padding: 4 bytes"));
    assert!(output.find("a.json") < output.find("b.json"));
}

#[test]
fn test_cloud_info_reports_bad_file() {
    let dir = TempDir::new("cloud_bad");
    let mut cloud = xyz_cloud(1, 2, 12, &sample_points(2));
    cloud.data.truncate(10);
    let bad = write_cloud(&dir, "bad.json", &cloud);

    let stderr = run_err(&["cloud", "info", &bad]);
    assert!(stderr.contains("Shape mismatch"));
}

#[test]
fn test_cloud_xyz_skips_nans() {
    let dir = TempDir::new("cloud_xyz");
    let mut points = sample_points(3);
    points[1][2] = f32::NAN;
    let input = write_cloud(&dir, "scan.json", &xyz_cloud(1, 3, 12, &points));

    let output = run_ok(&["cloud", "xyz", &input]);
    assert_eq!(output.lines().collect::<Vec<_>>(), vec!["0 -1 100", "2 0 98"]);

    let output = run_ok(&["cloud", "xyz", "--keep-nans", &input]);
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn test_cloud_merge_then_split_rgb() {
    let dir = TempDir::new("cloud_rgb");
    let input = write_cloud(&dir, "colour.json", &colour_cloud());
    let merged_path = path_str(&dir.path().join("merged.json"));
    let split_path = path_str(&dir.path().join("split.json"));

    run_ok(&["cloud", "merge-rgb", &input, "-o", &merged_path]);
    let merged =
        PointCloud2::from_json(&std::fs::read_to_string(&merged_path).unwrap()).unwrap();
    let names: Vec<_> = merged.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "z", "rgb"]);
    assert_eq!(merged.point_step, 16);
    assert_eq!(merged.header.frame_id, "lidar");

    run_ok(&["cloud", "split-rgb", &merged_path, "-o", &split_path]);
    let split = PointCloud2::from_json(&std::fs::read_to_string(&split_path).unwrap()).unwrap();
    assert_eq!(split, colour_cloud_with_stamp(&merged));
}

/// The original colour cloud, stamped like `reference`.
fn colour_cloud_with_stamp(reference: &PointCloud2) -> PointCloud2 {
    let mut cloud = colour_cloud();
    cloud.header.stamp = reference.header.stamp;
    cloud
}

#[test]
fn test_cloud_merge_rgb_without_channels_fails() {
    let dir = TempDir::new("cloud_no_rgb");
    let input = write_cloud(&dir, "scan.json", &xyz_cloud(1, 2, 12, &sample_points(2)));
    let stderr = run_err(&["cloud", "merge-rgb", &input]);
    assert!(stderr.contains("Missing field: 'r'"));
}

#[test]
fn test_config_sets_output_byte_order() {
    let dir = TempDir::new("cloud_config");
    let input = write_cloud(&dir, "colour.json", &colour_cloud());
    let config = path_str(&dir.write("roboarray.toml", "[cloud]\nendianness = \"big\"\n"));

    let output = run_ok(&["--config", &config, "cloud", "merge-rgb", &input]);
    let merged = PointCloud2::from_json(&output).unwrap();
    assert!(merged.is_bigendian);
}

#[test]
fn test_missing_config_file_fails() {
    let dir = TempDir::new("cloud_missing_config");
    let input = write_cloud(&dir, "scan.json", &xyz_cloud(1, 1, 12, &sample_points(1)));
    let stderr = run_err(&["--config", "/nonexistent/roboarray.toml", "cloud", "info", &input]);
    assert!(stderr.contains("failed to read config"));
}

// ============================================================================
// Map and Image Tests
// ============================================================================

#[test]
fn test_map_info() {
    let dir = TempDir::new("map_info");
    let input = dir.write(
        "map.json",
        r#"{
            "header": {"frame_id": "map"},
            "info": {
                "resolution": 0.05,
                "width": 2,
                "height": 2,
                "origin": {
                    "position": {"x": 0.0, "y": 0.0, "z": 0.0},
                    "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
                }
            },
            "data": [0, 100, -1, 0]
        }"#,
    );

    let output = run_ok(&["map", "info", &path_str(&input)]);
    assert!(output.contains("Size: 2 x 2 cells"));
    assert!(output.contains("unknown: 1"));
    assert!(output.contains("free: 2"));
    assert!(output.contains("occupied: 1"));
}

#[test]
fn test_image_info() {
    let dir = TempDir::new("image_info");
    let input = dir.write(
        "image.json",
        r#"{
            "header": {"frame_id": "camera"},
            "height": 1,
            "width": 2,
            "encoding": "mono8",
            "is_bigendian": 0,
            "step": 2,
            "data": [10, 200]
        }"#,
    );

    let output = run_ok(&["image", "info", &path_str(&input)]);
    assert!(output.contains("Encoding: mono8"));
    assert!(output.contains("Size: 1 x 2 x 1 (uint8)"));
    assert!(output.contains("[0] min 10 max 200"));
}

#[test]
fn test_image_info_unknown_encoding() {
    let dir = TempDir::new("image_bad");
    let input = dir.write(
        "image.json",
        r#"{"height": 1, "width": 1, "encoding": "yuv422", "is_bigendian": 0,
            "step": 2, "data": [0, 0]}"#,
    );
    let stderr = run_err(&["image", "info", &path_str(&input)]);
    assert!(stderr.contains("Unsupported type: 'yuv422'"));
}

#[test]
fn test_image_info_falls_back_to_config_encoding() {
    let dir = TempDir::new("image_config");
    let input = dir.write(
        "image.json",
        r#"{"height": 1, "width": 1, "encoding": "", "is_bigendian": 0,
            "step": 2, "data": [1, 2]}"#,
    );
    let config = path_str(&dir.write("roboarray.toml", "[image]\nencoding = \"mono16\"\n"));

    let output = run_ok(&["--config", &config, "image", "info", &path_str(&input)]);
    assert!(output.contains("Encoding: mono16"));
    assert!(output.contains("[0] min 513 max 513"));
}

#[test]
fn test_map_info_reports_config_resolution_when_unset() {
    let dir = TempDir::new("map_config");
    let input = dir.write(
        "map.json",
        r#"{
            "info": {
                "resolution": 0.0,
                "width": 1,
                "height": 1,
                "origin": {
                    "position": {"x": 0.0, "y": 0.0, "z": 0.0},
                    "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0}
                }
            },
            "data": [0]
        }"#,
    );
    let config = path_str(&dir.write("roboarray.toml", "[occupancy]\nresolution = 0.25\n"));

    let output = run_ok(&["--config", &config, "map", "info", &path_str(&input)]);
    assert!(output.contains("Resolution: 0.25 m/cell (config)"));
}

#[test]
fn test_config_frame_fills_unstamped_cloud() {
    let dir = TempDir::new("cloud_config_frame");
    let mut cloud = colour_cloud();
    cloud.header.frame_id.clear();
    let input = write_cloud(&dir, "colour.json", &cloud);
    let config = path_str(&dir.write("roboarray.toml", "[cloud]\nframe_id = \"velodyne\"\n"));

    let output = run_ok(&["--config", &config, "cloud", "merge-rgb", &input]);
    let merged = PointCloud2::from_json(&output).unwrap();
    assert_eq!(merged.header.frame_id, "velodyne");
    assert_eq!(merged.is_bigendian, cloud.is_bigendian);
}
