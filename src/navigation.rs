// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Odometry and path flattening.

use crate::msgs::{
    Header, Odometry, Path, Point, Pose, PoseWithCovariance, Quaternion, Twist,
    TwistWithCovariance, Vector3,
};

pub const DEFAULT_ODOM_FRAME_ID: &str = "odom";
pub const DEFAULT_CHILD_FRAME_ID: &str = "base_footprint";

/// Flat odometry state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdometryArrays {
    /// `x, y, z, qx, qy, qz, qw, vx, vy, vz, wx, wy, wz`
    pub position: [f64; 13],
    /// `vx, vy, vz, wx, wy, wz`
    pub velocity: [f64; 6],
}

pub fn odometry_to_arrays(odometry: &Odometry) -> OdometryArrays {
    let Pose {
        position: p,
        orientation: q,
    } = odometry.pose.pose;
    let Twist {
        linear: v,
        angular: w,
    } = odometry.twist.twist;
    let velocity = [v.x, v.y, v.z, w.x, w.y, w.z];

    let mut position = [0.0; 13];
    position[..7].copy_from_slice(&[p.x, p.y, p.z, q.x, q.y, q.z, q.w]);
    position[7..].copy_from_slice(&velocity);
    OdometryArrays { position, velocity }
}

/// Build an odometry message stamped now.
///
/// The pose comes from the first seven `position` entries and the twist from
/// `velocity`; covariances are zero.
pub fn arrays_to_odometry(
    arrays: &OdometryArrays,
    frame_id: &str,
    child_frame_id: &str,
) -> Odometry {
    let p = &arrays.position;
    let v = &arrays.velocity;
    Odometry {
        header: Header::now(frame_id),
        child_frame_id: child_frame_id.to_string(),
        pose: PoseWithCovariance {
            pose: Pose {
                position: Point {
                    x: p[0],
                    y: p[1],
                    z: p[2],
                },
                orientation: Quaternion {
                    x: p[3],
                    y: p[4],
                    z: p[5],
                    w: p[6],
                },
            },
            ..Default::default()
        },
        twist: TwistWithCovariance {
            twist: Twist {
                linear: Vector3 {
                    x: v[0],
                    y: v[1],
                    z: v[2],
                },
                angular: Vector3 {
                    x: v[3],
                    y: v[4],
                    z: v[5],
                },
            },
            ..Default::default()
        },
    }
}

/// `[x, y]` of every pose in the path, in order.
pub fn path_to_array(path: &Path) -> Vec<[f64; 2]> {
    path.poses
        .iter()
        .map(|stamped| [stamped.pose.position.x, stamped.pose.position.y])
        .collect()
}
