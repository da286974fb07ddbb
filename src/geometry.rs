// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Geometry message ⇄ array conversion.
//!
//! Quaternions are always ordered `x, y, z, w`. Rigid transforms are 4×4
//! row-major matrices (`m[row][col]`, translation in the last column); the
//! rotation algebra is done by `glam`.

use glam::{DMat3, DMat4, DQuat, DVec3, DVec4};
use tracing::warn;

use crate::core::{CodecError, Result};
use crate::msgs::{Point, Pose, Quaternion, Transform, Vector3};

/// Row-major 4×4 matrix.
pub type Matrix4 = [[f64; 4]; 4];

pub fn vector3_to_array(v: &Vector3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

/// Homogeneous form of a direction: `w = 0`.
pub fn vector3_to_homogeneous(v: &Vector3) -> [f64; 4] {
    [v.x, v.y, v.z, 0.0]
}

/// Accepts `[x, y, z]` or a homogeneous `[x, y, z, 0]`.
pub fn array_to_vector3(values: &[f64]) -> Result<Vector3> {
    match *values {
        [x, y, z] => Ok(Vector3 { x, y, z }),
        [x, y, z, w] if w == 0.0 => Ok(Vector3 { x, y, z }),
        [_, _, _, w] => Err(CodecError::invalid_value(
            "homogeneous vector",
            format!("direction must have w = 0, got {w}"),
        )),
        _ => Err(CodecError::shape_mismatch(
            "vector length",
            "3 or 4",
            values.len(),
        )),
    }
}

pub fn point_to_array(p: &Point) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Homogeneous form of a point: `w = 1`.
pub fn point_to_homogeneous(p: &Point) -> [f64; 4] {
    [p.x, p.y, p.z, 1.0]
}

/// Accepts `[x, y, z]` or a homogeneous `[x, y, z, w]`, divided through by `w`.
pub fn array_to_point(values: &[f64]) -> Result<Point> {
    match *values {
        [x, y, z] => Ok(Point { x, y, z }),
        [_, _, _, w] if w == 0.0 => Err(CodecError::invalid_value(
            "homogeneous point",
            "w = 0 is a point at infinity",
        )),
        [x, y, z, w] => Ok(Point {
            x: x / w,
            y: y / w,
            z: z / w,
        }),
        _ => Err(CodecError::shape_mismatch(
            "point length",
            "3 or 4",
            values.len(),
        )),
    }
}

/// `[x, y, z, w]`
pub fn quat_to_array(q: &Quaternion) -> [f64; 4] {
    [q.x, q.y, q.z, q.w]
}

/// Accepts `[x, y, z, w]`; the values are kept as given.
pub fn array_to_quat(values: &[f64]) -> Result<Quaternion> {
    match *values {
        [x, y, z, w] => Ok(Quaternion { x, y, z, w }),
        _ => Err(CodecError::shape_mismatch(
            "quaternion length",
            4,
            values.len(),
        )),
    }
}

pub fn transform_to_matrix(t: &Transform) -> Matrix4 {
    rigid_matrix(
        DVec3::new(t.translation.x, t.translation.y, t.translation.z),
        &t.rotation,
    )
}

pub fn matrix_to_transform(m: &Matrix4) -> Transform {
    let (translation, rotation) = decompose(m);
    Transform {
        translation: Vector3 {
            x: translation.x,
            y: translation.y,
            z: translation.z,
        },
        rotation,
    }
}

pub fn pose_to_matrix(p: &Pose) -> Matrix4 {
    rigid_matrix(
        DVec3::new(p.position.x, p.position.y, p.position.z),
        &p.orientation,
    )
}

pub fn matrix_to_pose(m: &Matrix4) -> Pose {
    let (translation, orientation) = decompose(m);
    Pose {
        position: Point {
            x: translation.x,
            y: translation.y,
            z: translation.z,
        },
        orientation,
    }
}

pub fn matrices_to_transforms(matrices: &[Matrix4]) -> Vec<Transform> {
    matrices.iter().map(matrix_to_transform).collect()
}

pub fn matrices_to_poses(matrices: &[Matrix4]) -> Vec<Pose> {
    matrices.iter().map(matrix_to_pose).collect()
}

/// Unit rotation for a message quaternion.
///
/// The quaternion is normalised first; a zero quaternion reads as identity.
fn to_dquat(q: &Quaternion) -> DQuat {
    match DVec4::new(q.x, q.y, q.z, q.w).try_normalize() {
        Some(v) => DQuat::from_vec4(v),
        None => {
            warn!(?q, "zero-length quaternion; using identity rotation");
            DQuat::IDENTITY
        }
    }
}

fn rigid_matrix(translation: DVec3, rotation: &Quaternion) -> Matrix4 {
    // glam is column-major.
    DMat4::from_rotation_translation(to_dquat(rotation), translation)
        .transpose()
        .to_cols_array_2d()
}

fn decompose(m: &Matrix4) -> (DVec3, Quaternion) {
    let mat = DMat4::from_cols_array_2d(m).transpose();
    let mut q = DQuat::from_mat3(&DMat3::from_mat4(mat)).normalize();
    if q.w < 0.0 {
        q = -q;
    }
    let rotation = Quaternion {
        x: q.x,
        y: q.y,
        z: q.z,
        w: q.w,
    };
    (mat.w_axis.truncate(), rotation)
}
