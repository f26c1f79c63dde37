//! Conversion between the host editor's axes and the engine's axes
//!
//! The host is right-handed Z-up; the engine is left-handed Y-up. Export maps
//! host `(x, y, z)` to engine `(-x, z, -y)`, times a uniform scale.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Fixed-point angle units per radian (2^16 / 2π)
pub const ANGLE_UNIT: f64 = 10430.37835;

/// A fixed axis remap plus uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    matrix: Matrix4<f64>,
}

impl CoordinateTransform {
    /// Host-to-engine transform with the given scale
    pub fn export(scale: f64) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            -scale, 0.0,    0.0,   0.0,
            0.0,    0.0,    scale, 0.0,
            0.0,    -scale, 0.0,   0.0,
            0.0,    0.0,    0.0,   1.0,
        );
        Self { matrix }
    }

    /// Engine-to-host transform, the inverse of [`CoordinateTransform::export`]
    ///
    /// A zero scale has no inverse; it is treated as 1.
    pub fn import(scale: f64) -> Self {
        let s = if scale == 0.0 { 1.0 } else { 1.0 / scale };
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            -s,  0.0, 0.0, 0.0,
            0.0, 0.0, -s,  0.0,
            0.0, s,   0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Wrap an arbitrary 4x4 matrix
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// The full 4x4 matrix
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The 3x3 part, used for bare translation vectors
    pub fn rotation(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// This transform applied after `world`
    pub fn compose(&self, world: &Matrix4<f64>) -> Self {
        Self {
            matrix: self.matrix * world,
        }
    }

    /// Transform a point; the homogeneous `w` is dropped, not divided by
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let h = self.matrix * point.to_homogeneous();
        Point3::new(h.x, h.y, h.z)
    }

    /// Transform a translation vector by the 3x3 part only
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * vector
    }

    /// Whether the transform mirrors (negative determinant)
    pub fn is_mirroring(&self) -> bool {
        self.rotation().determinant() < 0.0
    }
}

/// Convert host Euler angles (radians, XYZ) to engine fixed-point angles
///
/// The engine's heading/pitch/bank order is `(-z, x, -y)` of the host angles.
/// Values round to the nearest integer, ties to even.
pub fn to_fixed_angles(euler: &Vector3<f64>) -> [i32; 3] {
    [
        fixed_angle(-euler.z),
        fixed_angle(euler.x),
        fixed_angle(-euler.y),
    ]
}

fn fixed_angle(radians: f64) -> i32 {
    (radians * ANGLE_UNIT).round_ties_even() as i32
}
