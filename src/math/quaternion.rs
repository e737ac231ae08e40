//! Quaternions for composing 3D rotations.
//!
//! Stored as `(w, x, y, z)` with `w` the scalar part. Only unit quaternions
//! represent rotations; [`Quaternion::from_axis_angle`] always produces one.

use std::ops::Mul;

use super::matrix::Matrix4;
use super::scalar::Scalar;
use super::vector::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion<T> {
    pub w: T,
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Scalar> Quaternion<T> {
    pub const fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(T::ONE, T::ZERO, T::ZERO, T::ZERO)
    }

    /// Pure quaternion (zero scalar part) carrying a 3D vector.
    pub fn pure(v: Vector3<T>) -> Self {
        Self::new(T::ZERO, v.x(), v.y(), v.z())
    }

    /// Rotation of `angle` radians about `axis` (normalized here).
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let axis = axis.unit();
        let half = angle / T::from_f64(2.0);
        let s = half.sin();
        Self::new(half.cos(), axis.x() * s, axis.y() * s, axis.z() * s)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn norm(&self) -> T {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a unit copy; the zero quaternion maps to identity.
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if n == T::ZERO {
            return Self::identity();
        }
        Self::new(self.w / n, self.x / n, self.y / n, self.z / n)
    }

    pub fn vector_part(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotation matrix for a unit quaternion (column-vector convention).
    pub fn to_matrix(&self) -> Matrix4<T> {
        let Self { w, x, y, z } = *self;
        let one = T::ONE;
        let two = T::from_f64(2.0);
        let zero = T::ZERO;
        Matrix4::from_rows([
            [
                one - two * (y * y + z * z),
                two * (x * y - w * z),
                two * (x * z + w * y),
                zero,
            ],
            [
                two * (x * y + w * z),
                one - two * (x * x + z * z),
                two * (y * z - w * x),
                zero,
            ],
            [
                two * (x * z - w * y),
                two * (y * z + w * x),
                one - two * (x * x + y * y),
                zero,
            ],
            [zero, zero, zero, one],
        ])
    }
}

impl<T: Scalar> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl<T: Scalar> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let (a, b) = (self, rhs);
        Self::new(
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        )
    }
}
