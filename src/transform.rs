//! Transform component for 3D objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (Euler angles), scale and the pivot they act about.

use crate::math::{Mat4, Vec3};

/// A 3D transform with position, rotation (Euler angles), scale and pivot.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(0.0, 0.0, 3.0)
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // Euler angles in radians: x=pitch, y=yaw, z=roll
    scale: Vec3,
    pivot: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            pivot: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position += delta;
        self
    }

    // ============ Rotation ============

    /// Euler angles in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation += delta;
        self
    }

    /// Rotate around the X axis (pitch).
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation[0] += angle;
        self
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation[1] += angle;
        self
    }

    /// Rotate around the Z axis (roll).
    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation[2] += angle;
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Pivot ============

    /// Model-space point that rotation and scale act about.
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn set_pivot(&mut self, pivot: Vec3) -> &mut Self {
        self.pivot = pivot;
        self
    }

    // ============ Matrix Generation ============

    /// Model matrix: `Translation * Rx * Ry * Rz * Scale * Translation(-pivot)`.
    ///
    /// The pivot is moved to the origin first, so after the transform it
    /// sits at `position`.
    pub fn to_matrix(&self) -> Mat4 {
        let [px, py, pz] = self.pivot.components;
        let [sx, sy, sz] = self.scale.components;
        let [rx, ry, rz] = self.rotation.components;
        let [tx, ty, tz] = self.position.components;

        Mat4::translation(tx, ty, tz)
            * Mat4::rotation_xyz(rx, ry, rz)
            * Mat4::scaling(sx, sy, sz)
            * Mat4::translation(-px, -py, -pz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.pivot(), Vec3::ZERO);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_y(0.5)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y(), 0.5);
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));

        t.translate(Vec3::new(1.0, 0.0, 0.0)).rotate_x(0.25).rotate_z(0.75);
        assert_eq!(t.position(), Vec3::new(2.0, 2.0, 3.0));
        assert_eq!(t.rotation(), Vec3::new(0.25, 0.5, 0.75));
    }

    #[test]
    fn pivot_ends_up_at_position() {
        let mut t = Transform::new();
        t.set_pivot(Vec3::new(0.5, 0.5, 0.5))
            .set_position_xyz(0.0, 0.0, 4.0)
            .set_rotation_xyz(0.3, 1.1, -0.7);

        let m = t.to_matrix();
        let p = m.transform_point(Vec3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(p.x(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z(), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn scale_applies_before_rotation() {
        let mut t = Transform::new();
        t.set_scale(Vec3::new(2.0, 1.0, 1.0)).rotate_z(FRAC_PI_2);

        // (1, 0, 0) -> scaled to (2, 0, 0) -> rotated onto +Y.
        let p = t.to_matrix().transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y(), 2.0, epsilon = 1e-6);
    }
}
