//! Perspective projection parameters.
//!
//! [`Projection`] is the single source of truth for the field of view,
//! aspect ratio and clip planes; the matrix is derived on demand.

use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Width divided by height.
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// `z_near` must be positive and smaller than `z_far`.
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians, derived from the vertical one.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Called on window resize.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Left-handed perspective matrix: view Z in `[near, far]` maps to NDC Z
    /// in `[0, 1]` and clip W equals view Z.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn fov_x_matches_aspect_ratio() {
        let proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_x(), proj.fov_y(), epsilon = 1e-6);

        let wide = Projection::new(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
        assert!(wide.fov_x() > wide.fov_y());
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn aspect_ratio_narrows_x() {
        let mut proj = Projection::new(FRAC_PI_2, 1.0, 1.0, 10.0);
        proj.set_aspect_ratio(2.0);

        let clip = proj.matrix() * Vec4::new(2.0, 2.0, 2.0, 1.0);
        // 90 degree vertical fov: y/z = 1 reaches the top edge.
        assert_relative_eq!(clip.y() / clip.w(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(clip.x() / clip.w(), 0.5, epsilon = 1e-6);
    }
}
