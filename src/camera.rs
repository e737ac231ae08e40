//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! Orientation is stored as an orthonormal basis (direction, up, right).
//! Mouse look rotates the direction with quaternions: yaw about world up,
//! pitch about the camera's right axis. The basis is rebuilt from the
//! direction after every change, so it cannot drift.

use crate::config::CameraSettings;
use crate::events::{Event, Key, MouseButton};
use crate::input::InputState;
use crate::math::{Mat4, Quaternion, Vec3};
use crate::projection::Projection;

const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// 89 degrees; keeps pitch short of straight up or down where the basis
/// would collapse.
const MAX_PITCH: f32 = 1.553_343;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    projection: Projection,
    settings: CameraSettings,
    mouse_look: bool,
}

impl Camera {
    /// Creates a camera at the origin looking along +Z.
    pub fn new(projection: Projection, settings: CameraSettings) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, 1.0),
            up: WORLD_UP,
            right: Vec3::new(1.0, 0.0, 0.0),
            projection,
            settings,
            mouse_look: false,
        };
        camera.update_vectors();
        camera
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit forward vector.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    pub fn settings(&self) -> CameraSettings {
        self.settings
    }

    /// Whether mouse motion currently rotates the camera.
    pub fn mouse_look(&self) -> bool {
        self.mouse_look
    }

    // =========================================================================
    // Placement
    // =========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Points the camera along `direction`. Zero vectors and directions
    /// parallel to world up are ignored.
    pub fn set_direction(&mut self, direction: Vec3) {
        let unit = direction.unit();
        if unit.is_zero() || unit.dot(WORLD_UP).abs() > MAX_PITCH.sin() {
            return;
        }
        self.direction = unit;
        self.update_vectors();
    }

    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Current pitch in radians; positive looks down.
    pub fn pitch(&self) -> f32 {
        (-self.direction.y()).clamp(-1.0, 1.0).asin()
    }

    /// Yaw about world up, then pitch about the camera's right axis (radians).
    /// Positive yaw looks right, positive pitch looks down. The resulting
    /// pitch is clamped to just under +/-90 degrees.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        let current = self.pitch();
        let pitch = (current + pitch).clamp(-MAX_PITCH, MAX_PITCH) - current;

        let yaw_rotation = Quaternion::from_axis_angle(WORLD_UP, yaw);
        let pitch_rotation = Quaternion::from_axis_angle(self.right, pitch);
        self.direction.rotate_by_quaternion(yaw_rotation * pitch_rotation);
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        self.direction.normalize();
        self.right = WORLD_UP.cross(self.direction).unit();
        self.up = self.direction.cross(self.right).unit();
    }

    // =========================================================================
    // Controls
    // =========================================================================

    /// Mouse look is active while the right button is held; Escape releases
    /// it.
    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::MouseButton {
                button: MouseButton::Right,
                pressed,
                ..
            } => self.mouse_look = pressed,
            Event::Keyboard {
                key: Key::Escape,
                pressed: true,
            } => self.mouse_look = false,
            Event::MouseMotion { rel_x, rel_y, .. } if self.mouse_look => {
                let sensitivity = self.settings.look_sensitivity;
                self.rotate(rel_x as f32 * sensitivity, rel_y as f32 * sensitivity);
            }
            _ => {}
        }
    }

    /// Moves with W/S (forward/back), A/D (left/right) and E/Q (up/down).
    pub fn update(&mut self, input: &InputState, delta_time: f32) {
        let mut movement = Vec3::ZERO;
        let axes = [
            (Key::W, self.direction),
            (Key::S, -self.direction),
            (Key::D, self.right),
            (Key::A, -self.right),
            (Key::E, self.up),
            (Key::Q, -self.up),
        ];
        for (key, axis) in axes {
            if input.is_key_down(key) {
                movement += axis;
            }
        }

        if !movement.is_zero() {
            self.move_by(movement.unit() * (self.settings.move_speed * delta_time));
        }
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// Camera to world: the basis vectors as columns, then the position.
    pub fn world_matrix(&self) -> Mat4 {
        let p = self.position;
        let (r, u, d) = (self.right, self.up, self.direction);
        Mat4::from_rows([
            [r.x(), u.x(), d.x(), p.x()],
            [r.y(), u.y(), d.y(), p.y()],
            [r.z(), u.z(), d.z(), p.z()],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// World to view space. The basis is orthonormal, so the world matrix
    /// is rigid and inverts by transposition.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().fast_inverse_rigid()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> Camera {
        Camera::new(
            Projection::new(FRAC_PI_2, 1.0, 0.1, 100.0),
            CameraSettings::default(),
        )
    }

    fn held(keys: &[Key]) -> InputState {
        let mut input = InputState::new();
        for &key in keys {
            input.handle_event(&Event::Keyboard { key, pressed: true });
        }
        input
    }

    #[test]
    fn camera_starts_looking_forward() {
        let camera = camera();
        assert_eq!(camera.direction(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(camera.up(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn yaw_rotates_horizontally() {
        let mut camera = camera();
        camera.rotate(FRAC_PI_2, 0.0);

        assert_relative_eq!(camera.direction().x(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.direction().z(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().z(), -1.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_follows_the_right_axis_after_yaw() {
        let mut camera = camera();
        camera.rotate(FRAC_PI_2, 0.0);
        camera.rotate(0.0, 0.3);

        assert_relative_eq!(camera.direction().y(), -(0.3f32.sin()), epsilon = 1e-5);
        assert_relative_eq!(camera.direction().x(), 0.3f32.cos(), epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = camera();
        camera.rotate(0.0, -2.0);
        assert_relative_eq!(camera.pitch(), -MAX_PITCH, epsilon = 1e-4);
        assert!(camera.direction().z() > 0.0);
        assert!(camera.up().y() > 0.0);

        camera.rotate(0.0, -0.5);
        assert_relative_eq!(camera.pitch(), -MAX_PITCH, epsilon = 1e-4);

        camera.rotate(0.0, 0.5);
        assert_relative_eq!(camera.pitch(), 0.5 - MAX_PITCH, epsilon = 1e-4);
    }

    #[test]
    fn basis_stays_orthonormal() {
        let mut camera = camera();
        for step in 0..50 {
            camera.rotate(0.13, if step % 2 == 0 { 0.05 } else { -0.04 });
        }
        let (d, r, u) = (camera.direction(), camera.right(), camera.up());
        assert_relative_eq!(d.length(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(d.dot(r), 0.0, epsilon = 1e-4);
        assert_relative_eq!(d.dot(u), 0.0, epsilon = 1e-4);
        assert_relative_eq!(r.dot(u), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn movement_uses_speed_and_delta() {
        let mut camera = camera();
        camera.update(&held(&[Key::W]), 0.5);
        assert_relative_eq!(camera.position().z(), 2.5, epsilon = 1e-5);

        camera.update(&held(&[Key::D, Key::E]), 1.0);
        let step = 5.0 / 2.0f32.sqrt();
        assert_relative_eq!(camera.position().x(), step, epsilon = 1e-5);
        assert_relative_eq!(camera.position().y(), step, epsilon = 1e-5);

        // Opposite keys cancel.
        let before = camera.position();
        camera.update(&held(&[Key::A, Key::D]), 1.0);
        assert_eq!(camera.position(), before);
    }

    #[test]
    fn mouse_look_needs_right_button() {
        let mut camera = camera();
        let motion = Event::MouseMotion {
            x: 0,
            y: 0,
            rel_x: 100,
            rel_y: 0,
        };
        camera.handle_event(&motion);
        assert_eq!(camera.direction(), Vec3::new(0.0, 0.0, 1.0));

        camera.handle_event(&Event::MouseButton {
            button: MouseButton::Right,
            pressed: true,
            x: 0,
            y: 0,
        });
        assert!(camera.mouse_look());
        camera.handle_event(&motion);
        assert_relative_eq!(camera.direction().x(), 0.2f32.sin(), epsilon = 1e-5);

        camera.handle_event(&Event::Keyboard {
            key: Key::Escape,
            pressed: true,
        });
        assert!(!camera.mouse_look());
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let mut camera = camera();
        camera.set_position(Vec3::new(0.0, 0.0, -5.0));
        let origin = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(origin.z(), 5.0, epsilon = 1e-5);

        camera.set_position(Vec3::new(2.0, 1.0, 0.0));
        camera.set_direction(Vec3::new(-1.0, 0.0, 0.0));
        let target = camera.view_matrix().transform_point(Vec3::new(-3.0, 1.0, 0.0));
        assert_relative_eq!(target.x(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.y(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.z(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_rows_are_the_basis() {
        let mut camera = camera();
        camera.set_position(Vec3::new(1.0, -2.0, 3.0));
        camera.rotate(0.4, -0.3);

        let view = camera.view_matrix();
        let p = camera.position();
        for (row, axis) in [camera.right(), camera.up(), camera.direction()].into_iter().enumerate() {
            for col in 0..3 {
                assert_relative_eq!(view[(row, col)], axis[col], epsilon = 1e-6);
            }
            assert_relative_eq!(view[(row, 3)], -axis.dot(p), epsilon = 1e-5);
        }
        assert_eq!(view.rows()[3], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn view_matrix_inverts_with_fast_inverse() {
        let mut camera = camera();
        camera.set_position(Vec3::new(1.0, -2.0, 3.0));
        camera.rotate(0.7, 0.2);

        let inverse = camera.view_matrix().fast_inverse_rigid();
        let eye = inverse.transform_point(Vec3::ZERO);
        assert_relative_eq!(eye.x(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y(), -2.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z(), 3.0, epsilon = 1e-5);
    }
}
