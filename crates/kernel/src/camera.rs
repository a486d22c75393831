use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tetraview_common::Key;

/// Look-at camera driven by discrete arrow-key presses.
///
/// `front` is a direction, not a target. It is not kept at unit length unless
/// `renormalize` is set, so repeated rotations let its length drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    /// Translation step in world units, also used as the rotation step in radians.
    pub speed: f32,
    pub renormalize: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.3, 0.2, 1.0),
            front: Vec3::new(0.3, 0.2, -1.0),
            up: Vec3::new(0.3, 2.0, 1.0),
            speed: 0.1,
            renormalize: false,
        }
    }
}

/// What a key press did to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraUpdate {
    /// Position changed; carries the new position.
    Moved(Vec3),
    /// Facing direction changed; carries the new `front`.
    Rotated(Vec3),
    /// Key is not bound to the camera.
    Ignored,
}

impl Camera {
    /// Camera-relative right vector. Zero if `front` and `up` are parallel.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize_or_zero()
    }

    /// Strafe one step against `right()`.
    pub fn move_left(&mut self) {
        let right = self.right();
        self.position -= right * self.speed;
    }

    /// Strafe one step along `right()`.
    pub fn move_right(&mut self) {
        let right = self.right();
        self.position += right * self.speed;
    }

    /// Moves along the raw `front` vector, so the step scales with its length.
    pub fn move_forward(&mut self) {
        self.position += self.front * self.speed;
    }

    /// Inverse of `move_forward`.
    pub fn move_backward(&mut self) {
        self.position -= self.front * self.speed;
    }

    /// Rotate `front` by `angle` radians about `axis` (right-hand rule).
    pub fn rotate_front(&mut self, axis: Vec3, angle: f32) {
        let rotated = Quat::from_axis_angle(axis.normalize(), angle) * self.front;
        self.front = if self.renormalize {
            rotated.normalize_or(self.front)
        } else {
            rotated
        };
    }

    /// Apply one arrow-key press.
    ///
    /// With the modifier held, left/right yaw about world +Y and up/down pitch
    /// about world +X. Without it the camera strafes or moves along `front`.
    pub fn handle_key(&mut self, key: Key, modifier_pressed: bool) -> CameraUpdate {
        if modifier_pressed {
            let (axis, sign) = match key {
                Key::Left => (Vec3::Y, 1.0),
                Key::Right => (Vec3::Y, -1.0),
                Key::Up => (Vec3::X, 1.0),
                Key::Down => (Vec3::X, -1.0),
                Key::Other(_) => return CameraUpdate::Ignored,
            };
            self.rotate_front(axis, sign * self.speed);
            return CameraUpdate::Rotated(self.front);
        }

        match key {
            Key::Left => self.move_left(),
            Key::Right => self.move_right(),
            Key::Up => self.move_forward(),
            Key::Down => self.move_backward(),
            Key::Other(_) => return CameraUpdate::Ignored,
        }
        CameraUpdate::Moved(self.position)
    }

    /// Point the camera looks at: `position + front`.
    pub fn target(&self) -> Vec3 {
        self.position + self.front
    }

    /// Right-handed look-at from `position` toward `target()`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target(), self.up)
    }
}
