//! First-person camera: mouse look and movement basis vectors.

use crate::Transform;
use glam::{Quat, Vec3};

/// First-person camera with pitch-clamped mouse look.
///
/// The camera is positioned by the motion controller every frame; it owns
/// only orientation state. In noclip mode the relationship inverts and the
/// camera becomes the source of truth for the player position.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    /// Mouse sensitivity for look controls.
    pub sensitivity: f32,
    /// Current pitch (up/down rotation) in radians.
    pitch: f32,
    /// Current yaw (left/right rotation) in radians.
    yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            sensitivity: 0.002,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Process mouse movement for FPS look controls.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw -= delta_x * self.sensitivity;
        self.pitch -= delta_y * self.sensitivity;

        // Clamp pitch to prevent flipping
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        self.transform.rotation =
            Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }

    /// Noclip free-fly: move in camera space (forward/right/up).
    /// - `move_xy`: x = strafe, y = forward/back (from WASD)
    /// - `move_y`: vertical (e.g. +1 jump key, -1 crouch key)
    pub fn process_fly(&mut self, move_xy: glam::Vec2, move_y: f32, speed: f32, dt: f32) {
        let forward = self.transform.forward();
        let right = self.transform.right();
        let up = self.transform.up();

        let mut velocity = Vec3::ZERO;
        velocity += forward * move_xy.y;
        velocity += right * move_xy.x;
        velocity += up * move_y;

        if velocity.length_squared() > 0.0 {
            velocity = velocity.normalize() * speed * dt;
            self.transform.translate(velocity);
        }
    }

    /// Horizontal movement basis: camera forward and right projected onto the
    /// ground plane, normalized. Used by walking and fixed-height movement so
    /// looking up or down never changes ground speed.
    pub fn ground_basis(&self) -> (Vec3, Vec3) {
        let forward = self.transform.forward();
        let right = self.transform.right();
        let forward_flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right_flat = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();
        (forward_flat, right_flat)
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get camera forward direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Get current yaw (left/right rotation) in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch (up/down rotation) in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Aim the camera at a world point, recomputing yaw and pitch.
    pub fn look_toward(&mut self, point: Vec3) {
        let dir = point - self.transform.position;
        if dir.length_squared() < 1.0e-8 {
            return;
        }
        let horizontal = (dir.x * dir.x + dir.z * dir.z).sqrt();
        let yaw = (-dir.x).atan2(-dir.z);
        let pitch = dir.y.atan2(horizontal);
        self.set_yaw_pitch(yaw, pitch);
    }

    /// Set yaw and pitch directly (in radians) and rebuild rotation.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = pitch.clamp(-max_pitch, max_pitch);
        self.transform.rotation =
            Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }
}
