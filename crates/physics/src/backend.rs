//! Backend trait the player motion controller is written against.
//!
//! Movement-mode logic should be written once, not duplicated per physics
//! engine, so the controller only ever sees this narrow surface. The rapier
//! [`PhysicsWorld`] is the production implementation; tests use a stub.

use crate::PhysicsWorld;
use glam::Vec3;
use rapier3d::prelude::RigidBodyHandle;

/// The slice of a physics engine the character controller needs.
pub trait CharacterPhysics {
    /// Backend-specific body identifier.
    type Body: Copy;

    /// Advance the whole simulation by a frame delta.
    fn step(&mut self, dt: f32);

    /// Create the player's collider body. Returns `None` (logged by the
    /// backend) if the spawn position is invalid.
    fn spawn_character(
        &mut self,
        position: Vec3,
        half_height: f32,
        radius: f32,
    ) -> Option<Self::Body>;

    /// Remove the character body and its colliders.
    fn remove_character(&mut self, body: Self::Body);

    /// Current body position (capsule center).
    fn position(&self, body: Self::Body) -> Vec3;

    /// Hard-set the body position, zeroing velocities and forces.
    fn warp(&mut self, body: Self::Body, position: Vec3);

    /// Current linear velocity.
    fn velocity(&self, body: Self::Body) -> Vec3;

    /// Set linear velocity directly.
    fn set_velocity(&mut self, body: Self::Body, velocity: Vec3);

    /// Switch between kinematic (game-code driven) and dynamic (simulated).
    fn set_kinematic(&mut self, body: Self::Body, kinematic: bool);

    /// True if solid geometry lies within `probe_distance` below the body.
    fn is_grounded(&self, body: Self::Body, probe_distance: f32) -> bool;
}

impl CharacterPhysics for PhysicsWorld {
    type Body = RigidBodyHandle;

    fn step(&mut self, dt: f32) {
        PhysicsWorld::step(self, dt);
    }

    fn spawn_character(
        &mut self,
        position: Vec3,
        half_height: f32,
        radius: f32,
    ) -> Option<Self::Body> {
        self.add_character_body(position, half_height, radius)
    }

    fn remove_character(&mut self, body: Self::Body) {
        self.remove_body(body);
    }

    fn position(&self, body: Self::Body) -> Vec3 {
        self.body_position(body).unwrap_or(Vec3::ZERO)
    }

    fn warp(&mut self, body: Self::Body, position: Vec3) {
        self.warp_body(body, position);
    }

    fn velocity(&self, body: Self::Body) -> Vec3 {
        self.body_velocity(body).unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(&mut self, body: Self::Body, velocity: Vec3) {
        self.set_body_velocity(body, velocity);
    }

    fn set_kinematic(&mut self, body: Self::Body, kinematic: bool) {
        self.set_body_kinematic(body, kinematic);
    }

    fn is_grounded(&self, body: Self::Body, probe_distance: f32) -> bool {
        let origin = self.position(body);
        self.probe_ground(origin, probe_distance, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The rapier implementation reports grounded once the capsule settles
    /// on the floor, through the trait surface the controller uses.
    #[test]
    fn rapier_backend_reports_grounded() {
        let mut world = PhysicsWorld::new();
        world.add_ground_plane();
        let body = world
            .spawn_character(Vec3::new(0.0, 1.2, 0.0), 0.6, 0.35)
            .unwrap();
        for _ in 0..120 {
            CharacterPhysics::step(&mut world, 1.0 / 60.0);
        }
        assert!(world.is_grounded(body, 1.05));
    }
}
