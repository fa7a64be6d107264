//! Raycasting for gaze resolution and ground probes.

use crate::PhysicsWorld;
use glam::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// The collider's user data (scene entity bits, 0 for bare architecture).
    pub user_data: u128,
}

impl PhysicsWorld {
    /// Cast a ray and return the first hit, optionally ignoring one body
    /// (the player must never hit their own capsule when looking down).
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude_body: Option<RigidBodyHandle>,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let mut filter = QueryFilter::default();
        if let Some(body) = exclude_body {
            filter = filter.exclude_rigid_body(body);
        }

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                let user_data = self
                    .collider_set
                    .get(collider)
                    .map(|c| c.user_data)
                    .unwrap_or(0);
                RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                    user_data,
                }
            })
    }

    /// True if solid geometry lies within `probe_distance` straight below
    /// `origin`, ignoring the probing body itself.
    pub fn probe_ground(
        &self,
        origin: Vec3,
        probe_distance: f32,
        exclude_body: Option<RigidBodyHandle>,
    ) -> bool {
        self.raycast(origin, Vec3::NEG_Y, probe_distance, exclude_body)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The excluded body is invisible to its own rays; the wall behind it is
    /// still hit at the right distance.
    #[test]
    fn raycast_skips_excluded_body() {
        let mut world = PhysicsWorld::new();
        let body = world
            .add_character_body(Vec3::new(0.0, 1.0, 0.0), 0.6, 0.35)
            .unwrap();
        world.add_static_cuboid(Vec3::new(0.0, 1.0, -4.0), 0.0, Vec3::new(2.0, 2.0, 0.1), 7);
        world.update_query_pipeline();

        let hit = world
            .raycast(Vec3::new(0.0, 1.0, 2.0), Vec3::NEG_Z, 100.0, Some(body))
            .expect("wall behind the player capsule should be hit");
        assert_eq!(hit.user_data, 7);
        assert!((hit.distance - 5.9).abs() < 1.0e-2);
    }

    /// A ground probe directly above the floor reports grounded; one in the
    /// air does not.
    #[test]
    fn ground_probe_respects_distance() {
        let mut world = PhysicsWorld::new();
        world.add_ground_plane();
        world.update_query_pipeline();

        assert!(world.probe_ground(Vec3::new(0.0, 1.0, 0.0), 1.1, None));
        assert!(!world.probe_ground(Vec3::new(0.0, 10.0, 0.0), 1.1, None));
    }
}
